//! JSON run summary.
//!
//! The summary is the portable record of a run: inputs, solver outcome,
//! plotting domain, and the files written. Useful for scripting around the
//! binary without scraping stdout.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{PlotDomain, Rates};
use crate::error::AppError;
use crate::fit::Status;
use crate::io::ExportedFiles;

#[derive(Debug, Clone, Serialize)]
pub struct SolverSummary {
    pub status: Status,
    pub converged: bool,
    pub p: f64,
    pub q: f64,
    pub cost: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub rates: Rates,
    pub theta0: [f64; 2],
    pub solver: SolverSummary,
    pub domain: PlotDomain,
    pub center_half: f64,
    pub sample_count: usize,
    pub y_max: Option<f64>,
    pub files: Option<ExportedFiles>,
}

impl RunSummary {
    pub fn new(run: &RunOutput, files: Option<&ExportedFiles>) -> Self {
        let sol = &run.solution;
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            generated_at: Local::now(),
            rates: run.rates,
            theta0: [run.theta0[0], run.theta0[1]],
            solver: SolverSummary {
                status: sol.status,
                converged: sol.is_converged(),
                p: sol.p(),
                q: sol.q(),
                cost: sol.cost,
                iterations: sol.iters,
            },
            domain: run.domain,
            center_half: run.grid.center_half,
            sample_count: run.grid.x.len(),
            y_max: run.figure.samples.y_max(),
            files: files.cloned(),
        }
    }
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::io(format!("Failed to write summary JSON: {e}")))?;

    log::info!("wrote run summary to {}", path.display());
    Ok(())
}
