//! Command-line parsing.
//!
//! Every flag is optional; running the binary without arguments reproduces
//! the default experiment. Parsing is kept separate from the numerics so the
//! pipeline can be driven directly from a `RunConfig`.

use std::path::PathBuf;

use clap::Parser;
use nalgebra::Vector2;

use crate::domain::{
    DEFAULT_THETA0, DomainConfig, PlotConfig, Rates, RunConfig, SamplingConfig, SolverConfig,
};
use crate::error::AppError;

/// Solve the tail balance equation and plot the curve with its reflection.
#[derive(Debug, Parser, Clone)]
#[command(name = "tail-reflect", version, allow_negative_numbers = true)]
pub struct Cli {
    /// Right-tail decay rate (default: 2 + sqrt(2)).
    #[arg(long)]
    pub a: Option<f64>,

    /// Left-tail decay rate (default: a - 2).
    #[arg(long)]
    pub b: Option<f64>,

    /// Initial guess for p.
    #[arg(long, default_value_t = DEFAULT_THETA0[0])]
    pub p0: f64,

    /// Initial guess for q.
    #[arg(long, default_value_t = DEFAULT_THETA0[1])]
    pub q0: f64,

    /// Solver iteration budget.
    #[arg(long, default_value_t = 2000)]
    pub max_iter: usize,

    /// Absolute tolerance on the cost.
    #[arg(long, default_value_t = 1e-16)]
    pub tol: f64,

    /// Tail value treated as negligible when sizing the domain (smaller = wider).
    #[arg(long, default_value_t = 1e-8)]
    pub eps: f64,

    /// Margin applied beyond each tail extent.
    #[arg(long, default_value_t = 1.05)]
    pub margin: f64,

    /// Points in the left tail segment.
    #[arg(long, default_value_t = 600)]
    pub left_n: usize,

    /// Points in the dense center segment.
    #[arg(long, default_value_t = 2200)]
    pub center_n: usize,

    /// Points in the right tail segment.
    #[arg(long, default_value_t = 600)]
    pub right_n: usize,

    /// Output directory for the figure files (created if missing).
    #[arg(long, default_value = "../figs")]
    pub out_dir: PathBuf,

    /// File stem for the PNG and SVG outputs.
    #[arg(long, default_value = "figure_new")]
    pub name: String,

    /// Raster resolution in dots per inch.
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,

    /// Also write a JSON run summary to this path.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Skip the interactive display after export.
    #[arg(long)]
    pub no_show: bool,
}

impl Cli {
    /// Map parsed arguments onto a validated `RunConfig`.
    pub fn into_run_config(self) -> Result<RunConfig, AppError> {
        let defaults = Rates::default();
        let a = self.a.unwrap_or(defaults.a);
        let b = self.b.unwrap_or(a - 2.0);
        let rates = Rates::new(a, b)?;

        if self.name.trim().is_empty() {
            return Err(AppError::config("Output name must not be empty."));
        }

        let plot = PlotConfig {
            dpi: self.dpi,
            out_dir: self.out_dir,
            base_name: self.name,
            ..PlotConfig::default()
        };
        plot.checked_pixel_size(plot.dpi)?;

        Ok(RunConfig {
            rates,
            theta0: Vector2::new(self.p0, self.q0),
            solver: SolverConfig {
                max_iter: self.max_iter,
                tol: self.tol,
            },
            domain: DomainConfig {
                eps: self.eps,
                margin: self.margin,
            },
            sampling: SamplingConfig {
                left_n: self.left_n,
                center_n: self.center_n,
                right_n: self.right_n,
                ..SamplingConfig::default()
            },
            plot,
            export_json: self.export_json,
            show: !self.no_show,
        })
    }
}
