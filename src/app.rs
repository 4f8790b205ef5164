//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments into a `RunConfig`
//! - runs the experiment
//! - prints the solver report
//! - writes the figure (and optional JSON summary)
//! - shows the figure

use std::io::IsTerminal;

use clap::Parser;

use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::{RunSummary, export_figure, write_summary_json};
use crate::report::{format_saved_line, format_solution_line};

pub mod pipeline;

/// Width/height of the fallback ASCII plot, in characters.
const ASCII_SIZE: (usize, usize) = (100, 25);

/// Entry point for the binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    let config = cli.into_run_config()?;
    execute(&config)
}

/// Run, report, export, and display for an explicit configuration.
pub fn execute(config: &RunConfig) -> Result<(), AppError> {
    let run = pipeline::run_experiment(config)?;
    println!("{}", format_solution_line(&run.solution));

    // Files must exist before anything is shown.
    let files = export_figure(&run.figure, &config.plot)?;
    for path in files.paths() {
        println!("{}", format_saved_line(path));
    }

    if let Some(path) = &config.export_json {
        write_summary_json(path, &RunSummary::new(&run, Some(&files)))?;
    }

    if config.show {
        if std::io::stdout().is_terminal() {
            crate::tui::show(&run, &files)?;
        } else {
            log::debug!("stdout is not a terminal; printing ASCII plot instead");
            let (w, h) = ASCII_SIZE;
            println!("{}", crate::plot::render_ascii_plot(&run.figure, w, h));
        }
    }

    Ok(())
}
