//! The experiment itself, independent of any front-end.
//!
//! Keeping this in one place makes the whole computation testable without
//! touching the terminal or the filesystem:
//! solve theta -> plotting domain -> adaptive grid -> curve evaluation -> figure
//!
//! The solved `theta` only labels the figure; the curves depend on the rates alone.

use nalgebra::Vector2;

use crate::domain::{PlotDomain, Rates, RunConfig, SampleGrid};
use crate::error::AppError;
use crate::fit::{Solution, adaptive_grid, plot_domain, solve_theta};
use crate::models::evaluate_curves;
use crate::plot::Figure;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rates: Rates,
    pub theta0: Vector2<f64>,
    pub solution: Solution,
    pub domain: PlotDomain,
    pub grid: SampleGrid,
    pub figure: Figure,
}

/// Execute the full computation and return the outputs. Nothing is written.
pub fn run_experiment(config: &RunConfig) -> Result<RunOutput, AppError> {
    let rates = config.rates;

    // 1) Solve the balance equation.
    let solution = solve_theta(&rates, config.theta0, &config.solver);

    // 2) Size the plotting domain from the tail decay.
    let domain = plot_domain(&rates, &config.domain)?;

    // 3) Build the adaptive grid and evaluate both curves on it.
    let grid = adaptive_grid(&rates, &domain, &config.sampling)?;
    let samples = evaluate_curves(&rates, &grid.x);

    // 4) Assemble the figure description.
    let figure = Figure::new(samples, &domain, &solution)?;

    Ok(RunOutput {
        rates,
        theta0: config.theta0,
        solution,
        domain,
        grid,
        figure,
    })
}
