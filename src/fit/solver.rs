//! Scalar-residual Gauss-Newton solver for the balance equation.
//!
//! There is one equation and two unknowns, so each step is the minimum-norm
//! correction that zeroes the linearised residual:
//!
//! ```text
//! Δθ = -(C / (J·J)) J
//! ```
//!
//! The solver never fails. Stalls and budget exhaustion are reported through
//! [`Status`] so callers can tell a converged root from a best-effort one.

use nalgebra::Vector2;
use serde::Serialize;

use crate::domain::{Rates, SolverConfig};
use crate::models::{cost, gradient};

/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// `|C|` dropped below the tolerance.
    Converged,
    /// `J·J` was zero or NaN; no step could be taken.
    Stalled,
    /// Ran out of iterations without meeting the tolerance.
    MaxIters,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Converged => "converged",
            Status::Stalled => "stalled",
            Status::MaxIters => "max-iters",
        }
    }
}

/// Result of [`solve_theta`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub status: Status,
    pub theta: Vector2<f64>,
    /// Cost evaluated at the start of the final iteration.
    pub cost: f64,
    /// Iterations performed (1-based loop counter).
    pub iters: usize,
}

impl Solution {
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    pub fn p(&self) -> f64 {
        self.theta[0]
    }

    pub fn q(&self) -> f64 {
        self.theta[1]
    }
}

/// One Gauss-Newton correction at `theta`, or `None` when the gradient is
/// unusable (`J·J` zero or NaN).
pub fn gauss_newton_step(rates: &Rates, theta: &Vector2<f64>) -> Option<Vector2<f64>> {
    let c = cost(rates, theta);
    let j = gradient(rates, theta);
    step_from(c, &j)
}

fn step_from(c: f64, j: &Vector2<f64>) -> Option<Vector2<f64>> {
    let denom = j.dot(j);
    if denom == 0.0 || denom.is_nan() {
        return None;
    }
    Some(-(c / denom) * *j)
}

/// Drive `cost(rates, theta)` to zero starting from `theta0`.
///
/// Each iteration evaluates `C` and `J`, stops on a stalled gradient, applies
/// the step, and then stops if `|C| < tol`. The step is applied even on the
/// converging iteration, so the returned `theta` is one correction past the
/// point where `cost` was measured.
pub fn solve_theta(rates: &Rates, theta0: Vector2<f64>, config: &SolverConfig) -> Solution {
    let mut theta = theta0;
    let mut c = cost(rates, &theta);
    let mut status = Status::MaxIters;
    let mut iters = 0;

    for i in 0..config.max_iter {
        iters = i + 1;
        c = cost(rates, &theta);
        let j = gradient(rates, &theta);

        let Some(delta) = step_from(c, &j) else {
            status = Status::Stalled;
            break;
        };
        theta += delta;
        log::trace!(
            "iter {iters}: cost={c:.3e} theta=({:.12}, {:.12})",
            theta[0],
            theta[1]
        );

        if c.abs() < config.tol {
            status = Status::Converged;
            break;
        }
    }

    let solution = Solution {
        status,
        theta,
        cost: c,
        iters,
    };

    if solution.is_converged() {
        log::debug!("solver converged in {iters} iterations (cost={c:.3e})");
    } else {
        log::warn!(
            "solver stopped without converging: status={}, iterations={iters}, cost={c:.3e}",
            status.label()
        );
    }

    solution
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn default_solution() -> Solution {
        solve_theta(
            &Rates::default(),
            Vector2::new(-2.0, 3.0),
            &SolverConfig::default(),
        )
    }

    #[test]
    fn converges_for_default_rates() {
        let sol = default_solution();
        assert_eq!(sol.status, Status::Converged);
        assert!(sol.iters >= 1 && sol.iters <= 2000);
        assert!(sol.cost.abs() < 1e-16);
        assert!(sol.theta.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn solution_is_a_fixed_point() {
        let rates = Rates::default();
        let sol = default_solution();
        let delta = gauss_newton_step(&rates, &sol.theta).unwrap();
        assert!(delta.norm() < 1e-12, "delta = {delta:?}");
        assert!(cost(&rates, &sol.theta).abs() < 1e-12);
    }

    #[test]
    fn solution_balances_both_sides() {
        let r = Rates::default();
        let sol = default_solution();
        let lhs = (1.0 - (r.b * sol.p()).exp()) / r.b;
        let rhs = (1.0 - (-r.a * sol.q()).exp()) / r.a;
        assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
    }

    #[test]
    fn origin_is_already_a_root() {
        let sol = solve_theta(
            &Rates::default(),
            Vector2::zeros(),
            &SolverConfig::default(),
        );
        assert_eq!(sol.status, Status::Converged);
        assert_eq!(sol.iters, 1);
        assert_eq!(sol.cost, 0.0);
        assert_eq!(sol.theta, Vector2::zeros());
    }

    #[test]
    fn budget_exhaustion_is_soft() {
        let config = SolverConfig {
            max_iter: 1,
            tol: 1e-16,
        };
        let sol = solve_theta(&Rates::default(), Vector2::new(-2.0, 3.0), &config);
        assert_eq!(sol.status, Status::MaxIters);
        assert_eq!(sol.iters, 1);
        assert!(!sol.is_converged());
        assert!(sol.cost.abs() > 1e-3);
    }

    #[test]
    fn zero_budget_reports_initial_cost() {
        let rates = Rates::default();
        let theta0 = Vector2::new(-2.0, 3.0);
        let config = SolverConfig {
            max_iter: 0,
            tol: 1e-16,
        };
        let sol = solve_theta(&rates, theta0, &config);
        assert_eq!(sol.status, Status::MaxIters);
        assert_eq!(sol.iters, 0);
        assert_eq!(sol.theta, theta0);
        assert_eq!(sol.cost, cost(&rates, &theta0));
    }

    #[test]
    fn nan_gradient_stalls() {
        let sol = solve_theta(
            &Rates::default(),
            Vector2::new(f64::NAN, 0.0),
            &SolverConfig::default(),
        );
        assert_eq!(sol.status, Status::Stalled);
        assert_eq!(sol.iters, 1);
    }

    #[test]
    fn step_is_none_for_zero_gradient() {
        assert!(step_from(1.0, &Vector2::zeros()).is_none());
        assert!(step_from(1.0, &Vector2::new(f64::NAN, 1.0)).is_none());
    }
}
