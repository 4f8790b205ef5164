//! Console reporting.
//!
//! Formatting lives here so the solver and export code stay free of
//! presentation concerns.

use std::path::Path;

use crate::fit::Solution;

/// Digits kept after the decimal point when printing `theta`.
const THETA_PRECISION: usize = 8;

/// One-line solver report, e.g.
/// `Solved theta = [-0.37814312  3.00376622], final cost = 5.551e-17, iterations = 14`.
///
/// Runs that did not converge say so explicitly.
pub fn format_solution_line(solution: &Solution) -> String {
    let mut line = format!(
        "Solved theta = {}, final cost = {}, iterations = {}",
        format_vector(&[solution.p(), solution.q()], THETA_PRECISION),
        format_sci(solution.cost, 3),
        solution.iters
    );
    if !solution.is_converged() {
        line.push_str(&format!(" (status: {})", solution.status.label()));
    }
    line
}

/// Scientific notation with a signed, at least two-digit exponent
/// (`2.500e-01`, `1.000e+00`).
pub fn format_sci(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => raw,
    }
}

/// Bracketed vector with aligned columns, e.g. `[-0.37814312  3.00376622]`.
///
/// Each element keeps only the fraction digits it needs (`[1.  2.5]`);
/// integer parts are right-aligned and fractions left-aligned.
pub fn format_vector(values: &[f64], precision: usize) -> String {
    let parts: Vec<(String, String)> = values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                return (format_sci(*v, 0), String::new());
            }
            let s = format!("{v:.precision$}");
            match s.split_once('.') {
                Some((int, frac)) => (int.to_string(), format!(".{}", frac.trim_end_matches('0'))),
                None => (s, ".".to_string()),
            }
        })
        .collect();
    let int_w = parts.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let frac_w = parts.iter().map(|(_, f)| f.len()).max().unwrap_or(0);

    let cells: Vec<String> = parts
        .iter()
        .map(|(int, frac)| format!("{int:>int_w$}{frac:<frac_w$}"))
        .collect();
    format!("[{}]", cells.join(" "))
}

/// Confirmation line for a written file.
pub fn format_saved_line(path: &Path) -> String {
    format!("Saved figure to {}", path.display())
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use super::*;
    use crate::fit::Status;

    #[test]
    fn solution_line_format() {
        let sol = Solution {
            status: Status::Converged,
            theta: Vector2::new(-0.378143122696566, 3.003766223882232),
            cost: 5.551115123125783e-17,
            iters: 14,
        };
        assert_eq!(
            format_solution_line(&sol),
            "Solved theta = [-0.37814312  3.00376622], final cost = 5.551e-17, iterations = 14"
        );
    }

    #[test]
    fn non_converged_runs_are_flagged() {
        let sol = Solution {
            status: Status::MaxIters,
            theta: Vector2::new(1.0, 2.0),
            cost: 0.25,
            iters: 2000,
        };
        assert!(format_solution_line(&sol).ends_with("iterations = 2000 (status: max-iters)"));
    }

    #[test]
    fn cost_exponent_has_two_digits_and_sign() {
        let sol = Solution {
            status: Status::Stalled,
            theta: Vector2::new(1.0, 2.5),
            cost: 0.25,
            iters: 3,
        };
        assert_eq!(
            format_solution_line(&sol),
            "Solved theta = [1.  2.5], final cost = 2.500e-01, iterations = 3 (status: stalled)"
        );
        assert_eq!(format_sci(1.0, 3), "1.000e+00");
        assert_eq!(format_sci(-12340.0, 3), "-1.234e+04");
        assert_eq!(format_sci(1e-120, 2), "1.00e-120");
        assert_eq!(format_sci(f64::NAN, 3), "nan");
    }

    #[test]
    fn vector_columns_are_right_aligned() {
        assert_eq!(format_vector(&[-2.0, 3.0], 8), "[-2.  3.]");
        assert_eq!(format_vector(&[0.5, 10.25], 8), "[ 0.5  10.25]");
    }

    #[test]
    fn saved_line_includes_path() {
        assert_eq!(
            format_saved_line(Path::new("../figs/figure_new.png")),
            "Saved figure to ../figs/figure_new.png"
        );
    }
}
