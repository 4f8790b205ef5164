//! Balance equation and tail curves.
//!
//! The solver and the sampler rely on a handful of primitive evaluations:
//! - the scalar cost `C(p, q)` and its analytic gradient (for the solver)
//! - the two-sided exponential `f_orig(x)` and its mirror `f_ref(x)` (for plots)
//!
//! All of them are pure functions of their arguments.

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::domain::Rates;
use crate::math::safe_exp;

/// Residual of the balance equation at `theta = (p, q)`:
///
/// ```text
/// C = (1 - exp(b p)) / b - (1 - exp(-a q)) / a
/// ```
pub fn cost(rates: &Rates, theta: &Vector2<f64>) -> f64 {
    let (p, q) = (theta[0], theta[1]);
    (1.0 - safe_exp(rates.b * p)) / rates.b - (1.0 - safe_exp(-rates.a * q)) / rates.a
}

/// Analytic gradient of [`cost`]: `(-exp(b p), -exp(-a q))`.
pub fn gradient(rates: &Rates, theta: &Vector2<f64>) -> Vector2<f64> {
    let (p, q) = (theta[0], theta[1]);
    Vector2::new(-safe_exp(rates.b * p), -safe_exp(-rates.a * q))
}

/// `exp(-a x)` for `x > 0`, `exp(b x)` otherwise.
#[inline]
pub fn f_orig(rates: &Rates, x: f64) -> f64 {
    if x > 0.0 {
        safe_exp(-rates.a * x)
    } else {
        safe_exp(rates.b * x)
    }
}

/// Mirror of [`f_orig`] about `x = 0`: `exp(-b x)` for `x > 0`, `exp(a x)` otherwise.
#[inline]
pub fn f_ref(rates: &Rates, x: f64) -> f64 {
    if x > 0.0 {
        safe_exp(-rates.b * x)
    } else {
        safe_exp(rates.a * x)
    }
}

/// Both curves evaluated on a shared grid. The three vectors are parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSamples {
    pub x: Vec<f64>,
    pub f_orig: Vec<f64>,
    pub f_ref: Vec<f64>,
}

impl CurveSamples {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest value across both curves (`None` for an empty grid).
    pub fn y_max(&self) -> Option<f64> {
        self.f_orig
            .iter()
            .chain(self.f_ref.iter())
            .copied()
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    pub fn orig_points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.f_orig.iter().copied()).collect()
    }

    pub fn ref_points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.f_ref.iter().copied()).collect()
    }
}

/// Evaluate `f_orig` and `f_ref` at every grid point.
///
/// Points are independent, so the work is split across the rayon pool; the
/// output order matches `xs`.
pub fn evaluate_curves(rates: &Rates, xs: &[f64]) -> CurveSamples {
    let (f_orig, f_ref): (Vec<f64>, Vec<f64>) = xs
        .par_iter()
        .map(|&x| (f_orig(rates, x), f_ref(rates, x)))
        .unzip();

    CurveSamples {
        x: xs.to_vec(),
        f_orig,
        f_ref,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn cost_vanishes_at_origin() {
        let r = Rates::default();
        assert_eq!(cost(&r, &Vector2::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let r = Rates::default();
        let theta = Vector2::new(-0.7, 1.3);
        let g = gradient(&r, &theta);
        let h = 1e-6;
        for k in 0..2 {
            let mut hi = theta;
            let mut lo = theta;
            hi[k] += h;
            lo[k] -= h;
            let fd = (cost(&r, &hi) - cost(&r, &lo)) / (2.0 * h);
            assert_relative_eq!(g[k], fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn curves_peak_at_one_at_origin() {
        let r = Rates::default();
        assert_eq!(f_orig(&r, 0.0), 1.0);
        assert_eq!(f_ref(&r, 0.0), 1.0);
    }

    #[test]
    fn reflection_identity() {
        let r = Rates::new(3.0, 0.5).unwrap();
        for &x in &[-20.0, -3.1, -1e-9, 0.0, 1e-9, 0.25, 4.0, 50.0] {
            assert_relative_eq!(f_ref(&r, x), f_orig(&r, -x), max_relative = 1e-15);
        }
    }

    #[test]
    fn parallel_evaluation_preserves_order() {
        let r = Rates::default();
        let xs: Vec<f64> = (0..1000).map(|i| -5.0 + i as f64 * 0.01).collect();
        let samples = evaluate_curves(&r, &xs);
        assert_eq!(samples.len(), xs.len());
        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(samples.f_orig[i], f_orig(&r, x));
            assert_eq!(samples.f_ref[i], f_ref(&r, x));
        }
    }

    #[test]
    fn y_max_spans_both_curves() {
        let samples = CurveSamples {
            x: vec![0.0, 1.0],
            f_orig: vec![0.2, 0.4],
            f_ref: vec![0.9, 0.1],
        };
        assert_eq!(samples.y_max(), Some(0.9));
        assert_eq!(evaluate_curves(&Rates::default(), &[]).y_max(), None);
    }
}
