//! Plotting domain and adaptive sample grid.
//!
//! The domain is sized analytically from the tail decay: each one-sided
//! exponential is followed until it falls to `eps`, then padded by a margin.
//! Inside that domain the grid is split into three evenly spaced segments:
//! coarse tails and a dense center where the kink at `x = 0` lives.

use crate::domain::{DomainConfig, PlotDomain, Rates, SampleGrid, SamplingConfig};
use crate::error::AppError;

/// Generate `n` evenly spaced points from `start` towards `stop`.
///
/// With `endpoint = false` the interval is half-open (`stop` excluded, step
/// `(stop - start) / n`); with `endpoint = true` the last point is exactly
/// `stop` (step `(stop - start) / (n - 1)`).
pub fn linspace(start: f64, stop: f64, n: usize, endpoint: bool) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let div = (if endpoint { n - 1 } else { n }) as f64;
    let step = (stop - start) / div;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(start + step * i as f64);
    }
    if endpoint {
        out[n - 1] = stop;
    }
    out
}

/// Derive `[x_min, x_max]` from the decay rates and the tail threshold.
pub fn plot_domain(rates: &Rates, config: &DomainConfig) -> Result<PlotDomain, AppError> {
    let eps = config.eps;
    if !(eps.is_finite() && eps > 0.0 && eps < 1.0) {
        return Err(AppError::config(format!(
            "Invalid tail threshold eps={eps} (must be in (0, 1))."
        )));
    }
    if !(config.margin.is_finite() && config.margin > 0.0) {
        return Err(AppError::config(format!(
            "Invalid domain margin {} (must be finite and > 0).",
            config.margin
        )));
    }

    let depth = -eps.ln();
    let x_pos = depth / rates.a;
    let x_neg = depth / rates.b;

    Ok(PlotDomain {
        x_pos,
        x_neg,
        x_min: -x_neg * config.margin,
        x_max: x_pos * config.margin,
    })
}

/// Half-width of the densely sampled region around zero.
pub fn center_half_width(rates: &Rates, config: &SamplingConfig) -> f64 {
    config
        .center_half_min
        .max(config.center_half_scale / rates.min_rate())
}

/// Build the three-segment grid: `[x_min, -c)`, `[-c, c)`, `[c, x_max]`.
///
/// The concatenation is non-decreasing provided the center region fits inside
/// the domain; a center wider than the domain is rejected.
pub fn adaptive_grid(
    rates: &Rates,
    domain: &PlotDomain,
    config: &SamplingConfig,
) -> Result<SampleGrid, AppError> {
    if config.total_points() == 0 {
        return Err(AppError::config("Sampling needs at least one point."));
    }

    let center_half = center_half_width(rates, config);
    if -center_half < domain.x_min || center_half > domain.x_max {
        return Err(AppError::config(format!(
            "Center half-width {center_half:.4} exceeds the plotting domain [{:.4}, {:.4}]; \
             lower eps or the center half-width.",
            domain.x_min, domain.x_max
        )));
    }

    let mut x = Vec::with_capacity(config.total_points());
    x.extend(linspace(domain.x_min, -center_half, config.left_n, false));
    x.extend(linspace(-center_half, center_half, config.center_n, false));
    x.extend(linspace(center_half, domain.x_max, config.right_n, true));

    log::debug!(
        "sample grid: {} points over [{:.4}, {:.4}], center half-width {center_half:.4}",
        x.len(),
        domain.x_min,
        domain.x_max
    );

    Ok(SampleGrid { x, center_half })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linspace_half_open_excludes_stop() {
        let v = linspace(0.0, 1.0, 4, false);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn linspace_closed_includes_endpoints() {
        let v = linspace(0.1, 10.0, 5, true);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[4], 10.0);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0, true).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1, true), vec![2.0]);
        assert_eq!(linspace(2.0, 5.0, 1, false), vec![2.0]);
    }

    #[test]
    fn default_domain_extents() {
        let rates = Rates::default();
        let d = plot_domain(&rates, &DomainConfig::default()).unwrap();
        let depth = -(1e-8f64).ln();
        assert_relative_eq!(d.x_pos, depth / rates.a, epsilon = 1e-12);
        assert_relative_eq!(d.x_pos, 5.3953, epsilon = 1e-3);
        assert_relative_eq!(d.x_max, 5.6651, epsilon = 1e-3);
        assert_relative_eq!(d.x_min, -13.6767, epsilon = 1e-3);
    }

    #[test]
    fn smaller_eps_widens_domain() {
        let rates = Rates::default();
        let wide = plot_domain(
            &rates,
            &DomainConfig {
                eps: 1e-12,
                ..DomainConfig::default()
            },
        )
        .unwrap();
        let narrow = plot_domain(&rates, &DomainConfig::default()).unwrap();
        assert!(wide.x_max > narrow.x_max);
        assert!(wide.x_min < narrow.x_min);
    }

    #[test]
    fn rejects_bad_eps() {
        let rates = Rates::default();
        for eps in [0.0, 1.0, -1e-3, f64::NAN] {
            let cfg = DomainConfig {
                eps,
                ..DomainConfig::default()
            };
            assert!(plot_domain(&rates, &cfg).is_err(), "eps={eps}");
        }
    }

    #[test]
    fn default_grid_count_and_order() {
        let rates = Rates::default();
        let domain = plot_domain(&rates, &DomainConfig::default()).unwrap();
        let grid = adaptive_grid(&rates, &domain, &SamplingConfig::default()).unwrap();

        assert_eq!(grid.x.len(), 3400);
        assert_relative_eq!(grid.center_half, std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_eq!(grid.x[0], domain.x_min);
        assert_eq!(*grid.x.last().unwrap(), domain.x_max);
        assert!(grid.x.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn segment_boundaries_are_half_open() {
        let rates = Rates::default();
        let domain = plot_domain(&rates, &DomainConfig::default()).unwrap();
        let cfg = SamplingConfig::default();
        let grid = adaptive_grid(&rates, &domain, &cfg).unwrap();

        let c = grid.center_half;
        assert!(grid.x[cfg.left_n - 1] < -c);
        assert_eq!(grid.x[cfg.left_n], -c);
        assert!(grid.x[cfg.left_n + cfg.center_n - 1] < c);
        assert_eq!(grid.x[cfg.left_n + cfg.center_n], c);
    }

    #[test]
    fn center_half_has_floor() {
        let fast = Rates::new(10.0, 20.0).unwrap();
        assert_eq!(center_half_width(&fast, &SamplingConfig::default()), 0.8);
    }

    #[test]
    fn oversized_center_is_rejected() {
        let rates = Rates::default();
        let domain = PlotDomain {
            x_pos: 1.0,
            x_neg: 1.0,
            x_min: -1.0,
            x_max: 1.0,
        };
        assert!(adaptive_grid(&rates, &domain, &SamplingConfig::default()).is_err());
    }
}
