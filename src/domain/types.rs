//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the solver, sampler, and renderer
//! - exported to the JSON run summary
//! - constructed directly in tests without going through the CLI

use std::path::PathBuf;

use nalgebra::Vector2;
use serde::Serialize;

use crate::error::AppError;

/// Pair of positive exponential decay rates.
///
/// `a` governs the right tail (`exp(-a x)` for `x > 0`) and `b` the left tail
/// (`exp(b x)` for `x <= 0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rates {
    pub a: f64,
    pub b: f64,
}

impl Rates {
    /// Build a validated pair of rates.
    ///
    /// The numeric routines never check their inputs; validation happens once,
    /// here, at the configuration boundary.
    pub fn new(a: f64, b: f64) -> Result<Self, AppError> {
        if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
            return Err(AppError::config(format!(
                "Invalid decay rates: a={a}, b={b} (both must be finite and > 0)."
            )));
        }
        Ok(Self { a, b })
    }

    /// The slower of the two decay rates.
    pub fn min_rate(&self) -> f64 {
        self.a.min(self.b)
    }
}

impl Default for Rates {
    /// `a = 2 + sqrt(2)`, `b = a - 2`.
    fn default() -> Self {
        let a = 2.0 + std::f64::consts::SQRT_2;
        Self { a, b: a - 2.0 }
    }
}

/// Iteration controls for the Gauss-Newton solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverConfig {
    pub max_iter: usize,
    /// Absolute tolerance on the cost.
    pub tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tol: 1e-16,
        }
    }
}

/// Starting point for the solver: `theta0 = (-2, 3)`.
pub const DEFAULT_THETA0: [f64; 2] = [-2.0, 3.0];

/// Controls for deriving the plotting domain from the tail decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainConfig {
    /// Tail value considered negligible. Smaller values widen the domain.
    pub eps: f64,
    /// Multiplicative margin applied beyond each tail extent.
    pub margin: f64,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            eps: 1e-8,
            margin: 1.05,
        }
    }
}

/// Plotting bounds derived from the decay rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotDomain {
    /// Distance where `exp(-a x)` reaches `eps` (right tail).
    pub x_pos: f64,
    /// Distance where `exp(b x)` reaches `eps` (left tail).
    pub x_neg: f64,
    pub x_min: f64,
    pub x_max: f64,
}

/// Point budget for the three-segment adaptive grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingConfig {
    /// Lower bound on the dense center half-width.
    pub center_half_min: f64,
    /// The center half-width is at least `center_half_scale / min(a, b)`.
    pub center_half_scale: f64,
    pub left_n: usize,
    pub center_n: usize,
    pub right_n: usize,
}

impl SamplingConfig {
    pub fn total_points(&self) -> usize {
        self.left_n + self.center_n + self.right_n
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            center_half_min: 0.8,
            center_half_scale: 2.0,
            left_n: 600,
            center_n: 2200,
            right_n: 600,
        }
    }
}

/// Ascending sample positions covering `[x_min, x_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    pub x: Vec<f64>,
    pub center_half: f64,
}

/// Upper bound on rendered canvas size (about 300 MB of RGB).
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Figure geometry and output location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotConfig {
    pub width_in: f64,
    pub height_in: f64,
    /// Raster resolution, also written into the PNG metadata.
    pub dpi: u32,
    /// Resolution used to size the SVG canvas.
    pub svg_dpi: u32,
    /// Curve stroke width in points (1/72 inch).
    pub line_width_pt: f64,
    pub out_dir: PathBuf,
    /// File stem shared by the PNG and SVG outputs.
    pub base_name: String,
}

impl PlotConfig {
    /// Canvas size in pixels at the given resolution.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let w = (self.width_in * f64::from(dpi)).round().max(1.0) as u32;
        let h = (self.height_in * f64::from(dpi)).round().max(1.0) as u32;
        (w, h)
    }

    /// Like [`pixel_size`](Self::pixel_size), but rejects canvases above
    /// `MAX_CANVAS_PIXELS` (the raster buffer is allocated up front).
    pub fn checked_pixel_size(&self, dpi: u32) -> Result<(u32, u32), AppError> {
        if dpi == 0 || !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(AppError::config(format!(
                "Figure size {}x{} in at {dpi} dpi must be positive.",
                self.width_in, self.height_in
            )));
        }
        let w = (self.width_in * f64::from(dpi)).round();
        let h = (self.height_in * f64::from(dpi)).round();
        if !(w * h <= MAX_CANVAS_PIXELS as f64) {
            return Err(AppError::config(format!(
                "Figure of {}x{} in at {dpi} dpi exceeds {MAX_CANVAS_PIXELS} pixels; lower --dpi.",
                self.width_in, self.height_in
            )));
        }
        Ok(self.pixel_size(dpi))
    }

    /// Convert a length in points to pixels at the given resolution.
    pub fn pt_to_px(&self, pt: f64, dpi: u32) -> u32 {
        (pt * f64::from(dpi) / 72.0).round().max(1.0) as u32
    }

    pub fn png_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.png", self.base_name))
    }

    pub fn svg_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.svg", self.base_name))
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 5.0,
            dpi: 300,
            svg_dpi: 100,
            line_width_pt: 1.6,
            out_dir: PathBuf::from("../figs"),
            base_name: "figure_new".to_string(),
        }
    }
}

/// Everything a single run needs. No hidden global state: the binary builds
/// one of these from the CLI and hands it to `app::pipeline::run_experiment`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub rates: Rates,
    pub theta0: Vector2<f64>,
    pub solver: SolverConfig,
    pub domain: DomainConfig,
    pub sampling: SamplingConfig,
    pub plot: PlotConfig,
    /// Optional JSON run summary destination.
    pub export_json: Option<PathBuf>,
    /// Show the figure interactively after export.
    pub show: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rates: Rates::default(),
            theta0: Vector2::from(DEFAULT_THETA0),
            solver: SolverConfig::default(),
            domain: DomainConfig::default(),
            sampling: SamplingConfig::default(),
            plot: PlotConfig::default(),
            export_json: None,
            show: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates_match_closed_form() {
        let r = Rates::default();
        assert!((r.a - 3.414_213_562_373_095).abs() < 1e-12);
        assert!((r.b - 1.414_213_562_373_095).abs() < 1e-12);
        assert_eq!(r.min_rate(), r.b);
    }

    #[test]
    fn rates_reject_non_positive() {
        assert!(Rates::new(1.0, 0.0).is_err());
        assert!(Rates::new(-1.0, 2.0).is_err());
        assert!(Rates::new(f64::NAN, 2.0).is_err());
        assert!(Rates::new(0.5, 2.0).is_ok());
    }

    #[test]
    fn plot_config_sizes_and_paths() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.pixel_size(300), (3600, 1500));
        assert_eq!(cfg.pixel_size(100), (1200, 500));
        // 1.6pt at 300 dpi ≈ 6.67px.
        assert_eq!(cfg.pt_to_px(1.6, 300), 7);
        assert!(cfg.png_path().ends_with("figure_new.png"));
        assert!(cfg.svg_path().ends_with("figure_new.svg"));
    }

    #[test]
    fn oversized_canvas_is_a_config_error() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.checked_pixel_size(300).unwrap(), (3600, 1500));
        // 12x5 in at 100000 dpi would need ~1.8 TB of RGB.
        let err = cfg.checked_pixel_size(100_000).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(cfg.checked_pixel_size(0).is_err());
    }

    #[test]
    fn default_sampling_budget() {
        assert_eq!(SamplingConfig::default().total_points(), 3400);
    }
}
