//! Plotters rendering of the exported figure.
//!
//! A [`Figure`] is a render-only description: curves, bounds, and labels are
//! all computed up front, and [`draw_figure`] only draws. The same drawing
//! code targets the in-memory bitmap (PNG export) and the SVG string backend.
//!
//! Both outputs carry the full layout (caption, axis labels, tick labels,
//! legend). Text uses the bundled font from [`crate::plot::fonts`].

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::domain::{PlotConfig, PlotDomain};
use crate::error::AppError;
use crate::fit::Solution;
use crate::models::CurveSamples;
use crate::plot::fonts::{FONT_FAMILY, register_fonts};

pub const TITLE: &str = "Optimized plot: original curve and its reflection";
pub const REFLECTION_LABEL: &str = "Reflection f(-x)";

/// Fraction of `y_max` shown below zero.
const Y_FLOOR_FRAC: f64 = 0.02;
/// Headroom above `y_max`.
const Y_HEAD_FRAC: f64 = 1.05;

// Matplotlib default color cycle.
const ORIG_COLOR: RGBColor = RGBColor(31, 119, 180);
const REF_COLOR: RGBColor = RGBColor(255, 127, 14);
const ZERO_COLOR: RGBColor = RGBColor(44, 160, 44);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

/// Legend label for the original curve, carrying the solved parameters.
pub fn legend_label(solution: &Solution) -> String {
    format!(
        "Original f(x), p={:.5}, q={:.5}",
        solution.p(),
        solution.q()
    )
}

/// Everything needed to draw the figure.
#[derive(Debug, Clone)]
pub struct Figure {
    pub samples: CurveSamples,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub orig_label: String,
}

impl Figure {
    /// Assemble the figure; axis limits follow the domain and the curve peak.
    pub fn new(
        samples: CurveSamples,
        domain: &PlotDomain,
        solution: &Solution,
    ) -> Result<Self, AppError> {
        let y_max = samples
            .y_max()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| AppError::render("No finite curve values to plot."))?;

        let x_bounds = [domain.x_min, domain.x_max];
        if !(x_bounds[0].is_finite() && x_bounds[1].is_finite()) || x_bounds[1] <= x_bounds[0] {
            return Err(AppError::render(format!(
                "Degenerate x-range [{}, {}].",
                x_bounds[0], x_bounds[1]
            )));
        }

        Ok(Self {
            samples,
            x_bounds,
            y_bounds: [-Y_FLOOR_FRAC * y_max, Y_HEAD_FRAC * y_max],
            orig_label: legend_label(solution),
        })
    }
}

/// Backend-dependent sizing, in pixels of the target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
    /// Draw caption, axis labels, tick labels, and legend.
    pub text: bool,
    pub line_px: u32,
    pub axis_px: u32,
    pub dash_px: u32,
    pub font_px: f64,
    pub margin_px: u32,
}

impl FigureStyle {
    /// Scale point-based sizes to the given resolution.
    pub fn for_dpi(config: &PlotConfig, dpi: u32, text: bool) -> Self {
        Self {
            text,
            line_px: config.pt_to_px(config.line_width_pt, dpi),
            axis_px: config.pt_to_px(0.8, dpi),
            dash_px: config.pt_to_px(6.0, dpi),
            font_px: 10.0 * f64::from(dpi) / 72.0,
            margin_px: config.pt_to_px(12.0, dpi),
        }
    }
}

/// Draw the figure onto any Plotters drawing area and present it.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &FigureStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let [x0, x1] = figure.x_bounds;
    let [y0, y1] = figure.y_bounds;

    let mut builder = ChartBuilder::on(root);
    builder.margin(style.margin_px);
    if style.text {
        let label_px = (style.font_px * 3.0).round() as u32;
        builder
            .caption(TITLE, (FONT_FAMILY, style.font_px * 1.3))
            .x_label_area_size(label_px)
            .y_label_area_size(label_px);
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(GRID_COLOR.stroke_width(1))
        .light_line_style(WHITE.stroke_width(0));
    if style.text {
        mesh.x_desc("x")
            .y_desc("y")
            .label_style((FONT_FAMILY, style.font_px));
    }
    mesh.draw()?;

    let line_px = style.line_px;
    chart
        .draw_series(LineSeries::new(
            figure.samples.orig_points(),
            ORIG_COLOR.stroke_width(line_px),
        ))?
        .label(figure.orig_label.clone())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], ORIG_COLOR.stroke_width(line_px))
        });

    chart
        .draw_series(DashedLineSeries::new(
            figure.samples.ref_points(),
            style.dash_px,
            style.dash_px / 2 + 1,
            REF_COLOR.stroke_width(line_px),
        ))?
        .label(REFLECTION_LABEL)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], REF_COLOR.stroke_width(line_px))
        });

    chart.draw_series(LineSeries::new(
        vec![(0.0, y0), (0.0, y1)],
        ZERO_COLOR.stroke_width(style.axis_px),
    ))?;

    if style.text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, style.font_px))
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()
}

/// Render the figure into a packed RGB buffer (`width * height * 3` bytes).
///
/// The drawing area borrows the buffer; it is presented and dropped before
/// the buffer is returned.
pub fn render_rgb(figure: &Figure, config: &PlotConfig) -> Result<(Vec<u8>, (u32, u32)), AppError> {
    register_fonts()?;
    let (w, h) = config.checked_pixel_size(config.dpi)?;
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        let style = FigureStyle::for_dpi(config, config.dpi, true);
        draw_figure(&root, figure, &style)
            .map_err(|e| AppError::render(format!("Failed to draw raster figure: {e}")))?;
    }
    Ok((buf, (w, h)))
}

/// Render the figure as an SVG document.
pub fn render_svg(figure: &Figure, config: &PlotConfig) -> Result<String, AppError> {
    register_fonts()?;
    let size = config.checked_pixel_size(config.svg_dpi)?;
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        let style = FigureStyle::for_dpi(config, config.svg_dpi, true);
        draw_figure(&root, figure, &style)
            .map_err(|e| AppError::render(format!("Failed to draw SVG figure: {e}")))?;
    }
    Ok(out)
}
