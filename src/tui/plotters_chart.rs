//! Plotters-powered chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`, so the terminal view shares its drawing model
//! with the exported figure.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::FONT_FAMILY;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct ReflectionChart<'a> {
    /// Original curve `f(x)`.
    pub orig: &'a [(f64, f64)],
    /// Mirror curve `f(-x)`.
    pub reflection: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for ReflectionChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("x")
                .y_desc("y")
                .x_labels(7)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style((FONT_FAMILY, 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let orig_color = RGBColor(0, 255, 255); // cyan
            let reflection_color = RGBColor(255, 165, 0); // orange
            let zero_color = RGBColor(0, 255, 0); // green

            chart.draw_series(LineSeries::new(
                [(0.0, y0), (0.0, y1)],
                &zero_color,
            ))?;
            chart.draw_series(LineSeries::new(
                self.reflection.iter().copied(),
                &reflection_color,
            ))?;
            chart.draw_series(LineSeries::new(self.orig.iter().copied(), &orig_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
