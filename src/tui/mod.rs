//! Ratatui-based figure viewer.
//!
//! Shown after the files are written. Displays the solver outcome, the two
//! curves, and the export paths; `q` or `Esc` closes it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::io::ExportedFiles;
use crate::plot::register_fonts;
use crate::report::format_solution_line;

mod plotters_chart;

use plotters_chart::ReflectionChart;

/// Show the figure until the user quits.
pub fn show(run: &RunOutput, files: &ExportedFiles) -> Result<(), AppError> {
    register_fonts()?;
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::render(format!("Failed to initialize terminal: {e}")))?;

    let viewer = Viewer::new(run, files);
    viewer.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::render(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::render(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct Viewer<'a> {
    run: &'a RunOutput,
    files: &'a ExportedFiles,
    orig: Vec<(f64, f64)>,
    reflection: Vec<(f64, f64)>,
}

impl<'a> Viewer<'a> {
    fn new(run: &'a RunOutput, files: &'a ExportedFiles) -> Self {
        Self {
            run,
            files,
            orig: run.figure.samples.orig_points(),
            reflection: run.figure.samples.ref_points(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::render(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::render(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::render(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rates = &self.run.rates;
        let lines = vec![
            Line::from(vec![
                Span::styled("tail-reflect", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | a={:.5}, b={:.5}", rates.a, rates.b)),
            ]),
            Line::from(format_solution_line(&self.run.solution)),
        ];
        let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!(
            "{} (cyan) | Reflection f(-x) (orange)",
            self.run.figure.orig_label
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let widget = ReflectionChart {
            orig: &self.orig,
            reflection: &self.reflection,
            x_bounds: self.run.figure.x_bounds,
            y_bounds: self.run.figure.y_bounds,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let saved = format!(
            "saved {} and {}",
            self.files.png.display(),
            self.files.svg.display()
        );
        let line = Line::from(vec![
            Span::styled("q/Esc quit", Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(saved, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.1}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.2}")
}
