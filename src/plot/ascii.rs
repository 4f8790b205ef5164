//! ASCII plotting for terminals we cannot take over.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - a quick visual sanity check when stdout is piped or not a TTY
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - original curve: `*`
//! - reflection: `.`
//! - vertical reference at `x = 0`: `|`

use crate::plot::Figure;

/// Render the figure on a `width x height` character grid.
pub fn render_ascii_plot(figure: &Figure, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let [x_min, x_max] = figure.x_bounds;
    let [y_min, y_max] = figure.y_bounds;

    let mut grid = vec![vec![' '; width]; height];

    // Curves first so the zero line only fills gaps.
    draw_curve(&mut grid, &figure.samples.orig_points(), figure, '*');
    draw_curve(&mut grid, &figure.samples.ref_points(), figure, '.');

    if x_min < 0.0 && x_max > 0.0 {
        let col = map_x(0.0, x_min, x_max, width);
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = '|';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}] | * {} | . reflection\n",
        figure.orig_label
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], points: &[(f64, f64)], figure: &Figure, ch: char) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();
    let [x_min, x_max] = figure.x_bounds;
    let [y_min, y_max] = figure.y_bounds;

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) if (c0, r0) != (col, row) => draw_line(grid, c0, r0, col, row, ch),
            Some(_) => {}
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Never overwrites existing marks.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
