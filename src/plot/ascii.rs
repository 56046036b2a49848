//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks over SSH or in CI logs
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - mean latency line: `*`
//! - p95 latency line: `+`
//!
//! Lines are drawn in order, so where they cross the first one wins.

use crate::chart::{ChartSpec, LineSpec};
use crate::domain::Metric;

/// Render `spec` into a `width` x `height` character grid with a header line.
pub fn render_ascii_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let [x_min, x_max] = spec.x_bounds;
    let [y_min, y_max] = spec.y_bounds;

    let mut grid = vec![vec![' '; width]; height];
    for line in &spec.lines {
        draw_series(&mut grid, line, spec.x_bounds, spec.y_bounds);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} | x=[{x_min:.0}, {x_max:.0}] | y=[{y_min:.2}, {y_max:.2}]\n",
        spec.title
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&legend(spec));
    out
}

fn legend(spec: &ChartSpec) -> String {
    let entries: Vec<String> = spec
        .lines
        .iter()
        .map(|l| format!("{} {}", glyph(l.metric), l.label))
        .collect();
    format!("x: {} | y: {} | {}\n", spec.x_label, spec.y_label, entries.join(", "))
}

fn glyph(metric: Metric) -> char {
    match metric {
        Metric::Mean => '*',
        Metric::P95 => '+',
    }
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

fn draw_series(grid: &mut [Vec<char>], line: &LineSpec, x_bounds: [f64; 2], y_bounds: [f64; 2]) {
    let height = grid.len();
    let width = grid[0].len();
    let ch = glyph(line.metric);

    let mut prev = None;
    for &(x, y) in &line.points {
        let col = map_x(x, x_bounds[0], x_bounds[1], width);
        let row = map_y(y, y_bounds[0], y_bounds[1], height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only writes into empty cells.
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
