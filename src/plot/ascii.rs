//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks of a window without the TUI
//! - deterministic output (helpful for golden tests)
//!
//! Each series gets a point glyph (`o`, `*`, `+`, ...); segments between
//! consecutive points are drawn with `.`.

use crate::view::{AxisRange, ChartSeries, ChartView, SeriesChart};

const GLYPHS: [char; 8] = ['o', '*', '+', 'x', '%', '@', '&', '='];

/// Plot the visible series of a forecast window.
pub fn render_window_plot(view: &ChartView, width: usize, height: usize) -> String {
    let series: Vec<&ChartSeries> = view.datasets().filter(|s| s.visible).collect();
    render_plot(&view.labels, view.label_offset, &series, view.y_axis, width, height)
}

/// Plot a filtered plain-series chart.
pub fn render_series_plot(chart: &SeriesChart, width: usize, height: usize) -> String {
    let series: Vec<&ChartSeries> = chart.datasets.iter().collect();
    render_plot(&chart.labels, chart.label_offset, &series, chart.y_axis, width, height)
}

fn render_plot(
    labels: &[String],
    offset: usize,
    series: &[&ChartSeries],
    y_axis: AxisRange,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    // The x range covers the window and any forecast points past it.
    let x_min = offset;
    let x_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.index))
        .chain((offset + labels.len()).checked_sub(1))
        .max()
        .unwrap_or(offset);
    let last_label = series
        .iter()
        .flat_map(|s| s.points.iter())
        .filter(|p| p.index == x_max)
        .map(|p| p.label.as_str())
        .next()
        .or_else(|| labels.last().map(String::as_str))
        .unwrap_or("-");
    let first_label = labels.first().map(String::as_str).unwrap_or("-");

    let mut grid = vec![vec![' '; width]; height];

    // Segments first so point glyphs overlay them.
    for s in series {
        let mut prev = None;
        for p in &s.points {
            let x = map_x(p.index, x_min, x_max, width);
            let y = map_y(p.value, y_axis.min, y_axis.max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, '.');
            }
            prev = Some((x, y));
        }
    }
    for (k, s) in series.iter().enumerate() {
        let glyph = GLYPHS[k % GLYPHS.len()];
        for p in &s.points {
            let x = map_x(p.index, x_min, x_max, width);
            let y = map_y(p.value, y_axis.min, y_axis.max, height);
            grid[y][x] = glyph;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{first_label}, {last_label}] | y=[{:.2}, {:.2}]\n",
        y_axis.min, y_axis.max
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(k, s)| format!("{} {}", GLYPHS[k % GLYPHS.len()], s.label))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

fn map_x(idx: usize, x_min: usize, x_max: usize, width: usize) -> usize {
    if x_max <= x_min {
        return 0;
    }
    let u = ((idx.saturating_sub(x_min)) as f64 / (x_max - x_min) as f64).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let span = y_max - y_min;
    let u = if span > 0.0 && y.is_finite() {
        ((y - y_min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
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
