//! Plotters-powered line chart widget for Ratatui.
//!
//! Series and bounds are computed outside the render call; `render()` only
//! draws. Plotters output goes into the Ratatui buffer through
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::SeriesStyle;
use crate::view::{AxisRange, ChartSeries};

/// High-contrast fallback colors, cycled by series position.
const PALETTE: [RGBColor; 8] = [
    RGBColor(255, 255, 255),
    RGBColor(0, 255, 255),
    RGBColor(255, 0, 255),
    RGBColor(255, 255, 0),
    RGBColor(0, 255, 0),
    RGBColor(255, 128, 0),
    RGBColor(128, 160, 255),
    RGBColor(255, 80, 80),
];

/// One line of the chart, already in chart coordinates.
pub struct PlotSeries {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

impl PlotSeries {
    /// `position` picks the fallback color when the series has no usable style.
    pub fn from_chart_series(series: &ChartSeries, position: usize) -> Self {
        Self {
            points: series.points.iter().map(|p| (p.index as f64, p.value)).collect(),
            color: series_color(&series.style, position),
        }
    }
}

/// A render-only multi-series line chart.
pub struct LinePlottersChart<'a> {
    pub series: &'a [PlotSeries],
    /// X bounds (absolute label positions).
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for LinePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
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
                .set_label_area_size(LabelAreaPosition::Left, 0)
                .set_label_area_size(LabelAreaPosition::Bottom, 0)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Tick labels are drawn by the caller; Plotters only draws axes.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .axis_style(&WHITE)
                .draw()?;

            for s in self.series {
                if s.points.len() == 1 {
                    // A lone point has no segment; show it as a dot.
                    chart.draw_series(s.points.iter().map(|&p| Pixel::new(p, s.color)))?;
                } else {
                    chart.draw_series(LineSeries::new(s.points.iter().copied(), &s.color))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// X bounds covering `labels` and every point drawn past them.
pub fn x_bounds(label_offset: usize, label_count: usize, series: &[PlotSeries]) -> [f64; 2] {
    let lo = label_offset as f64;
    let hi = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .fold((label_offset + label_count.saturating_sub(1)) as f64, f64::max);
    if hi > lo { [lo, hi] } else { [lo, lo + 1.0] }
}

pub fn y_bounds(axis: AxisRange) -> [f64; 2] {
    [axis.min, axis.max]
}

/// Border color from the series style, else a palette entry.
pub fn series_color(style: &SeriesStyle, position: usize) -> RGBColor {
    style
        .border_color
        .as_deref()
        .and_then(parse_css_color)
        .unwrap_or(PALETTE[position % PALETTE.len()])
}

pub fn to_tui_color(c: RGBColor) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Parse the CSS color forms the backend sends: `#rgb`, `#rrggbb`,
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` and a few names. Alpha is ignored.
pub fn parse_css_color(s: &str) -> Option<RGBColor> {
    let s = s.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        return match hex.len() {
            6 => Some(RGBColor(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => {
                let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(RGBColor(d(0)?, d(1)?, d(2)?))
            }
            _ => None,
        };
    }

    let args = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    if let Some(args) = args {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 4 {
            return None;
        }
        return Some(RGBColor(
            parts[0].parse().ok()?,
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
        ));
    }

    match s.as_str() {
        "black" => Some(RGBColor(0, 0, 0)),
        "white" => Some(RGBColor(255, 255, 255)),
        "red" => Some(RGBColor(255, 0, 0)),
        "green" => Some(RGBColor(0, 128, 0)),
        "blue" => Some(RGBColor(0, 0, 255)),
        "yellow" => Some(RGBColor(255, 255, 0)),
        "cyan" => Some(RGBColor(0, 255, 255)),
        "magenta" => Some(RGBColor(255, 0, 255)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        _ => None,
    }
}
