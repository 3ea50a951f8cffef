//! Text output for the one-shot commands.
//!
//! We keep formatting code in one place so output changes are localized
//! (and snapshot-testable).

use std::collections::BTreeMap;

use crate::domain::WindowState;
use crate::view::{ChartSeries, ChartView, SeriesChart};

const LABEL_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 12;

/// Header plus a label-by-series value table of the forecast window.
pub fn format_window_summary(view: &ChartView, window: &WindowState, total_labels: usize) -> String {
    let mut out = String::new();

    out.push_str("=== fdash - forecast window ===\n");
    let first = view.labels.first().map(String::as_str).unwrap_or("-");
    let last = view.labels.last().map(String::as_str).unwrap_or("-");
    out.push_str(&format!(
        "Window: {first} .. {last} | index {} of 0..={} | {} labels\n",
        window.current_index,
        window.max_index(total_labels),
        view.labels.len(),
    ));
    out.push_str(&format!(
        "Y axis: [{:.2}, {:.2}] step {:.2}\n",
        view.y_axis.min, view.y_axis.max, view.y_axis.step
    ));

    let series: Vec<&ChartSeries> = view.datasets().filter(|s| s.visible).collect();
    out.push('\n');
    out.push_str(&format_table(&view.labels, view.label_offset, &series));
    out
}

/// Value table of the plain-series chart.
pub fn format_series_table(chart: &SeriesChart) -> String {
    let series: Vec<&ChartSeries> = chart.datasets.iter().collect();
    format_table(&chart.labels, chart.label_offset, &series)
}

/// Rows cover the visible labels plus any forecast points past them.
fn format_table(labels: &[String], offset: usize, series: &[&ChartSeries]) -> String {
    let mut rows: BTreeMap<usize, &str> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (offset + i, l.as_str()))
        .collect();
    for s in series {
        for p in &s.points {
            rows.entry(p.index).or_insert(p.label.as_str());
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{:<w$}", "label", w = LABEL_WIDTH));
    for s in series {
        out.push_str(&format!(" {:>w$}", truncate(&s.label, VALUE_WIDTH), w = VALUE_WIDTH));
    }
    out.push('\n');

    for (idx, label) in rows {
        out.push_str(&format!("{label:<w$}", w = LABEL_WIDTH));
        for s in series {
            let cell = s
                .points
                .iter()
                .find(|p| p.index == idx)
                .map(|p| format!("{:.2}", p.value))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(" {cell:>w$}", w = VALUE_WIDTH));
        }
        out.push('\n');
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, SeriesStyle};
    use crate::view::AxisRange;

    fn series(label: &str, pts: &[(usize, &str, f64)]) -> ChartSeries {
        ChartSeries {
            label: label.to_string(),
            points: pts
                .iter()
                .map(|&(index, l, value)| Point {
                    index,
                    label: l.to_string(),
                    value,
                })
                .collect(),
            style: SeriesStyle::default(),
            visible: true,
        }
    }

    #[test]
    fn window_summary_snapshot() {
        let view = ChartView {
            labels: vec!["2020-02".to_string(), "2020-03".to_string()],
            label_offset: 1,
            true_line: series("True Line", &[(1, "2020-02", 1.0), (2, "2020-03", 2.0)]),
            forecasts: vec![series("Model1", &[(2, "2020-03", 2.5), (3, "2020-04", 3.5)])],
            y_axis: AxisRange::from_values([0.0, 5.0]),
        };
        let window = WindowState::new(2).at(1);

        let txt = format_window_summary(&view, &window, 4);
        let expected = concat!(
            "=== fdash - forecast window ===\n",
            "Window: 2020-02 .. 2020-03 | index 1 of 0..=2 | 2 labels\n",
            "Y axis: [0.00, 5.00] step 1.00\n",
            "\n",
            "label         True Line       Model1\n",
            "2020-02            1.00            -\n",
            "2020-03            2.00         2.50\n",
            "2020-04               -         3.50\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn hidden_true_line_is_left_out() {
        let mut true_line = series("True Line", &[(0, "2020-01", 1.0)]);
        true_line.visible = false;
        let view = ChartView {
            labels: vec!["2020-01".to_string()],
            label_offset: 0,
            true_line,
            forecasts: Vec::new(),
            y_axis: AxisRange::from_values([0.0, 1.0]),
        };
        let txt = format_window_summary(&view, &WindowState::new(1), 1);
        assert!(!txt.contains("True Line"));
    }

    #[test]
    fn long_series_names_are_truncated() {
        assert_eq!(truncate("Price Index 1 (monthly)", 12), "Price Index ");
        assert_eq!(truncate("short", 12), "short");
    }
}
