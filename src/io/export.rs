//! Export the current forecast window to CSV.
//!
//! One row per point (`label,series,value`) so the file stays easy to pivot in
//! spreadsheets or downstream scripts. Hidden series are skipped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::view::ChartView;

/// Write the visible series of a window to a CSV file. Returns the row count.
pub fn write_window_csv(path: &Path, view: &ChartView) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::new(4, format!("Failed to create export dir '{}': {e}", parent.display()))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "label,series,value")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    let mut rows = 0usize;
    for series in view.datasets().filter(|s| s.visible) {
        for p in &series.points {
            writeln!(out, "{},{},{}", csv_field(&p.label), csv_field(&series.label), p.value)
                .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
            rows += 1;
        }
    }

    out.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(rows)
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, SeriesStyle};
    use crate::view::{AxisRange, ChartSeries};

    fn series(label: &str, visible: bool, pts: &[(usize, &str, f64)]) -> ChartSeries {
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
            visible,
        }
    }

    #[test]
    fn writes_visible_points_only() {
        let view = ChartView {
            labels: vec!["2020-01".to_string()],
            label_offset: 0,
            true_line: series("True Line", false, &[(0, "2020-01", 1.0)]),
            forecasts: vec![series("Model, v2", true, &[(1, "2020-02", 2.5)])],
            y_axis: AxisRange::from_values([0.0, 3.0]),
        };

        let dir = std::env::temp_dir().join(format!("fdash-export-{}", std::process::id()));
        let path = dir.join("window.csv");
        let rows = write_window_csv(&path, &view).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(rows, 1);
        assert_eq!(text, "label,series,value\n2020-02,\"Model, v2\",2.5\n");
    }

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(csv_field("Model1"), "Model1");
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
    }
}
