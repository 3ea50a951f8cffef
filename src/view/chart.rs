//! Chart-bound representation and the owned live chart.
//!
//! Internally the forecast chart keeps the true line and the forecasts apart;
//! the flat positional series list (true line at 0) only exists at the
//! rendering boundary via [`ChartView::datasets`].

use tracing::debug;

use crate::domain::{Dataset, NamedSeries, Point, SeriesDataset, SeriesStyle};
use crate::view::window::{ForecastSlice, WindowSlice};

/// Number of y-axis steps between `min` and `max`.
const AXIS_STEPS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    /// Range over `values`, `[0, 1]` when there is nothing finite to show.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self::new(0.0, 1.0);
        }
        if max <= min {
            return Self::new(min - 0.5, max + 0.5);
        }
        Self::new(min, max)
    }

    /// Like [`AxisRange::from_values`] with the lower bound pinned at zero.
    pub fn from_zero(values: impl IntoIterator<Item = f64>) -> Self {
        let r = Self::from_values(values);
        let min = r.min.min(0.0);
        let max = if r.max > min { r.max } else { min + 1.0 };
        Self::new(min, max)
    }

    fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: (max - min) / AXIS_STEPS,
        }
    }
}

/// One rendered series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<Point>,
    pub style: SeriesStyle,
    pub visible: bool,
}

impl ChartSeries {
    pub fn from_forecast(slice: &ForecastSlice) -> Self {
        Self {
            label: slice.model_label.clone(),
            points: slice.points.clone(),
            style: slice.style.clone(),
            visible: true,
        }
    }

    fn from_named(series: &NamedSeries, labels: &[String], start: usize) -> Self {
        let points = labels
            .iter()
            .zip(&series.data)
            .enumerate()
            .map(|(i, (label, &value))| Point {
                index: start + i,
                label: label.clone(),
                value,
            })
            .collect();
        Self {
            label: series.label.clone(),
            points,
            style: series.style.clone(),
            visible: true,
        }
    }
}

/// The forecast page's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub labels: Vec<String>,
    /// Absolute index of `labels[0]`.
    pub label_offset: usize,
    pub true_line: ChartSeries,
    pub forecasts: Vec<ChartSeries>,
    pub y_axis: AxisRange,
}

impl ChartView {
    /// Initial view for a freshly loaded dataset.
    ///
    /// The y axis is fixed to the true line's full range so it stays put while
    /// the window moves.
    pub fn new(dataset: &Dataset, window: &WindowSlice, forecasts: &[ForecastSlice]) -> Self {
        Self {
            labels: window.labels.clone(),
            label_offset: window.start,
            true_line: ChartSeries {
                label: dataset.true_line.label.clone(),
                points: window.true_line.clone(),
                style: SeriesStyle::default(),
                visible: true,
            },
            forecasts: forecasts.iter().map(ChartSeries::from_forecast).collect(),
            y_axis: AxisRange::from_values(dataset.true_line.data.iter().copied()),
        }
    }

    /// Positional series list: true line first, then forecasts.
    pub fn datasets(&self) -> impl Iterator<Item = &ChartSeries> {
        std::iter::once(&self.true_line).chain(self.forecasts.iter())
    }

    pub fn dataset_count(&self) -> usize {
        1 + self.forecasts.len()
    }
}

/// Owned chart resource of the forecast page.
///
/// `sync` is the only way to change the view after creation; callers follow it
/// with `update()` to request a redraw.
#[derive(Debug)]
pub struct LiveChart {
    view: ChartView,
    revision: u64,
    dirty: bool,
}

impl LiveChart {
    pub fn create(view: ChartView) -> Self {
        debug!(series = view.dataset_count(), "chart created");
        Self {
            view,
            revision: 0,
            dirty: true,
        }
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }

    pub fn sync(&mut self, window: &WindowSlice, forecasts: &[ForecastSlice]) {
        crate::view::sync::sync(&mut self.view, window, forecasts);
    }

    pub fn set_true_line_visible(&mut self, visible: bool) {
        self.view.true_line.visible = visible;
    }

    /// Mark the chart for redraw.
    pub fn update(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn destroy(self) {
        debug!(revision = self.revision, "chart destroyed");
    }
}

/// The plain-series page's chart. Rebuilt from scratch on every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    pub labels: Vec<String>,
    pub label_offset: usize,
    pub datasets: Vec<ChartSeries>,
    pub y_axis: AxisRange,
}

impl SeriesChart {
    /// `data` is already filtered; `start` is the absolute index of its first label.
    pub fn new(data: &SeriesDataset, start: usize) -> Self {
        let datasets: Vec<ChartSeries> = data
            .datasets
            .iter()
            .map(|s| ChartSeries::from_named(s, &data.labels, start))
            .collect();
        let y_axis = AxisRange::from_zero(
            datasets
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.value)),
        );
        Self {
            labels: data.labels.clone(),
            label_offset: start,
            datasets,
            y_axis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_covers_values() {
        let r = AxisRange::from_values([3.0, -1.0, 9.0]);
        assert_eq!((r.min, r.max), (-1.0, 9.0));
        assert!((r.step - 2.0).abs() < 1e-12);
    }

    #[test]
    fn axis_range_degenerate_inputs() {
        let empty = AxisRange::from_values(std::iter::empty());
        assert_eq!((empty.min, empty.max), (0.0, 1.0));

        let flat = AxisRange::from_values([4.0, 4.0]);
        assert_eq!((flat.min, flat.max), (3.5, 4.5));

        let nan = AxisRange::from_values([f64::NAN]);
        assert_eq!((nan.min, nan.max), (0.0, 1.0));
    }

    #[test]
    fn axis_from_zero_begins_at_zero() {
        let r = AxisRange::from_zero([100.0, 120.0]);
        assert_eq!((r.min, r.max), (0.0, 120.0));

        let neg = AxisRange::from_zero([-5.0, 10.0]);
        assert_eq!((neg.min, neg.max), (-5.0, 10.0));
    }

    #[test]
    fn series_chart_points_carry_absolute_index() {
        let data = SeriesDataset {
            labels: vec!["2020-03".to_string(), "2020-04".to_string()],
            datasets: vec![NamedSeries {
                label: "Price Index 1".to_string(),
                data: vec![100.0, 110.0],
                style: SeriesStyle::default(),
            }],
        };
        let chart = SeriesChart::new(&data, 2);
        assert_eq!(chart.label_offset, 2);
        assert_eq!(chart.datasets[0].points[1].index, 3);
        assert_eq!(chart.datasets[0].points[1].label, "2020-04");
        assert_eq!((chart.y_axis.min, chart.y_axis.max), (0.0, 110.0));
    }

    #[test]
    fn live_chart_tracks_redraw_requests() {
        let view = ChartView {
            labels: Vec::new(),
            label_offset: 0,
            true_line: ChartSeries {
                label: "True Line".to_string(),
                points: Vec::new(),
                style: SeriesStyle::default(),
                visible: true,
            },
            forecasts: Vec::new(),
            y_axis: AxisRange::from_values([0.0, 1.0]),
        };
        let mut chart = LiveChart::create(view);
        assert!(chart.take_dirty());
        assert!(!chart.take_dirty());

        chart.update();
        assert_eq!(chart.revision(), 1);
        assert!(chart.take_dirty());
        assert_eq!(chart.view().dataset_count(), 1);
        chart.destroy();
    }
}
