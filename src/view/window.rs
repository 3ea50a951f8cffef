//! Rolling-window slicing.
//!
//! Pure functions from `(Dataset, WindowState)` to the visible labels, the
//! visible true-line points and one forecast horizon per model. Every index is
//! clamped; nothing here can slice out of bounds.

use tracing::{debug, warn};

use crate::domain::{Dataset, ForecastModel, Point, SeriesStyle, WindowState};
use crate::view::dates::month_key_lossy;

/// Visible part of the label axis and true line.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSlice {
    /// Absolute index of `labels[0]`.
    pub start: usize,
    pub labels: Vec<String>,
    pub true_line: Vec<Point>,
}

/// One model's horizon for the current index.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlice {
    pub model_label: String,
    /// `None` when the model has no key at the current index.
    pub anchor_key: Option<String>,
    pub points: Vec<Point>,
    pub style: SeriesStyle,
}

/// First visible label for a window state.
///
/// `clamp(current_index - lead, 0, len - window_size)`; datasets shorter than
/// the window always start at 0.
pub fn window_start(len: usize, window: &WindowState) -> usize {
    let max_start = window.max_index(len);
    let lead = i64::try_from(window.lead).unwrap_or(i64::MAX);
    let wanted = window.current_index.saturating_sub(lead);
    wanted.clamp(0, max_start) as usize
}

/// Visible labels and true-line values.
///
/// Returns exactly `window_size` entries whenever the dataset has at least that
/// many labels, the whole dataset otherwise.
pub fn compute_window(dataset: &Dataset, window: &WindowState) -> WindowSlice {
    let start = window_start(dataset.len(), window);
    let end = start.saturating_add(window.window_size).min(dataset.len());

    let labels = dataset.labels[start..end].to_vec();
    let true_line = dataset.labels[start..end]
        .iter()
        .zip(&dataset.true_line.data[start..end])
        .enumerate()
        .map(|(i, (label, &value))| Point {
            index: start + i,
            label: label.clone(),
            value,
        })
        .collect();

    WindowSlice {
        start,
        labels,
        true_line,
    }
}

/// One forecast slice per model, in model order.
///
/// The anchor of a model is its `current_index`-th key in sorted order; its
/// horizon is laid onto the labels starting `horizon_offset` positions after
/// the anchor's label, and cut off at the end of the label axis. A model that
/// cannot produce a slice contributes an empty one.
pub fn compute_forecast_slice(
    dataset: &Dataset,
    window: &WindowState,
    horizon_offset: usize,
) -> Vec<ForecastSlice> {
    let index = window.current_index.max(0) as usize;
    dataset
        .models
        .iter()
        .map(|model| forecast_for_model(dataset, model, index, horizon_offset))
        .collect()
}

fn forecast_for_model(
    dataset: &Dataset,
    model: &ForecastModel,
    index: usize,
    horizon_offset: usize,
) -> ForecastSlice {
    let mut slice = ForecastSlice {
        model_label: model.label.clone(),
        anchor_key: None,
        points: Vec::new(),
        style: model.style.clone(),
    };

    let Some(anchor) = model.anchor_key(index) else {
        debug!(model = %model.label, index, keys = model.sorted_keys.len(), "no anchor key");
        return slice;
    };
    slice.anchor_key = Some(anchor.to_string());

    let Some(anchor_pos) = anchor_position(dataset, anchor) else {
        warn!(model = %model.label, anchor, "anchor date not found in labels");
        return slice;
    };

    let values = model.horizon_at(anchor).unwrap_or_default();
    let Some(first) = anchor_pos.checked_add(horizon_offset) else {
        debug!(model = %model.label, horizon_offset, "horizon starts past the label axis");
        return slice;
    };
    slice.points = values
        .iter()
        .enumerate()
        .map_while(|(i, &value)| {
            let idx = first.checked_add(i)?;
            dataset.labels.get(idx).map(|label| Point {
                index: idx,
                label: label.clone(),
                value,
            })
        })
        .collect();

    slice
}

/// Exact label match first, then the anchor's calendar month.
fn anchor_position(dataset: &Dataset, anchor: &str) -> Option<usize> {
    dataset
        .position_of(anchor)
        .or_else(|| dataset.position_of(&month_key_lossy(anchor)))
}
