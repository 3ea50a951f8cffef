//! In-place reconciliation of a [`ChartView`] with a new window.
//!
//! Point buffers of series that survive a sync are overwritten element by
//! element instead of being replaced, so the renderer keeps the same buffers
//! across frames.

use crate::domain::Point;
use crate::view::chart::{ChartSeries, ChartView};
use crate::view::window::{ForecastSlice, WindowSlice};

/// Bring `view` in line with `window` and `forecasts`.
///
/// Afterwards the view holds one true line followed by exactly
/// `forecasts.len()` forecast series.
pub fn sync(view: &mut ChartView, window: &WindowSlice, forecasts: &[ForecastSlice]) {
    view.labels = window.labels.clone();
    view.label_offset = window.start;

    update_points_in_place(&mut view.true_line.points, &window.true_line);
    update_forecasts_in_place(&mut view.forecasts, forecasts);
}

/// Resize `old` to `new.len()` and overwrite it positionally.
pub fn update_points_in_place(old: &mut Vec<Point>, new: &[Point]) {
    old.truncate(new.len());
    for (dst, src) in old.iter_mut().zip(new) {
        dst.clone_from(src);
    }
    let kept = old.len();
    old.extend_from_slice(&new[kept..]);
}

/// Overwrite shared positions, append new ones, drop the rest.
pub fn update_forecasts_in_place(old: &mut Vec<ChartSeries>, new: &[ForecastSlice]) {
    old.truncate(new.len());
    for (dst, src) in old.iter_mut().zip(new) {
        // A toggle can move a different model into this position.
        if dst.label != src.model_label {
            dst.label.clone_from(&src.model_label);
        }
        if dst.style != src.style {
            dst.style.clone_from(&src.style);
        }
        update_points_in_place(&mut dst.points, &src.points);
    }
    let kept = old.len();
    old.extend(new[kept..].iter().map(ChartSeries::from_forecast));
}
