//! Windowed time-series view-model.
//!
//! - `store`: validated, immutable datasets
//! - `window`: rolling-window and forecast-anchor slicing
//! - `selection`: enabled-series set
//! - `chart` / `sync`: the chart-bound view and its in-place updates
//! - `range`: date-range filter of the plain-series page

pub mod chart;
pub mod dates;
pub mod range;
pub mod selection;
pub mod store;
pub mod sync;
pub mod window;

pub use chart::{AxisRange, ChartSeries, ChartView, LiveChart, SeriesChart};
pub use range::{RangeSelection, RangeView, filter_by_date_range, filter_by_labels};
pub use selection::{Labeled, SeriesSelector};
pub use store::{TimeSeriesStore, load_series};
pub use window::{ForecastSlice, WindowSlice, compute_forecast_slice, compute_window, window_start};
