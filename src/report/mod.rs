//! Reporting utilities: text tables of the current chart.

pub mod format;

pub use format::{format_series_table, format_window_summary};
