//! Plotting helpers for terminal output.

pub mod ascii;

pub use ascii::{render_series_plot, render_window_plot};
