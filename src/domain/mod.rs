//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the loaded datasets (`Dataset`, `SeriesDataset`) and their parts
//! - chart points and styles (`Point`, `SeriesStyle`)
//! - window position and runtime configuration (`WindowState`, `ViewConfig`)

pub mod types;

pub use types::*;
