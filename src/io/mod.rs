//! Input/output helpers.
//!
//! - window exports (CSV) (`export`)

pub mod export;

pub use export::*;
