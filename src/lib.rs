//! `forecast-dash` library crate.
//!
//! The binary (`fdash`) is a thin wrapper around this library so that:
//!
//! - the windowing and chart-sync logic is testable without a terminal
//! - the TUI and the one-shot commands share one [`app::state::AppState`]
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
pub mod view;
