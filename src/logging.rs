//! Tracing subscriber setup.
//!
//! The interactive TUI owns the terminal, so it logs to a file; one-shot
//! commands log to stderr. Filtering comes from `FDASH_LOG` (same syntax as
//! `RUST_LOG`).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

const FILTER_ENV: &str = "FDASH_LOG";
const DEFAULT_FILTER: &str = "forecast_dash=info";

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

pub fn init(target: LogTarget<'_>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(4, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };

    result.map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}
