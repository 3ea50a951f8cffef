//! Where payloads come from: the backend, or local JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::data::client::BackendClient;
use crate::data::payload::{ForecastPayload, SeriesPayload};
use crate::domain::ViewConfig;
use crate::error::DataError;

pub enum DataSource {
    Backend(BackendClient),
    /// Offline mode. A page without a file has no data.
    Files {
        forecasts: Option<PathBuf>,
        series: Option<PathBuf>,
    },
}

impl DataSource {
    pub fn from_config(config: &ViewConfig) -> Self {
        if config.input.is_some() || config.series_input.is_some() {
            DataSource::Files {
                forecasts: config.input.clone(),
                series: config.series_input.clone(),
            }
        } else {
            DataSource::Backend(BackendClient::new(config.backend_url.clone()))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Backend(client) => client.base_url().to_string(),
            DataSource::Files { forecasts, series } => {
                let show = |p: &Option<PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "-".to_string())
                };
                format!("files: {} | {}", show(forecasts), show(series))
            }
        }
    }

    pub fn fetch_forecasts(&self) -> Result<ForecastPayload, DataError> {
        match self {
            DataSource::Backend(client) => client.fetch_forecasts(),
            DataSource::Files { forecasts, .. } => {
                let raw = read_input(forecasts.as_deref(), "--input")?;
                ForecastPayload::from_json(&raw)
            }
        }
    }

    pub fn fetch_series(&self) -> Result<SeriesPayload, DataError> {
        match self {
            DataSource::Backend(client) => client.fetch_series(),
            DataSource::Files { series, .. } => {
                let raw = read_input(series.as_deref(), "--series-input")?;
                SeriesPayload::from_json(&raw)
            }
        }
    }
}

fn read_input(path: Option<&Path>, flag: &str) -> Result<String, DataError> {
    let Some(path) = path else {
        return Err(DataError::Fetch(format!("no {flag} file given")));
    };
    fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to read input file");
        DataError::Fetch(format!("failed to read '{}': {e}", path.display()))
    })
}
