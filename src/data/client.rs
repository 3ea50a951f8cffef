//! HTTP client for the forecast backend.
//!
//! One blocking GET per load. No retry, no cancellation: a failed request is
//! reported to the caller, which logs it and keeps its previous state.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::data::payload::{ForecastPayload, SeriesPayload};
use crate::error::DataError;

const SERIES_PATH: &str = "/get-data";
const FORECASTS_PATH: &str = "/get-data-forecasts";

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_forecasts(&self) -> Result<ForecastPayload, DataError> {
        self.get_json(FORECASTS_PATH)
    }

    pub fn fetch_series(&self) -> Result<SeriesPayload, DataError> {
        self.get_json(SERIES_PATH)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataError> {
        let url = endpoint_url(&self.base_url, path);
        debug!(%url, "fetching");

        let resp = self.client.get(&url).send().map_err(|e| {
            error!(%url, error = %e, "request failed");
            DataError::Fetch(format!("request to {url} failed: {e}"))
        })?;

        if !resp.status().is_success() {
            error!(%url, status = %resp.status(), "non-success status");
            return Err(DataError::Fetch(format!(
                "request to {url} failed with status {}",
                resp.status()
            )));
        }

        resp.json::<T>().map_err(|e| {
            error!(%url, error = %e, "failed to parse response");
            DataError::MalformedPayload(format!("failed to parse response from {url}: {e}"))
        })
    }
}

fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
