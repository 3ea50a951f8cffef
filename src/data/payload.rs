//! Wire shapes of the backend endpoints.
//!
//! Required fields are `Option`s so a missing field becomes a precise
//! `MalformedPayload` message instead of a generic serde error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// `GET /get-data-forecasts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub labels: Option<Vec<String>>,
    pub true_line: Option<TrueLinePayload>,
    #[serde(default)]
    pub datasets: Vec<ModelPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrueLinePayload {
    #[serde(default)]
    pub label: String,
    pub data: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPayload {
    pub label: String,
    pub data: BTreeMap<String, Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// `GET /get-data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub datasets: Vec<SeriesEntryPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntryPayload {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl ForecastPayload {
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        serde_json::from_str(raw).map_err(|e| DataError::MalformedPayload(e.to_string()))
    }
}

impl SeriesPayload {
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        serde_json::from_str(raw).map_err(|e| DataError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_payload_reads_backend_shape() {
        let raw = r##"{
            "labels": ["2010-01", "2010-02"],
            "true_line": {"label": "True Line", "data": [0, 1]},
            "datasets": [
                {"label": "Model1", "data": {"2010-01-01": [0.0, 1.5]}, "borderColor": "#ff0000"}
            ]
        }"##;
        let payload = ForecastPayload::from_json(raw).unwrap();
        assert_eq!(payload.labels.as_deref().unwrap().len(), 2);
        assert_eq!(payload.true_line.as_ref().unwrap().data.as_deref(), Some(&[0.0, 1.0][..]));
        assert_eq!(payload.datasets[0].border_color.as_deref(), Some("#ff0000"));
        assert_eq!(payload.datasets[0].background_color, None);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let payload = ForecastPayload::from_json(r#"{"datasets": []}"#).unwrap();
        assert!(payload.labels.is_none());
        assert!(payload.true_line.is_none());
    }

    #[test]
    fn wrong_types_are_malformed() {
        let err = SeriesPayload::from_json(r#"{"labels": "2020-01"}"#).unwrap_err();
        assert!(matches!(err, DataError::MalformedPayload(_)));
    }
}
