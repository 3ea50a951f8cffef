//! Immutable source datasets built from fetched payloads.
//!
//! Loading validates the payload shape and copies everything into owned
//! domain values. After that the store only hands out shared references, so
//! slicing a window can never write back into the source.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::data::payload::{ForecastPayload, ModelPayload, SeriesPayload};
use crate::domain::{Dataset, ForecastModel, NamedSeries, SeriesDataset, SeriesStyle, TrueLine};
use crate::error::DataError;

/// Owner of the forecast page's [`Dataset`].
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    dataset: Dataset,
}

impl TimeSeriesStore {
    /// Validate and deep-copy a `/get-data-forecasts` payload.
    pub fn load(payload: &ForecastPayload) -> Result<Self, DataError> {
        let labels = payload
            .labels
            .as_ref()
            .ok_or_else(|| malformed("missing 'labels'"))?
            .clone();

        let true_line = payload
            .true_line
            .as_ref()
            .ok_or_else(|| malformed("missing 'true_line'"))?;
        let true_data = true_line
            .data
            .as_ref()
            .ok_or_else(|| malformed("missing 'true_line.data'"))?
            .clone();

        if true_data.len() != labels.len() {
            return Err(malformed(format!(
                "true line has {} values for {} labels",
                true_data.len(),
                labels.len()
            )));
        }

        let models = payload
            .datasets
            .iter()
            .map(load_model)
            .collect::<Result<Vec<_>, _>>()?;

        let dataset = Dataset {
            label_positions: label_positions(&labels),
            labels,
            true_line: TrueLine {
                label: true_line.label.clone(),
                data: true_data,
            },
            models,
        };

        info!(
            labels = dataset.labels.len(),
            models = dataset.models.len(),
            "loaded forecast dataset"
        );
        Ok(Self { dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

fn load_model(model: &ModelPayload) -> Result<ForecastModel, DataError> {
    let mut horizon: Option<usize> = None;
    for (key, values) in &model.data {
        match horizon {
            None => horizon = Some(values.len()),
            Some(h) if h != values.len() => {
                return Err(malformed(format!(
                    "model '{}' has horizon {} at '{key}' but {h} elsewhere",
                    model.label,
                    values.len()
                )));
            }
            Some(_) => {}
        }
    }

    if model.data.is_empty() {
        warn!(model = %model.label, "forecast model has no date keys");
    }

    // BTreeMap iteration is already lexicographic.
    let sorted_keys = model.data.keys().cloned().collect();

    Ok(ForecastModel {
        label: model.label.clone(),
        data: model.data.clone(),
        sorted_keys,
        horizon: horizon.unwrap_or(0),
        style: SeriesStyle {
            border_color: model.border_color.clone(),
            background_color: model.background_color.clone(),
        },
    })
}

/// Validate and copy a `/get-data` payload.
pub fn load_series(payload: &SeriesPayload) -> Result<SeriesDataset, DataError> {
    let labels = payload
        .labels
        .as_ref()
        .ok_or_else(|| malformed("missing 'labels'"))?
        .clone();

    let mut datasets = Vec::with_capacity(payload.datasets.len());
    for entry in &payload.datasets {
        if entry.data.len() != labels.len() {
            return Err(malformed(format!(
                "series '{}' has {} values for {} labels",
                entry.label,
                entry.data.len(),
                labels.len()
            )));
        }
        datasets.push(NamedSeries {
            label: entry.label.clone(),
            data: entry.data.clone(),
            style: SeriesStyle {
                border_color: entry.border_color.clone(),
                background_color: entry.background_color.clone(),
            },
        });
    }

    info!(
        labels = labels.len(),
        series = datasets.len(),
        "loaded series dataset"
    );
    Ok(SeriesDataset { labels, datasets })
}

fn label_positions(labels: &[String]) -> HashMap<String, usize> {
    let mut out = HashMap::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        out.entry(label.clone()).or_insert(idx);
    }
    out
}

fn malformed(message: impl Into<String>) -> DataError {
    DataError::MalformedPayload(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast_payload(value: serde_json::Value) -> ForecastPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn load_builds_dataset_with_sorted_keys() {
        let payload = forecast_payload(json!({
            "labels": ["2020-01", "2020-02", "2020-03"],
            "true_line": {"label": "True Line", "data": [1.0, 2.0, 3.0]},
            "datasets": [{
                "label": "Model1",
                "data": {"2020-02-01": [4.0, 5.0], "2020-01-01": [1.0, 2.0]},
                "borderColor": "rgb(255, 0, 0)"
            }]
        }));

        let store = TimeSeriesStore::load(&payload).unwrap();
        let ds = store.dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.true_line.label, "True Line");
        assert_eq!(ds.models[0].sorted_keys, vec!["2020-01-01", "2020-02-01"]);
        assert_eq!(ds.models[0].horizon, 2);
        assert_eq!(ds.models[0].style.border_color.as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(ds.position_of("2020-02"), Some(1));
        assert_eq!(ds.series_labels(), vec!["True Line", "Model1"]);
    }

    #[test]
    fn load_is_a_deep_copy() {
        let mut payload = forecast_payload(json!({
            "labels": ["2020-01"],
            "true_line": {"label": "True Line", "data": [1.0]},
            "datasets": []
        }));
        let store = TimeSeriesStore::load(&payload).unwrap();

        payload.labels.as_mut().unwrap()[0] = "changed".to_string();
        payload.true_line.as_mut().unwrap().data.as_mut().unwrap()[0] = 99.0;

        assert_eq!(store.dataset().labels, vec!["2020-01"]);
        assert_eq!(store.dataset().true_line.data, vec![1.0]);
    }

    #[test]
    fn missing_labels_or_true_line_is_malformed() {
        let no_labels = forecast_payload(json!({
            "true_line": {"label": "t", "data": []}
        }));
        assert_eq!(
            TimeSeriesStore::load(&no_labels).unwrap_err(),
            DataError::MalformedPayload("missing 'labels'".to_string())
        );

        let no_true_line = forecast_payload(json!({ "labels": [] }));
        assert_eq!(
            TimeSeriesStore::load(&no_true_line).unwrap_err(),
            DataError::MalformedPayload("missing 'true_line'".to_string())
        );

        let no_true_data = forecast_payload(json!({ "labels": [], "true_line": {"label": "t"} }));
        assert!(TimeSeriesStore::load(&no_true_data).is_err());
    }

    #[test]
    fn true_line_length_must_match_labels() {
        let payload = forecast_payload(json!({
            "labels": ["2020-01", "2020-02"],
            "true_line": {"label": "t", "data": [1.0]}
        }));
        assert!(matches!(
            TimeSeriesStore::load(&payload),
            Err(DataError::MalformedPayload(_))
        ));
    }

    #[test]
    fn inconsistent_horizons_are_malformed() {
        let payload = forecast_payload(json!({
            "labels": ["2020-01"],
            "true_line": {"label": "t", "data": [1.0]},
            "datasets": [{
                "label": "M",
                "data": {"2020-01-01": [1.0, 2.0, 3.0], "2020-02-01": [1.0]}
            }]
        }));
        let err = TimeSeriesStore::load(&payload).unwrap_err();
        assert!(err.to_string().contains("model 'M'"), "{err}");
    }

    #[test]
    fn duplicate_labels_resolve_to_first_position() {
        let payload = forecast_payload(json!({
            "labels": ["2020-01", "2020-01"],
            "true_line": {"label": "t", "data": [1.0, 2.0]}
        }));
        let store = TimeSeriesStore::load(&payload).unwrap();
        assert_eq!(store.dataset().position_of("2020-01"), Some(0));
    }

    #[test]
    fn load_series_checks_lengths() {
        let ok: SeriesPayload = serde_json::from_value(json!({
            "labels": ["2020-01", "2020-02"],
            "datasets": [{"label": "Price Index 1", "data": [100.0, 101.0]}]
        }))
        .unwrap();
        let ds = load_series(&ok).unwrap();
        assert_eq!(ds.series_labels(), vec!["Price Index 1"]);

        let bad: SeriesPayload = serde_json::from_value(json!({
            "labels": ["2020-01", "2020-02"],
            "datasets": [{"label": "Price Index 1", "data": [100.0]}]
        }))
        .unwrap();
        assert!(matches!(load_series(&bad), Err(DataError::MalformedPayload(_))));
    }
}
