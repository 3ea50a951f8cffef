//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once from a fetched payload and then only read
//! - sliced into windows without touching the source
//! - flattened into chart series at the rendering boundary

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Two-year rolling window (monthly labels).
pub const DEFAULT_WINDOW_SIZE: usize = 24;

/// Forecast horizons start on the label right after the anchor month.
pub const DEFAULT_HORIZON_OFFSET: usize = 1;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Colors as sent by the backend (`#rrggbb`, `rgb(..)`, `rgba(..)`, named).
///
/// Kept as raw strings; the renderer decides how to map them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub border_color: Option<String>,
    pub background_color: Option<String>,
}

/// One chart point.
///
/// `index` is the absolute position of `label` in the dataset's label list, so
/// points can be placed on a numeric x axis regardless of the visible window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub index: usize,
    pub label: String,
    pub value: f64,
}

/// The observed/reference series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrueLine {
    pub label: String,
    pub data: Vec<f64>,
}

/// A forecast model: one horizon of values per date key.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastModel {
    pub label: String,
    pub data: BTreeMap<String, Vec<f64>>,
    /// Date keys sorted lexicographically, computed once at load.
    pub sorted_keys: Vec<String>,
    /// Length shared by every value sequence of this model.
    pub horizon: usize,
    pub style: SeriesStyle,
}

impl ForecastModel {
    /// The anchor key for a window index, if the model has that many keys.
    pub fn anchor_key(&self, index: usize) -> Option<&str> {
        self.sorted_keys.get(index).map(String::as_str)
    }

    pub fn horizon_at(&self, key: &str) -> Option<&[f64]> {
        self.data.get(key).map(Vec::as_slice)
    }
}

/// The immutable source dataset of the forecast page.
///
/// Invariant: `true_line.data.len() == labels.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub labels: Vec<String>,
    pub true_line: TrueLine,
    pub models: Vec<ForecastModel>,
    /// First position of every label in `labels`.
    pub(crate) label_positions: HashMap<String, usize>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label` in `labels` (first occurrence).
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.label_positions.get(label).copied()
    }

    /// Every series label present in the dataset, true line first.
    pub fn series_labels(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.models.len() + 1);
        out.push(self.true_line.label.clone());
        out.extend(self.models.iter().map(|m| m.label.clone()));
        out
    }
}

/// A plain (non-forecast) series of the `/get-data` page.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub style: SeriesStyle,
}

/// Dataset of the plain-series page.
///
/// Invariant: every `datasets[i].data.len() == labels.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDataset {
    pub labels: Vec<String>,
    pub datasets: Vec<NamedSeries>,
}

impl SeriesDataset {
    pub fn series_labels(&self) -> Vec<String> {
        self.datasets.iter().map(|d| d.label.clone()).collect()
    }
}

/// Rolling-window position.
///
/// `current_index` is signed so out-of-range requests can be expressed; every
/// consumer clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub current_index: i64,
    pub window_size: usize,
    /// Labels of history shown before the current index.
    pub lead: usize,
}

impl WindowState {
    pub fn new(window_size: usize) -> Self {
        Self {
            current_index: 0,
            window_size: window_size.max(1),
            lead: 0,
        }
    }

    pub fn with_lead(mut self, lead: usize) -> Self {
        self.lead = lead;
        self
    }

    pub fn at(mut self, current_index: i64) -> Self {
        self.current_index = current_index;
        self
    }

    /// Largest index the navigation control lets the user reach.
    pub fn max_index(&self, len: usize) -> i64 {
        len.saturating_sub(self.window_size) as i64
    }
}

/// Resolved runtime configuration for the dashboard.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub backend_url: String,
    pub window_size: usize,
    pub horizon_offset: usize,
    pub lead: usize,
    /// Read the forecast payload from this file instead of the backend.
    pub input: Option<PathBuf>,
    /// Read the plain-series payload from this file instead of the backend.
    pub series_input: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            horizon_offset: DEFAULT_HORIZON_OFFSET,
            lead: 0,
            input: None,
            series_input: None,
            log_file: PathBuf::from("fdash.log"),
        }
    }
}
