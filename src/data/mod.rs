//! Fetch boundary: backend client, wire payloads, offline file source.

pub mod client;
pub mod payload;
pub mod source;

pub use client::BackendClient;
pub use payload::{ForecastPayload, ModelPayload, SeriesEntryPayload, SeriesPayload, TrueLinePayload};
pub use source::DataSource;
