//! Date-key helpers.
//!
//! Forecast models key their horizons by day (`YYYY-MM-DD`) while the label
//! axis is monthly (`YYYY-MM`).

use chrono::NaiveDate;
use tracing::warn;

use crate::error::DataError;

/// `2020-02-01` -> `2020-02`.
pub fn month_key(date: &str) -> Result<String, DataError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| DataError::DateFormat(date.to_string()))?;
    Ok(month_label(parsed))
}

/// Like [`month_key`], but never fails.
///
/// A malformed key is logged and truncated to its first two `-` parts (or kept
/// whole when it has fewer).
pub fn month_key_lossy(date: &str) -> String {
    match month_key(date) {
        Ok(key) => key,
        Err(err) => {
            warn!(%err, "using best-effort month key");
            let mut parts = date.trim().splitn(3, '-');
            match (parts.next(), parts.next()) {
                (Some(year), Some(month)) => format!("{year}-{month}"),
                _ => date.trim().to_string(),
            }
        }
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_truncates_day() {
        assert_eq!(month_key("2020-02-01").unwrap(), "2020-02");
        assert_eq!(month_key(" 2026-12-01 ").unwrap(), "2026-12");
    }

    #[test]
    fn month_key_rejects_other_shapes() {
        assert_eq!(
            month_key("2020-02").unwrap_err(),
            DataError::DateFormat("2020-02".to_string())
        );
        assert!(month_key("2020-13-01").is_err());
        assert!(month_key("Feb 2020").is_err());
    }

    #[test]
    fn lossy_key_falls_back_to_truncation() {
        assert_eq!(month_key_lossy("2020-02-01"), "2020-02");
        assert_eq!(month_key_lossy("2020-02"), "2020-02");
        assert_eq!(month_key_lossy("2020-02-31"), "2020-02");
        assert_eq!(month_key_lossy("2020"), "2020");
    }

    #[test]
    fn month_label_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(month_label(d), "2021-03");
    }
}
