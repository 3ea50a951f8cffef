//! Date-range and label filters for the plain-series page.

use crate::domain::{NamedSeries, SeriesDataset};
use crate::view::selection::SeriesSelector;

/// A filtered dataset plus the absolute index of its first label.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeView {
    pub start: usize,
    pub data: SeriesDataset,
}

/// Inclusive slice between two labels.
///
/// A missing bound means the dataset's edge; a bound that is not a label falls
/// back to that edge too. `start` after `finish` yields an empty range.
pub fn filter_by_date_range(data: &SeriesDataset, start: Option<&str>, finish: Option<&str>) -> RangeView {
    let len = data.labels.len();
    let find = |label: &str| data.labels.iter().position(|l| l == label);

    let start_idx = start.and_then(find).unwrap_or(0);
    let end_excl = finish.and_then(find).map(|i| i + 1).unwrap_or(len);

    if len == 0 || start_idx >= end_excl {
        return RangeView {
            start: start_idx.min(len),
            data: SeriesDataset {
                labels: Vec::new(),
                datasets: data
                    .datasets
                    .iter()
                    .map(|d| NamedSeries {
                        data: Vec::new(),
                        ..d.clone()
                    })
                    .collect(),
            },
        };
    }

    RangeView {
        start: start_idx,
        data: SeriesDataset {
            labels: data.labels[start_idx..end_excl].to_vec(),
            datasets: data
                .datasets
                .iter()
                .map(|d| NamedSeries {
                    label: d.label.clone(),
                    data: d
                        .data
                        .get(start_idx..end_excl.min(d.data.len()))
                        .map(<[f64]>::to_vec)
                        .unwrap_or_default(),
                    style: d.style.clone(),
                })
                .collect(),
        },
    }
}

/// Keep only series enabled in `selection`.
pub fn filter_by_labels(view: RangeView, selection: &SeriesSelector) -> RangeView {
    RangeView {
        start: view.start,
        data: SeriesDataset {
            labels: view.data.labels,
            datasets: selection.filter(view.data.datasets),
        },
    }
}

/// The two date selects.
///
/// Always `start_idx <= end_idx < len` for a non-empty label list; moving one
/// bound past the other drags the other along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    pub start_idx: usize,
    pub end_idx: usize,
    len: usize,
}

impl RangeSelection {
    /// Full range: first label to last label.
    pub fn new(len: usize) -> Self {
        Self {
            start_idx: 0,
            end_idx: len.saturating_sub(1),
            len,
        }
    }

    pub fn move_start(&mut self, delta: i64) {
        self.start_idx = self.step(self.start_idx, delta);
        if self.start_idx > self.end_idx {
            self.end_idx = self.start_idx;
        }
    }

    pub fn move_end(&mut self, delta: i64) {
        self.end_idx = self.step(self.end_idx, delta);
        if self.end_idx < self.start_idx {
            self.start_idx = self.end_idx;
        }
    }

    /// Labels for the selected bounds.
    pub fn bounds<'a>(&self, labels: &'a [String]) -> (Option<&'a str>, Option<&'a str>) {
        (
            labels.get(self.start_idx).map(String::as_str),
            labels.get(self.end_idx).map(String::as_str),
        )
    }

    fn step(&self, idx: usize, delta: i64) -> usize {
        let max = self.len.saturating_sub(1) as i64;
        (idx as i64).saturating_add(delta).clamp(0, max) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesStyle;

    fn data() -> SeriesDataset {
        SeriesDataset {
            labels: ["2020-01", "2020-02", "2020-03", "2020-04"].map(String::from).to_vec(),
            datasets: vec![
                NamedSeries {
                    label: "Price Index 1".to_string(),
                    data: vec![1.0, 2.0, 3.0, 4.0],
                    style: SeriesStyle::default(),
                },
                NamedSeries {
                    label: "Price Index 2".to_string(),
                    data: vec![10.0, 20.0, 30.0, 40.0],
                    style: SeriesStyle::default(),
                },
            ],
        }
    }

    #[test]
    fn range_is_inclusive() {
        let v = filter_by_date_range(&data(), Some("2020-02"), Some("2020-03"));
        assert_eq!(v.start, 1);
        assert_eq!(v.data.labels, vec!["2020-02", "2020-03"]);
        assert_eq!(v.data.datasets[1].data, vec![20.0, 30.0]);
    }

    #[test]
    fn missing_or_unknown_bounds_use_edges() {
        let full = filter_by_date_range(&data(), None, None);
        assert_eq!(full.data, data());

        let unknown = filter_by_date_range(&data(), Some("1999-01"), Some("2099-01"));
        assert_eq!(unknown.data, data());

        let tail = filter_by_date_range(&data(), Some("2020-03"), None);
        assert_eq!(tail.data.labels, vec!["2020-03", "2020-04"]);
    }

    #[test]
    fn reversed_bounds_are_empty() {
        let v = filter_by_date_range(&data(), Some("2020-04"), Some("2020-02"));
        assert!(v.data.labels.is_empty());
        assert_eq!(v.data.datasets.len(), 2);
        assert!(v.data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn label_filter_uses_selection() {
        let mut sel = SeriesSelector::new(data().series_labels());
        sel.toggle("Price Index 1");
        let v = filter_by_labels(filter_by_date_range(&data(), None, None), &sel);
        assert_eq!(v.data.series_labels(), vec!["Price Index 2"]);
        assert_eq!(v.data.labels.len(), 4);
    }

    #[test]
    fn selection_defaults_to_full_range_and_keeps_order() {
        let mut r = RangeSelection::new(4);
        assert_eq!((r.start_idx, r.end_idx), (0, 3));

        r.move_start(3);
        assert_eq!((r.start_idx, r.end_idx), (3, 3));

        r.move_end(-2);
        assert_eq!((r.start_idx, r.end_idx), (1, 1));

        r.move_end(10);
        assert_eq!(r.end_idx, 3);
        r.move_start(-10);
        assert_eq!(r.start_idx, 0);

        let labels = data().labels;
        assert_eq!(r.bounds(&labels), (Some("2020-01"), Some("2020-04")));
    }

    #[test]
    fn empty_selection_has_no_bounds() {
        let mut r = RangeSelection::new(0);
        r.move_end(1);
        assert_eq!((r.start_idx, r.end_idx), (0, 0));
        assert_eq!(r.bounds(&[]), (None, None));
    }
}
