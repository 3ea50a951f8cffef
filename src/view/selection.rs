//! Which series are switched on.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::NamedSeries;
use crate::view::window::ForecastSlice;

/// Anything with a series label.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for ForecastSlice {
    fn label(&self) -> &str {
        &self.model_label
    }
}

impl Labeled for NamedSeries {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Enabled-label set over a fixed, ordered list of known labels.
///
/// Disabling a label hides its series; the data stays in the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSelector {
    known: Vec<String>,
    enabled: HashSet<String>,
}

impl SeriesSelector {
    /// Every known label starts enabled.
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        let mut known = Vec::new();
        for label in labels {
            if !known.contains(&label) {
                known.push(label);
            }
        }
        let enabled = known.iter().cloned().collect();
        Self { known, enabled }
    }

    /// Flip a label. Returns the new state; unknown labels are ignored.
    pub fn toggle(&mut self, label: &str) -> bool {
        if !self.known.iter().any(|k| k == label) {
            debug!(label, "toggle for unknown series ignored");
            return false;
        }
        if !self.enabled.remove(label) {
            self.enabled.insert(label.to_string());
        }
        self.is_enabled(label)
    }

    /// Toggle by position in the known list (checkbox row).
    pub fn toggle_nth(&mut self, n: usize) -> Option<(String, bool)> {
        let label = self.known.get(n)?.clone();
        let state = self.toggle(&label);
        Some((label, state))
    }

    pub fn is_enabled(&self, label: &str) -> bool {
        self.enabled.contains(label)
    }

    /// Keep only enabled entries, preserving order.
    pub fn filter<T: Labeled>(&self, series: Vec<T>) -> Vec<T> {
        series
            .into_iter()
            .filter(|s| self.is_enabled(s.label()))
            .collect()
    }

    /// `(label, enabled)` in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.known
            .iter()
            .map(|label| (label.as_str(), self.enabled.contains(label)))
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesStyle;

    fn series(label: &str) -> NamedSeries {
        NamedSeries {
            label: label.to_string(),
            data: vec![1.0],
            style: SeriesStyle::default(),
        }
    }

    fn selector() -> SeriesSelector {
        SeriesSelector::new(["True Line", "Model1", "Model2"].map(String::from))
    }

    #[test]
    fn everything_starts_enabled() {
        let sel = selector();
        assert_eq!(sel.len(), 3);
        assert!(sel.entries().all(|(_, on)| on));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = selector();
        assert!(!sel.toggle("Model1"));
        assert!(!sel.is_enabled("Model1"));
        assert!(sel.toggle("Model1"));
        assert!(sel.is_enabled("Model1"));
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let mut sel = selector();
        assert!(!sel.toggle("Model9"));
        assert!(!sel.is_enabled("Model9"));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn toggle_nth_follows_display_order() {
        let mut sel = selector();
        assert_eq!(sel.toggle_nth(2), Some(("Model2".to_string(), false)));
        assert_eq!(sel.toggle_nth(3), None);
        let entries: Vec<_> = sel.entries().collect();
        assert_eq!(
            entries,
            vec![("True Line", true), ("Model1", true), ("Model2", false)]
        );
    }

    #[test]
    fn filter_keeps_order_and_is_idempotent() {
        let mut sel = selector();
        sel.toggle("Model1");

        let input = vec![series("Model2"), series("Model1"), series("True Line")];
        let once = sel.filter(input);
        let labels: Vec<&str> = once.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Model2", "True Line"]);

        let twice = sel.filter(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn duplicate_labels_collapse() {
        let sel = SeriesSelector::new(["A", "A", "B"].map(String::from));
        assert_eq!(sel.len(), 2);
    }
}
