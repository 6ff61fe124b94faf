// src/report/model.rs
//! The report's current field values and the analysis-to-report mapping.

use super::catalog::{placeholder_token, PlaceholderPolicy, Slot, SlotCatalog};
use crate::analysis::types::AnalysisRecord;
use std::collections::BTreeMap;

/// Current value of every populated slot. Only `apply_record` and direct
/// `set` calls write here; rendering only reads.
#[derive(Debug, Clone, Default)]
pub struct ReportValues {
    values: BTreeMap<String, String>,
}

impl ReportValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Direct external edit of a single field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Map an analysis record onto the catalog's slots: a slot is updated iff
    /// the record carries a non-empty value for its key; everything else
    /// keeps its prior value. Keys outside the catalog are ignored. The final
    /// state is a pure function of (prior values, record, catalog).
    pub fn apply_record(&mut self, record: &AnalysisRecord, catalog: &SlotCatalog) {
        for slot in catalog.slots() {
            if let Some(value) = record.get(slot.key) {
                if !value.trim().is_empty() {
                    self.values.insert(slot.key.to_string(), value.to_string());
                }
            }
        }
    }

    /// Value shown for a slot at render time, with the slot's placeholder
    /// policy applied when the stored value is empty or absent.
    pub fn resolve(&self, slot: &Slot) -> String {
        match self.get(slot.key) {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => match slot.policy {
                PlaceholderPolicy::EmptyString => String::new(),
                PlaceholderPolicy::BracketedKeyName => placeholder_token(slot.key),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> AnalysisRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_apply_record_sets_known_keys() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.apply_record(&record(&[("full_name", "Jane Doe")]), &catalog);
        assert_eq!(values.get("full_name"), Some("Jane Doe"));
    }

    #[test]
    fn test_apply_record_preserves_untouched_slots() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane");

        values.apply_record(&record(&[("role_title", "CTO")]), &catalog);
        assert_eq!(values.get("full_name"), Some("Jane"));
        assert_eq!(values.get("role_title"), Some("CTO"));

        values.apply_record(&record(&[("full_name", "Jane Doe")]), &catalog);
        assert_eq!(values.get("full_name"), Some("Jane Doe"));
    }

    #[test]
    fn test_apply_record_skips_empty_and_unknown() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane");

        values.apply_record(
            &record(&[("full_name", "   "), ("not_a_slot", "ignored")]),
            &catalog,
        );
        assert_eq!(values.get("full_name"), Some("Jane"));
        assert_eq!(values.get("not_a_slot"), None);
    }

    #[test]
    fn test_resolve_applies_placeholder_policy() {
        let catalog = SlotCatalog::standard();
        let slot = catalog.get("full_name").unwrap();
        let mut values = ReportValues::new();

        assert_eq!(values.resolve(slot), "[[FULL_NAME]]");
        values.set("full_name", "Jane Doe");
        assert_eq!(values.resolve(slot), "Jane Doe");
    }
}
