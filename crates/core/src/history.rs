//! Medical history shown for review before analysis.
//!
//! History comes from an external record store and is display-only. It is never passed to the
//! scorer.

use crate::constants::DEFAULT_HISTORY;
use serde::{Deserialize, Serialize};

/// One reviewed history line, e.g. `Allergies: Penicillin`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryFact {
    pub label: String,
    pub value: String,
}

impl HistoryFact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered history facts, as supplied by the record store.
pub type HistoryFacts = Vec<HistoryFact>;

/// Source of the patient's history facts.
pub trait RecordStore {
    fn history_facts(&self) -> HistoryFacts;
}

/// Record store backed by a fixed list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticRecordStore {
    facts: HistoryFacts,
}

impl StaticRecordStore {
    pub fn new(facts: HistoryFacts) -> Self {
        Self { facts }
    }

    /// The sample history the intake screen ships with.
    pub fn reference() -> Self {
        Self::new(
            DEFAULT_HISTORY
                .iter()
                .map(|(label, value)| HistoryFact::new(*label, *value))
                .collect(),
        )
    }
}

impl RecordStore for StaticRecordStore {
    fn history_facts(&self) -> HistoryFacts {
        self.facts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_store_keeps_order() {
        let facts = StaticRecordStore::reference().history_facts();
        let labels: Vec<&str> = facts.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Allergies", "Chronic Conditions", "Current Medications"]
        );
        assert_eq!(facts[2].value, "Metformin 500mg");
    }

    #[test]
    fn test_empty_store() {
        assert!(StaticRecordStore::default().history_facts().is_empty());
    }
}
