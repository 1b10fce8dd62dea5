//! Symptom catalog and search filter.
//!
//! The catalog is a fixed, ordered list of known symptom labels. Catalog order is display order
//! and never changes during a session. Filtering is a case-insensitive substring match that
//! keeps that order.

use crate::constants::DEFAULT_CATALOG;
use crate::error::{IntakeError, IntakeResult};
use intake_types::SymptomLabel;
use std::collections::HashSet;

/// Ordered list of every symptom a patient can select.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomCatalog {
    labels: Vec<SymptomLabel>,
}

impl SymptomCatalog {
    /// Create a catalog from labels in display order.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidConfig` if `labels` is empty or if two labels differ only
    /// by case, since lookups would then be ambiguous.
    pub fn new(labels: Vec<SymptomLabel>) -> IntakeResult<Self> {
        if labels.is_empty() {
            return Err(IntakeError::InvalidConfig(
                "symptom catalog cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str().to_lowercase()) {
                return Err(IntakeError::InvalidConfig(format!(
                    "symptom catalog lists '{}' more than once",
                    label
                )));
            }
        }

        Ok(Self { labels })
    }

    /// The built-in ten-symptom catalog.
    pub fn reference() -> Self {
        Self {
            labels: DEFAULT_CATALOG
                .iter()
                .filter_map(|s| SymptomLabel::new(s).ok())
                .collect(),
        }
    }

    pub fn labels(&self) -> &[SymptomLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &SymptomLabel) -> bool {
        self.labels.contains(label)
    }

    /// Resolve raw user input to the catalog's own label, ignoring case and surrounding
    /// whitespace. Returns `None` for anything not in the catalog.
    pub fn lookup(&self, input: &str) -> Option<&SymptomLabel> {
        self.labels.iter().find(|l| l.matches_ignore_case(input))
    }

    /// Labels containing `query` (case-insensitive), in catalog order.
    ///
    /// The returned iterator is lazy and can be cloned to walk the matches again. An empty
    /// query matches every label.
    pub fn filter(&self, query: &str) -> Matches<'_> {
        Matches {
            inner: self.labels.iter(),
            needle: query.to_lowercase(),
        }
    }
}

/// Lazy iterator over the catalog labels matching a query.
#[derive(Clone, Debug)]
pub struct Matches<'a> {
    inner: std::slice::Iter<'a, SymptomLabel>,
    needle: String,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a SymptomLabel;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.inner
            .by_ref()
            .find(|label| label.as_str().to_lowercase().contains(needle.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
