//! The set of symptoms a patient has toggled on.

use crate::catalog::SymptomCatalog;
use intake_types::SymptomLabel;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of a toggle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "toggle", content = "reason")]
pub enum Toggle {
    /// The label was added.
    Selected,
    /// The label was removed.
    Deselected,
    /// Nothing changed.
    Rejected(ToggleRejection),
}

/// Why a toggle left the selection untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleRejection {
    /// The label is not in the symptom catalog.
    UnknownLabel,
    /// Symptoms can only be changed on the symptoms step.
    NotOnSymptomsStep,
}

/// Selected symptoms. Membership is all that matters; order is never exposed to scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    labels: BTreeSet<SymptomLabel>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `label` if present, otherwise add it.
    pub fn toggle(&mut self, label: SymptomLabel) -> Toggle {
        if self.labels.remove(&label) {
            Toggle::Deselected
        } else {
            self.labels.insert(label);
            Toggle::Selected
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomLabel> {
        self.labels.iter()
    }

    /// Selected labels in catalog display order.
    pub fn in_catalog_order<'a>(
        &'a self,
        catalog: &'a SymptomCatalog,
    ) -> impl Iterator<Item = &'a SymptomLabel> + 'a {
        catalog
            .labels()
            .iter()
            .filter(move |label| self.labels.contains(*label))
    }
}

impl FromIterator<SymptomLabel> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = SymptomLabel>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> SymptomLabel {
        SymptomLabel::new(s).unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        assert_eq!(selection.toggle(label("Fever")), Toggle::Selected);
        assert!(selection.contains("Fever"));
        assert_eq!(selection.toggle(label("Fever")), Toggle::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_double_toggle_leaves_membership_unchanged() {
        let mut selection: SelectionSet = [label("Cough"), label("Nausea")].into_iter().collect();
        let before = selection.clone();
        selection.toggle(label("Headache"));
        selection.toggle(label("Headache"));
        assert_eq!(selection, before);

        selection.toggle(label("Cough"));
        selection.toggle(label("Cough"));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_uniqueness_by_value() {
        let selection: SelectionSet = [label("Fever"), label(" Fever ")].into_iter().collect();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_in_catalog_order() {
        let catalog = SymptomCatalog::new(vec![
            label("Headache"),
            label("Fever"),
            label("Cough"),
        ])
        .unwrap();
        let selection: SelectionSet = [label("Cough"), label("Headache")].into_iter().collect();
        let ordered: Vec<&str> = selection
            .in_catalog_order(&catalog)
            .map(SymptomLabel::as_str)
            .collect();
        assert_eq!(ordered, vec!["Headache", "Cough"]);
    }
}
