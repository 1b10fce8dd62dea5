//! Triage scoring.
//!
//! Classification is a pure, total function of the selected symptoms and the self-reported
//! severity. Rules are evaluated top to bottom and the first match wins:
//!
//! 1. **high** if severity is above `high_severity_above`, or any red-flag symptom is selected
//! 2. **medium** if severity is above `medium_severity_above`, or more than
//!    `medium_symptom_count_above` distinct symptoms are selected
//! 3. **low** otherwise
//!
//! Red flags bypass the severity comparison entirely. Medical history is not an input.

use crate::constants::{
    DEFAULT_RED_FLAGS, HIGH_SEVERITY_ABOVE, MEDIUM_SEVERITY_ABOVE, MEDIUM_SYMPTOM_COUNT_ABOVE,
};
use crate::error::{IntakeError, IntakeResult};
use crate::selection::SelectionSet;
use intake_types::{SeverityScore, SymptomLabel, UrgencyTier};
use serde::Serialize;

/// Thresholds used by the scorer. All comparisons are strict (`>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Thresholds {
    pub high_severity_above: u8,
    pub medium_severity_above: u8,
    pub medium_symptom_count_above: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_severity_above: HIGH_SEVERITY_ABOVE,
            medium_severity_above: MEDIUM_SEVERITY_ABOVE,
            medium_symptom_count_above: MEDIUM_SYMPTOM_COUNT_ABOVE,
        }
    }
}

impl Thresholds {
    /// Check the thresholds sit on the severity scale and are ordered.
    pub fn validate(&self) -> IntakeResult<()> {
        if self.high_severity_above > SeverityScore::MAX
            || self.medium_severity_above > SeverityScore::MAX
        {
            return Err(IntakeError::InvalidConfig(format!(
                "severity thresholds must not exceed {}",
                SeverityScore::MAX
            )));
        }

        if self.medium_severity_above > self.high_severity_above {
            return Err(IntakeError::InvalidConfig(
                "medium_severity_above cannot be greater than high_severity_above".into(),
            ));
        }

        Ok(())
    }
}

/// Immutable rule set injected into a [`TriageScorer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TriageRules {
    red_flags: Vec<SymptomLabel>,
    thresholds: Thresholds,
}

impl TriageRules {
    pub fn new(red_flags: Vec<SymptomLabel>, thresholds: Thresholds) -> IntakeResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            red_flags,
            thresholds,
        })
    }

    pub fn red_flags(&self) -> &[SymptomLabel] {
        &self.red_flags
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

impl Default for TriageRules {
    fn default() -> Self {
        let red_flags = DEFAULT_RED_FLAGS
            .iter()
            .filter_map(|s| SymptomLabel::new(s).ok())
            .collect();
        Self {
            red_flags,
            thresholds: Thresholds::default(),
        }
    }
}

/// Maps a selection and severity to an [`UrgencyTier`].
#[derive(Clone, Debug, Default)]
pub struct TriageScorer {
    rules: TriageRules,
}

impl TriageScorer {
    pub fn new(rules: TriageRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TriageRules {
        &self.rules
    }

    /// Classify a completed intake. Deterministic and side-effect free.
    pub fn classify(&self, selection: &SelectionSet, severity: SeverityScore) -> UrgencyTier {
        let t = &self.rules.thresholds;

        if severity.value() > t.high_severity_above || self.has_red_flag(selection) {
            return UrgencyTier::High;
        }

        if severity.value() > t.medium_severity_above
            || selection.len() > t.medium_symptom_count_above
        {
            return UrgencyTier::Medium;
        }

        UrgencyTier::Low
    }

    /// Red-flag symptoms present in `selection`, in rule order.
    pub fn red_flags_in<'a>(
        &'a self,
        selection: &'a SelectionSet,
    ) -> impl Iterator<Item = &'a SymptomLabel> + 'a {
        self.rules
            .red_flags
            .iter()
            .filter(move |flag| selection.contains(flag.as_str()))
    }

    pub fn has_red_flag(&self, selection: &SelectionSet) -> bool {
        self.red_flags_in(selection).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(labels: &[&str]) -> SelectionSet {
        labels
            .iter()
            .map(|s| SymptomLabel::new(s).unwrap())
            .collect()
    }

    fn severity(v: i64) -> SeverityScore {
        SeverityScore::clamped(v)
    }

    #[test]
    fn test_scenario_single_mild_symptom_is_low() {
        let scorer = TriageScorer::default();
        let tier = scorer.classify(&selection(&["Headache"]), severity(3));
        assert_eq!(tier, UrgencyTier::Low);
    }

    #[test]
    fn test_scenario_four_symptoms_is_medium() {
        let scorer = TriageScorer::default();
        let s = selection(&["Headache", "Fever", "Cough", "Fatigue"]);
        assert_eq!(scorer.classify(&s, severity(3)), UrgencyTier::Medium);
    }

    #[test]
    fn test_scenario_chest_pain_overrides_low_severity() {
        let scorer = TriageScorer::default();
        let tier = scorer.classify(&selection(&["Chest Pain"]), severity(1));
        assert_eq!(tier, UrgencyTier::High);
    }

    #[test]
    fn test_red_flags_override_for_every_low_severity() {
        let scorer = TriageScorer::default();
        for flag in ["Chest Pain", "Shortness of Breath"] {
            for v in 1..=7 {
                let s = selection(&[flag, "Cough", "Fever"]);
                assert_eq!(
                    scorer.classify(&s, severity(v)),
                    UrgencyTier::High,
                    "{flag} at severity {v}"
                );
            }
        }
    }

    #[test]
    fn test_severity_boundary_seven_to_eight() {
        let scorer = TriageScorer::default();
        let s = selection(&["Headache", "Fever"]);
        assert_eq!(scorer.classify(&s, severity(7)), UrgencyTier::Medium);
        assert_eq!(scorer.classify(&s, severity(8)), UrgencyTier::High);
        assert_eq!(scorer.classify(&s, severity(10)), UrgencyTier::High);
    }

    #[test]
    fn test_severity_boundary_four_to_five() {
        let scorer = TriageScorer::default();
        let s = selection(&["Headache", "Fever", "Cough"]);
        assert_eq!(scorer.classify(&s, severity(4)), UrgencyTier::Low);
        assert_eq!(scorer.classify(&s, severity(5)), UrgencyTier::Medium);
    }

    #[test]
    fn test_count_threshold_three_to_four() {
        let scorer = TriageScorer::default();
        let mut s = selection(&["Headache", "Fever", "Cough"]);
        assert_eq!(scorer.classify(&s, severity(4)), UrgencyTier::Low);
        s.toggle(SymptomLabel::new("Nausea").unwrap());
        assert_eq!(scorer.classify(&s, severity(4)), UrgencyTier::Medium);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let scorer = TriageScorer::default();
        let s = selection(&["Dizziness", "Back Pain"]);
        let first = scorer.classify(&s, severity(6));
        for _ in 0..10 {
            assert_eq!(scorer.classify(&s, severity(6)), first);
        }
    }

    #[test]
    fn test_empty_selection_is_still_classified() {
        let scorer = TriageScorer::default();
        assert_eq!(
            scorer.classify(&SelectionSet::new(), severity(1)),
            UrgencyTier::Low
        );
        assert_eq!(
            scorer.classify(&SelectionSet::new(), severity(9)),
            UrgencyTier::High
        );
    }

    #[test]
    fn test_custom_rules_are_honoured() {
        let rules = TriageRules::new(
            vec![SymptomLabel::new("Dizziness").unwrap()],
            Thresholds {
                high_severity_above: 9,
                medium_severity_above: 2,
                medium_symptom_count_above: 1,
            },
        )
        .unwrap();
        let scorer = TriageScorer::new(rules);
        assert_eq!(
            scorer.classify(&selection(&["Chest Pain"]), severity(1)),
            UrgencyTier::Low
        );
        assert_eq!(
            scorer.classify(&selection(&["Dizziness"]), severity(1)),
            UrgencyTier::High
        );
        assert_eq!(
            scorer.classify(&selection(&["Fever", "Cough"]), severity(1)),
            UrgencyTier::Medium
        );
        assert_eq!(
            scorer.classify(&selection(&["Fever"]), severity(9)),
            UrgencyTier::Medium
        );
    }

    #[test]
    fn test_red_flags_in_lists_present_flags() {
        let scorer = TriageScorer::default();
        let s = selection(&["Shortness of Breath", "Cough"]);
        let flags: Vec<&str> = scorer.red_flags_in(&s).map(SymptomLabel::as_str).collect();
        assert_eq!(flags, vec!["Shortness of Breath"]);
    }

    #[test]
    fn test_thresholds_validate() {
        let err = Thresholds {
            high_severity_above: 11,
            ..Thresholds::default()
        }
        .validate()
        .expect_err("should reject off-scale threshold");
        assert!(matches!(err, IntakeError::InvalidConfig(msg) if msg.contains("must not exceed")));

        let err = Thresholds {
            high_severity_above: 3,
            medium_severity_above: 6,
            medium_symptom_count_above: 3,
        }
        .validate()
        .expect_err("should reject inverted thresholds");
        assert!(matches!(err, IntakeError::InvalidConfig(msg) if msg.contains("cannot be greater")));
    }
}
