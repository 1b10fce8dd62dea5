//! Step controller for the four-stage intake flow.
//!
//! ```text
//! Symptoms --advance (needs >= 1 symptom)--> Severity --advance--> History --advance + classify--> Result
//!    ^                                          |  ^                   |
//!    +-------------------retreat----------------+  +------retreat------+
//! ```
//!
//! `reset` returns to `Symptoms` from anywhere. There is no forward move out of `Result`.
//!
//! The controller is the only writer of the current stage. The computed assessment lives inside
//! the `Result` state itself, so "stage is Result" and "an assessment exists" cannot disagree.

use crate::catalog::SymptomCatalog;
use crate::scorer::TriageScorer;
use crate::selection::SelectionSet;
use chrono::{DateTime, Utc};
use intake_types::{SeverityScore, SymptomLabel, UrgencyTier};
use serde::Serialize;

/// Which sub-view is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Symptoms,
    Severity,
    History,
    Result,
}

impl FlowStage {
    pub const ALL: [FlowStage; 4] = [
        FlowStage::Symptoms,
        FlowStage::Severity,
        FlowStage::History,
        FlowStage::Result,
    ];

    /// Zero-based position in the flow.
    pub fn index(self) -> usize {
        match self {
            FlowStage::Symptoms => 0,
            FlowStage::Severity => 1,
            FlowStage::History => 2,
            FlowStage::Result => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowStage::Symptoms => "Symptoms",
            FlowStage::Severity => "Severity",
            FlowStage::History => "History",
            FlowStage::Result => "Result",
        }
    }

    /// Caption of the forward button, if the stage has one.
    pub fn forward_label(self) -> Option<&'static str> {
        match self {
            FlowStage::Symptoms | FlowStage::Severity => Some("Continue"),
            FlowStage::History => Some("Analyze"),
            FlowStage::Result => None,
        }
    }
}

impl std::fmt::Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The immutable record produced when the flow completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub tier: UrgencyTier,
    /// Symptoms the tier was computed from, in catalog order.
    pub symptoms: Vec<SymptomLabel>,
    pub severity: SeverityScore,
    pub completed_at: DateTime<Utc>,
}

/// Why a transition did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    /// Continuing past symptoms needs at least one selected symptom.
    NoSymptomsSelected,
    /// Only severity and history can step back.
    NoPreviousStep,
    /// The result stage only allows a restart.
    ResultIsFinal,
}

/// Outcome of an `advance` or `retreat` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "transition")]
pub enum Transition {
    Moved { from: FlowStage, to: FlowStage },
    Refused { stage: FlowStage, reason: Refusal },
}

impl Transition {
    pub fn is_refused(&self) -> bool {
        matches!(self, Transition::Refused { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Active,
    Pending,
}

/// One entry of the progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    /// One-based step number as displayed.
    pub number: usize,
    pub name: &'static str,
    pub status: StepStatus,
}

/// Progress indicator for a flow currently at `current`.
pub fn progress(current: FlowStage) -> Vec<ProgressStep> {
    FlowStage::ALL
        .iter()
        .map(|stage| ProgressStep {
            number: stage.index() + 1,
            name: stage.name(),
            status: match stage.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Done,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            },
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
enum Step {
    #[default]
    Symptoms,
    Severity,
    History,
    Result(Assessment),
}

#[derive(Clone, Debug, Default)]
pub struct StepController {
    step: Step,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> FlowStage {
        match self.step {
            Step::Symptoms => FlowStage::Symptoms,
            Step::Severity => FlowStage::Severity,
            Step::History => FlowStage::History,
            Step::Result(_) => FlowStage::Result,
        }
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.step {
            Step::Result(assessment) => Some(assessment),
            _ => None,
        }
    }

    /// Whether `advance` would move forward right now.
    pub fn can_advance(&self, selection: &SelectionSet) -> bool {
        match self.step {
            Step::Symptoms => !selection.is_empty(),
            Step::Severity | Step::History => true,
            Step::Result(_) => false,
        }
    }

    /// Move one stage forward.
    ///
    /// Leaving `History` classifies the current selection and severity exactly once and stores
    /// the result. A refused advance changes nothing.
    pub fn advance(
        &mut self,
        selection: &SelectionSet,
        severity: SeverityScore,
        scorer: &TriageScorer,
        catalog: &SymptomCatalog,
    ) -> Transition {
        let from = self.stage();
        let next = match self.step {
            Step::Symptoms if selection.is_empty() => {
                return Transition::Refused {
                    stage: from,
                    reason: Refusal::NoSymptomsSelected,
                };
            }
            Step::Symptoms => Step::Severity,
            Step::Severity => Step::History,
            Step::History => Step::Result(Assessment {
                tier: scorer.classify(selection, severity),
                symptoms: selection.in_catalog_order(catalog).cloned().collect(),
                severity,
                completed_at: Utc::now(),
            }),
            Step::Result(_) => {
                return Transition::Refused {
                    stage: from,
                    reason: Refusal::ResultIsFinal,
                };
            }
        };

        self.step = next;
        Transition::Moved {
            from,
            to: self.stage(),
        }
    }

    /// Move one stage back from `Severity` or `History`. No data is cleared.
    pub fn retreat(&mut self) -> Transition {
        let from = self.stage();
        let previous = match self.step {
            Step::Severity => Step::Symptoms,
            Step::History => Step::Severity,
            Step::Symptoms => {
                return Transition::Refused {
                    stage: from,
                    reason: Refusal::NoPreviousStep,
                };
            }
            Step::Result(_) => {
                return Transition::Refused {
                    stage: from,
                    reason: Refusal::ResultIsFinal,
                };
            }
        };

        self.step = previous;
        Transition::Moved {
            from,
            to: self.stage(),
        }
    }

    /// Return to `Symptoms`, discarding any stored assessment.
    pub fn reset(&mut self) {
        self.step = Step::Symptoms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        catalog: SymptomCatalog,
        scorer: TriageScorer,
        selection: SelectionSet,
    }

    fn fixture() -> Fixture {
        Fixture {
            catalog: SymptomCatalog::reference(),
            scorer: TriageScorer::default(),
            selection: SelectionSet::new(),
        }
    }

    fn advance(ctl: &mut StepController, f: &Fixture, severity: i64) -> Transition {
        ctl.advance(
            &f.selection,
            SeverityScore::clamped(severity),
            &f.scorer,
            &f.catalog,
        )
    }

    #[test]
    fn test_advance_from_symptoms_requires_selection() {
        let mut f = fixture();
        let mut ctl = StepController::new();

        let t = advance(&mut ctl, &f, 5);
        assert_eq!(
            t,
            Transition::Refused {
                stage: FlowStage::Symptoms,
                reason: Refusal::NoSymptomsSelected
            }
        );
        assert_eq!(ctl.stage(), FlowStage::Symptoms);

        f.selection.toggle(SymptomLabel::new("Fever").unwrap());
        let t = advance(&mut ctl, &f, 5);
        assert_eq!(
            t,
            Transition::Moved {
                from: FlowStage::Symptoms,
                to: FlowStage::Severity
            }
        );
    }

    #[test]
    fn test_full_flow_classifies_on_leaving_history() {
        let mut f = fixture();
        f.selection.toggle(SymptomLabel::new("Cough").unwrap());
        f.selection.toggle(SymptomLabel::new("Headache").unwrap());
        let mut ctl = StepController::new();

        advance(&mut ctl, &f, 3);
        advance(&mut ctl, &f, 3);
        assert!(ctl.assessment().is_none());
        assert_eq!(ctl.stage(), FlowStage::History);

        let t = advance(&mut ctl, &f, 3);
        assert_eq!(
            t,
            Transition::Moved {
                from: FlowStage::History,
                to: FlowStage::Result
            }
        );
        let assessment = ctl.assessment().expect("assessment stored");
        assert_eq!(assessment.tier, UrgencyTier::Low);
        assert_eq!(assessment.severity.value(), 3);
        let symptoms: Vec<&str> = assessment.symptoms.iter().map(SymptomLabel::as_str).collect();
        assert_eq!(symptoms, vec!["Headache", "Cough"]);
    }

    #[test]
    fn test_result_is_terminal() {
        let mut f = fixture();
        f.selection.toggle(SymptomLabel::new("Fever").unwrap());
        let mut ctl = StepController::new();
        for _ in 0..3 {
            advance(&mut ctl, &f, 9);
        }
        let before = ctl.assessment().cloned();

        assert_eq!(
            advance(&mut ctl, &f, 1),
            Transition::Refused {
                stage: FlowStage::Result,
                reason: Refusal::ResultIsFinal
            }
        );
        assert!(ctl.retreat().is_refused());
        assert_eq!(ctl.assessment().cloned(), before);
        assert_eq!(before.map(|a| a.tier), Some(UrgencyTier::High));
    }

    #[test]
    fn test_retreat_moves_one_step_back() {
        let mut f = fixture();
        f.selection.toggle(SymptomLabel::new("Fever").unwrap());
        let mut ctl = StepController::new();

        assert_eq!(
            ctl.retreat(),
            Transition::Refused {
                stage: FlowStage::Symptoms,
                reason: Refusal::NoPreviousStep
            }
        );

        advance(&mut ctl, &f, 5);
        advance(&mut ctl, &f, 5);
        assert_eq!(ctl.stage(), FlowStage::History);
        ctl.retreat();
        assert_eq!(ctl.stage(), FlowStage::Severity);
        ctl.retreat();
        assert_eq!(ctl.stage(), FlowStage::Symptoms);
    }

    #[test]
    fn test_reset_discards_assessment() {
        let mut f = fixture();
        f.selection.toggle(SymptomLabel::new("Nausea").unwrap());
        let mut ctl = StepController::new();
        for _ in 0..3 {
            advance(&mut ctl, &f, 5);
        }
        assert!(ctl.assessment().is_some());

        ctl.reset();
        assert_eq!(ctl.stage(), FlowStage::Symptoms);
        assert!(ctl.assessment().is_none());
    }

    #[test]
    fn test_can_advance_matches_guard() {
        let mut f = fixture();
        let ctl = StepController::new();
        assert!(!ctl.can_advance(&f.selection));
        f.selection.toggle(SymptomLabel::new("Fatigue").unwrap());
        assert!(ctl.can_advance(&f.selection));
    }

    #[test]
    fn test_progress_marks_done_active_pending() {
        let steps = progress(FlowStage::History);
        let statuses: Vec<StepStatus> = steps.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Done,
                StepStatus::Done,
                StepStatus::Active,
                StepStatus::Pending
            ]
        );
        assert_eq!(steps[0].number, 1);
        assert_eq!(steps[3].name, "Result");
    }

    #[test]
    fn test_forward_labels() {
        assert_eq!(FlowStage::Symptoms.forward_label(), Some("Continue"));
        assert_eq!(FlowStage::History.forward_label(), Some("Analyze"));
        assert_eq!(FlowStage::Result.forward_label(), None);
    }
}
