//! One patient's traversal of the intake flow.
//!
//! [`IntakeSession`] owns the selection, the severity, the search text and the step
//! controller for a single flow. Every method is a synchronous, serialised user event; none of
//! them can fail. Refusals come back as values ([`Toggle::Rejected`], [`Transition::Refused`]).

use crate::catalog::Matches;
use crate::config::TriageConfig;
use crate::events::{Event, EventOutcome};
use crate::flow::{self, Assessment, FlowStage, ProgressStep, StepController, Transition};
use crate::history::{HistoryFacts, RecordStore};
use crate::router::Outcome;
use crate::scorer::TriageScorer;
use crate::selection::{SelectionSet, Toggle, ToggleRejection};
use intake_types::{SeverityScore, SymptomLabel};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub struct IntakeSession {
    id: Uuid,
    config: Arc<TriageConfig>,
    scorer: TriageScorer,
    selection: SelectionSet,
    severity: SeverityScore,
    search: Option<String>,
    history: HistoryFacts,
    controller: StepController,
}

/// Serialisable view of a session, for display or export.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub stage: FlowStage,
    pub progress: Vec<ProgressStep>,
    pub search_query: Option<String>,
    pub selected: Vec<SymptomLabel>,
    pub severity: SeverityScore,
    pub can_advance: bool,
    pub history: HistoryFacts,
    pub assessment: Option<Assessment>,
    pub outcome: Option<Outcome>,
}

impl IntakeSession {
    /// Start a session using the history from the configured record store.
    pub fn new(config: Arc<TriageConfig>) -> Self {
        let store = config.record_store().clone();
        Self::with_record_store(config, &store)
    }

    /// Start a session, loading the patient's history from `store` once.
    pub fn with_record_store(config: Arc<TriageConfig>, store: &dyn RecordStore) -> Self {
        let id = Uuid::new_v4();
        let scorer = TriageScorer::new(config.rules().clone());
        let severity = config.default_severity();
        let history = store.history_facts();

        tracing::info!(session_id = %id, history_facts = history.len(), "intake session started");

        Self {
            id,
            config,
            scorer,
            selection: SelectionSet::new(),
            severity,
            search: None,
            history,
            controller: StepController::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn stage(&self) -> FlowStage {
        self.controller.stage()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selected symptoms in catalog order.
    pub fn selected(&self) -> Vec<&SymptomLabel> {
        self.selection
            .in_catalog_order(self.config.catalog())
            .collect()
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selection.contains(label)
    }

    pub fn severity(&self) -> SeverityScore {
        self.severity
    }

    /// Current search text. `None` until the patient has searched; `Some("")` after clearing
    /// the box.
    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Catalog entries matching the current search, in catalog order.
    pub fn visible_symptoms(&self) -> Matches<'_> {
        self.config
            .catalog()
            .filter(self.search.as_deref().unwrap_or_default())
    }

    pub fn history(&self) -> &HistoryFacts {
        &self.history
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.controller.assessment()
    }

    /// Tier and actions for the presentation layer, once the flow has a result.
    pub fn outcome(&self) -> Option<Outcome> {
        self.assessment().map(|a| Outcome::for_tier(a.tier))
    }

    pub fn progress(&self) -> Vec<ProgressStep> {
        flow::progress(self.stage())
    }

    /// Whether the forward button is enabled.
    pub fn can_advance(&self) -> bool {
        self.controller.can_advance(&self.selection)
    }

    pub fn search(&mut self, query: impl Into<String>) {
        let query = query.into();
        tracing::debug!(session_id = %self.id, query = %query, "symptom search updated");
        self.search = Some(query);
    }

    /// Toggle a symptom by name. The name is matched case-insensitively against the catalog.
    pub fn toggle_symptom(&mut self, input: &str) -> Toggle {
        if self.stage() != FlowStage::Symptoms {
            tracing::warn!(
                session_id = %self.id,
                stage = %self.stage(),
                "symptom toggle ignored outside the symptoms step"
            );
            return Toggle::Rejected(ToggleRejection::NotOnSymptomsStep);
        }

        let Some(label) = self.config.catalog().lookup(input).cloned() else {
            tracing::warn!(session_id = %self.id, input = %input, "unknown symptom rejected");
            return Toggle::Rejected(ToggleRejection::UnknownLabel);
        };

        let result = self.selection.toggle(label);
        tracing::debug!(
            session_id = %self.id,
            symptom = %input.trim(),
            ?result,
            selected = self.selection.len(),
            "symptom toggled"
        );
        result
    }

    /// Set severity, clamped to the scale. Only the severity step accepts a value; elsewhere
    /// this returns `None` and nothing changes.
    pub fn set_severity(&mut self, value: i64) -> Option<SeverityScore> {
        if self.stage() != FlowStage::Severity {
            tracing::warn!(
                session_id = %self.id,
                stage = %self.stage(),
                "severity change ignored outside the severity step"
            );
            return None;
        }

        let score = SeverityScore::clamped(value);
        if i64::from(score.value()) != value {
            tracing::debug!(
                session_id = %self.id,
                requested = value,
                applied = score.value(),
                "severity clamped"
            );
        }
        self.severity = score;
        Some(score)
    }

    /// Move forward one step. Leaving history computes the tier.
    pub fn advance(&mut self) -> Transition {
        let transition = self.controller.advance(
            &self.selection,
            self.severity,
            &self.scorer,
            self.config.catalog(),
        );
        self.log_transition("advance", transition);

        if let (Transition::Moved { to: FlowStage::Result, .. }, Some(assessment)) =
            (transition, self.controller.assessment())
        {
            tracing::info!(
                session_id = %self.id,
                tier = %assessment.tier,
                severity = assessment.severity.value(),
                symptoms = assessment.symptoms.len(),
                "triage completed"
            );
        }
        transition
    }

    pub fn retreat(&mut self) -> Transition {
        let transition = self.controller.retreat();
        self.log_transition("retreat", transition);
        transition
    }

    /// Back to the initial state: symptoms step, nothing selected, default severity, no result.
    pub fn restart(&mut self) {
        self.selection.clear();
        self.search = None;
        self.severity = self.config.default_severity();
        self.controller.reset();
        tracing::info!(session_id = %self.id, "intake session restarted");
    }

    pub fn apply(&mut self, event: Event) -> EventOutcome {
        match event {
            Event::Search { query } => {
                self.search(query);
                EventOutcome::Searched {
                    matches: self.visible_symptoms().count(),
                }
            }
            Event::ToggleSymptom { label } => EventOutcome::Toggled {
                result: self.toggle_symptom(&label),
            },
            Event::SetSeverity { value } => EventOutcome::SeveritySet {
                applied: self.set_severity(value),
            },
            Event::Advance => EventOutcome::Transitioned {
                transition: self.advance(),
            },
            Event::Retreat => EventOutcome::Transitioned {
                transition: self.retreat(),
            },
            Event::Restart => {
                self.restart();
                EventOutcome::Restarted
            }
        }
    }

    pub fn replay<I>(&mut self, events: I) -> Vec<EventOutcome>
    where
        I: IntoIterator<Item = Event>,
    {
        events.into_iter().map(|event| self.apply(event)).collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            stage: self.stage(),
            progress: self.progress(),
            search_query: self.search.clone(),
            selected: self.selected().into_iter().cloned().collect(),
            severity: self.severity,
            can_advance: self.can_advance(),
            history: self.history.clone(),
            assessment: self.assessment().cloned(),
            outcome: self.outcome(),
        }
    }

    fn log_transition(&self, action: &str, transition: Transition) {
        match transition {
            Transition::Moved { from, to } => {
                tracing::info!(session_id = %self.id, action, %from, %to, "stage changed");
            }
            Transition::Refused { stage, reason } => {
                tracing::warn!(session_id = %self.id, action, %stage, ?reason, "transition refused");
            }
        }
    }
}
