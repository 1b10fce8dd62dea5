//! # Intake Core
//!
//! Decision core of the patient symptom intake wizard.
//!
//! A session walks four stages (Symptoms, Severity, History, Result). The patient picks
//! symptoms from a fixed catalog and rates severity from 1 to 10. History is shown for review.
//! Leaving the history step classifies the intake into an urgency tier, and the tier is routed
//! to a fixed set of next actions.
//!
//! - [`catalog`]: ordered symptom catalog and case-insensitive filter
//! - [`selection`]: the toggled symptom set
//! - [`scorer`]: deterministic tier classification
//! - [`flow`]: the step controller state machine
//! - [`router`]: tier to action table
//! - [`session`]: one flow session tying the above together
//!
//! **No presentation concerns**: rendering, navigation and persistence belong to callers.
//! History is display-only and never reaches the scorer.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod flow;
pub mod history;
pub mod router;
pub mod scorer;
pub mod selection;
pub mod session;

pub use catalog::{Matches, SymptomCatalog};
pub use config::{resolve_config_path, TriageConfig};
pub use error::{IntakeError, IntakeResult};
pub use events::{load_script, parse_script, Event, EventOutcome};
pub use flow::{Assessment, FlowStage, ProgressStep, Refusal, StepController, StepStatus, Transition};
pub use history::{HistoryFact, HistoryFacts, RecordStore, StaticRecordStore};
pub use router::{actions_for, Action, Destination, Messaging, Outcome};
pub use scorer::{Thresholds, TriageRules, TriageScorer};
pub use selection::{SelectionSet, Toggle, ToggleRejection};
pub use session::{IntakeSession, SessionSnapshot};

pub use intake_types::{SeverityScore, SymptomLabel, TextError, UrgencyTier};
