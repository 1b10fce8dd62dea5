//! User events at the input boundary, and scripts of them.
//!
//! A script is a YAML (or JSON) list of events replayed in order against a fresh session:
//!
//! ```yaml
//! - event: toggle_symptom
//!   label: Headache
//! - event: advance
//! - event: set_severity
//!   value: 3
//! - event: advance
//! - event: advance
//! ```

use crate::error::{IntakeError, IntakeResult};
use crate::flow::Transition;
use crate::selection::Toggle;
use intake_types::SeverityScore;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Search { query: String },
    ToggleSymptom { label: String },
    SetSeverity { value: i64 },
    Advance,
    Retreat,
    Restart,
}

/// What applying an [`Event`] did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Searched { matches: usize },
    Toggled { result: Toggle },
    /// `applied` is the clamped value, or `None` when not on the severity step.
    SeveritySet { applied: Option<SeverityScore> },
    Transitioned { transition: Transition },
    Restarted,
}

pub fn parse_script(text: &str) -> IntakeResult<Vec<Event>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(text).map_err(IntakeError::YamlDeserialization)
}

pub fn load_script(path: &Path) -> IntakeResult<Vec<Event>> {
    let contents = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
    parse_script(&contents)
}
