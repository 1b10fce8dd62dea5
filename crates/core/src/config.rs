//! Triage configuration.
//!
//! Configuration is resolved once at startup and shared with every session through an `Arc`.
//! Nothing in the flow reads files or environment variables while handling events.
//!
//! The YAML form mirrors the defaults; every key is optional:
//!
//! ```yaml
//! catalog: [Headache, Fever, Cough, Chest Pain]
//! red_flags: [Chest Pain]
//! default_severity: 5
//! thresholds:
//!   high_severity_above: 7
//!   medium_severity_above: 4
//!   medium_symptom_count_above: 3
//! history:
//!   - label: Allergies
//!     value: Penicillin
//! ```

use crate::catalog::SymptomCatalog;
use crate::error::{IntakeError, IntakeResult};
use crate::history::{HistoryFacts, StaticRecordStore};
use crate::scorer::{Thresholds, TriageRules};
use intake_types::{SeverityScore, SymptomLabel};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Immutable configuration injected into the scorer and every session.
#[derive(Clone, Debug)]
pub struct TriageConfig {
    catalog: SymptomCatalog,
    rules: TriageRules,
    default_severity: SeverityScore,
    record_store: StaticRecordStore,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    catalog: Option<Vec<SymptomLabel>>,
    #[serde(default)]
    red_flags: Option<Vec<SymptomLabel>>,
    #[serde(default)]
    default_severity: Option<u8>,
    #[serde(default)]
    thresholds: Option<Thresholds>,
    #[serde(default)]
    history: Option<HistoryFacts>,
}

impl TriageConfig {
    /// Create a new `TriageConfig`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidConfig` if a red-flag label is missing from the catalog.
    /// A red flag the patient can never select would silently disable its override.
    pub fn new(
        catalog: SymptomCatalog,
        rules: TriageRules,
        default_severity: SeverityScore,
        record_store: StaticRecordStore,
    ) -> IntakeResult<Self> {
        if let Some(missing) = rules.red_flags().iter().find(|f| !catalog.contains(f)) {
            return Err(IntakeError::InvalidConfig(format!(
                "red flag '{}' is not in the symptom catalog",
                missing
            )));
        }

        Ok(Self {
            catalog,
            rules,
            default_severity,
            record_store,
        })
    }

    /// Parse configuration from YAML, filling omitted keys from the defaults.
    pub fn from_yaml_str(yaml: &str) -> IntakeResult<Self> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml).map_err(IntakeError::YamlDeserialization)?
        };
        let defaults = Self::default();

        let catalog = match file.catalog {
            Some(labels) => SymptomCatalog::new(labels)?,
            None => defaults.catalog,
        };

        let red_flags = file
            .red_flags
            .unwrap_or_else(|| defaults.rules.red_flags().to_vec());
        let thresholds = file
            .thresholds
            .unwrap_or_else(|| defaults.rules.thresholds());
        let rules = TriageRules::new(red_flags, thresholds)?;

        let default_severity = match file.default_severity {
            Some(value) => SeverityScore::new(value).ok_or_else(|| {
                IntakeError::InvalidConfig(format!(
                    "default_severity must be between {} and {}",
                    SeverityScore::MIN,
                    SeverityScore::MAX
                ))
            })?,
            None => defaults.default_severity,
        };

        let record_store = match file.history {
            Some(facts) => StaticRecordStore::new(facts),
            None => defaults.record_store,
        };

        Self::new(catalog, rules, default_severity, record_store)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: &Path) -> IntakeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
        Self::from_yaml_str(&contents)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> IntakeResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &TriageRules {
        &self.rules
    }

    pub fn default_severity(&self) -> SeverityScore {
        self.default_severity
    }

    pub fn record_store(&self) -> &StaticRecordStore {
        &self.record_store
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            catalog: SymptomCatalog::reference(),
            rules: TriageRules::default(),
            default_severity: SeverityScore::default(),
            record_store: StaticRecordStore::reference(),
        }
    }
}

/// Resolve the configuration file path without reading environment variables.
///
/// `value` is the raw `INTAKE_CONFIG` value as read by the binary. Unset or blank means "use
/// the defaults" and yields `Ok(None)`.
pub fn resolve_config_path(value: Option<String>) -> IntakeResult<Option<PathBuf>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(raw) = value else {
        return Ok(None);
    };

    let path = PathBuf::from(raw);
    if !path.is_file() {
        return Err(IntakeError::InvalidConfig(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    Ok(Some(path))
}
