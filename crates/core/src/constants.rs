//! Constants used throughout the intake core crate.
//!
//! These are the reference values the default configuration is built from. Nothing reads them
//! at event time; they only seed [`crate::TriageConfig::default`].

/// Symptom catalog in display order.
pub const DEFAULT_CATALOG: &[&str] = &[
    "Headache",
    "Fever",
    "Cough",
    "Chest Pain",
    "Fatigue",
    "Nausea",
    "Shortness of Breath",
    "Dizziness",
    "Back Pain",
    "Sore Throat",
];

/// Label denoting acute chest discomfort.
pub const CHEST_PAIN: &str = "Chest Pain";

/// Label denoting breathing difficulty.
pub const SHORTNESS_OF_BREATH: &str = "Shortness of Breath";

/// Symptoms whose presence alone yields a high tier.
pub const DEFAULT_RED_FLAGS: &[&str] = &[CHEST_PAIN, SHORTNESS_OF_BREATH];

/// Severity strictly above this is high.
pub const HIGH_SEVERITY_ABOVE: u8 = 7;

/// Severity strictly above this is at least medium.
pub const MEDIUM_SEVERITY_ABOVE: u8 = 4;

/// More distinct symptoms than this is at least medium.
pub const MEDIUM_SYMPTOM_COUNT_ABOVE: usize = 3;

/// History shown for review before analysis, as (label, value).
pub const DEFAULT_HISTORY: &[(&str, &str)] = &[
    ("Allergies", "Penicillin"),
    ("Chronic Conditions", "Type 2 Diabetes"),
    ("Current Medications", "Metformin 500mg"),
];

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "INTAKE_CONFIG";
