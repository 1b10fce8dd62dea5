//! Validated value types shared by the intake crates.
//!
//! These types carry no behaviour beyond construction and conversion. Each one guarantees its
//! invariant once built, so the decision core never has to re-check a label, a severity or a
//! tier it has been handed.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input text spanned more than one line
    #[error("Text cannot contain line breaks")]
    LineBreak,
    /// The input did not name a known urgency tier
    #[error("Unknown urgency tier: {0}")]
    UnknownTier(String),
}

/// A single symptom label, as shown to the patient.
///
/// Labels are trimmed on construction and must be a single non-empty line. Equality and
/// ordering are by exact value; case-insensitive matching is the catalog's job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymptomLabel(String);

impl SymptomLabel {
    /// Creates a new `SymptomLabel` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::LineBreak` if the trimmed
    /// input contains `\n` or `\r`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(TextError::LineBreak);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality against raw user input, ignoring surrounding whitespace.
    pub fn matches_ignore_case(&self, input: &str) -> bool {
        self.0.to_lowercase() == input.trim().to_lowercase()
    }
}

impl fmt::Display for SymptomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymptomLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SymptomLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SymptomLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SymptomLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SymptomLabel::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Self-reported severity on the closed scale `[1, 10]`.
///
/// Out-of-range input is clamped rather than rejected, so a `SeverityScore` can always be
/// produced from whatever the input control hands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeverityScore(u8);

impl SeverityScore {
    /// Lowest value on the scale ("Mild").
    pub const MIN: u8 = 1;
    /// Highest value on the scale ("Severe").
    pub const MAX: u8 = 10;
    /// Value a fresh session starts with.
    pub const DEFAULT: u8 = 5;

    /// Builds a score from any integer, clamping it into `[MIN, MAX]`.
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // bounded is within 1..=10, so the narrowing cannot truncate
        Self(bounded as u8)
    }

    /// Builds a score only if `value` is already on the scale.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for SeverityScore {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for SeverityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

impl serde::Serialize for SeverityScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SeverityScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(SeverityScore::clamped(raw))
    }
}

/// Coarse urgency produced by triage, ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 3] = [UrgencyTier::Low, UrgencyTier::Medium, UrgencyTier::High];

    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Medium => "medium",
            UrgencyTier::High => "high",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyTier {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(UrgencyTier::Low),
            "medium" => Ok(UrgencyTier::Medium),
            "high" => Ok(UrgencyTier::High),
            "" => Err(TextError::Empty),
            _ => Err(TextError::UnknownTier(s.trim().to_owned())),
        }
    }
}
