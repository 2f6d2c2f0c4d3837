use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccuracyError;

// ---------------------------------------------------------------------------
// Competition
// ---------------------------------------------------------------------------

/// Event key as used by the results API: four-digit season year followed by
/// a lowercase alphanumeric event code (`2024txdal`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompetitionKey(String);

impl CompetitionKey {
    pub fn parse(input: &str) -> Result<Self, AccuracyError> {
        let key = input.trim();
        let bytes = key.as_bytes();
        let valid = bytes.len() > 4
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4..]
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
        if !valid {
            return Err(AccuracyError::InvalidCompetitionKey(input.to_string()));
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CompetitionKey {
    type Err = AccuracyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for CompetitionKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CompetitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active competition, passed explicitly into the engine entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitionContext {
    pub active: Option<CompetitionKey>,
}

impl CompetitionContext {
    pub fn new(active: Option<CompetitionKey>) -> Self {
        Self { active }
    }

    pub fn unset() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<&CompetitionKey> {
        self.active.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Check options
// ---------------------------------------------------------------------------

/// Run options for a verification pass. Every key is optional:
///
/// ```toml
/// link_base = "https://scouting.example.org"
/// expected_alliance_forms = 6
/// completed_only = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CheckOptions {
    /// Prefix for `/records/stand-forms/<id>` links. Empty = relative links.
    #[serde(default)]
    pub link_base: String,
    /// Forms expected per (match, alliance): teams x scouts per team.
    #[serde(default = "default_alliance_forms")]
    pub expected_alliance_forms: usize,
    /// Only ask the results API for matches that have been played.
    #[serde(default = "default_completed_only")]
    pub completed_only: bool,
}

fn default_alliance_forms() -> usize {
    6
}

fn default_completed_only() -> bool {
    true
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            link_base: String::new(),
            expected_alliance_forms: default_alliance_forms(),
            completed_only: default_completed_only(),
        }
    }
}

impl CheckOptions {
    pub fn from_toml(input: &str) -> Result<Self, AccuracyError> {
        let mut options: CheckOptions =
            toml::from_str(input).map_err(|e| AccuracyError::OptionsParse(e.to_string()))?;
        options.validate()?;
        options.link_base = options.link_base.trim_end_matches('/').to_string();
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), AccuracyError> {
        // Pairing walks the sorted group two forms at a time.
        if self.expected_alliance_forms < 2 || self.expected_alliance_forms % 2 != 0 {
            return Err(AccuracyError::OptionsValidation(format!(
                "expected_alliance_forms must be an even number >= 2, got {}",
                self.expected_alliance_forms
            )));
        }

        if !self.link_base.is_empty()
            && !(self.link_base.starts_with("http://") || self.link_base.starts_with("https://"))
        {
            return Err(AccuracyError::OptionsValidation(format!(
                "link_base must be an http(s) URL, got '{}'",
                self.link_base
            )));
        }

        Ok(())
    }
}

/// `<base>/records/stand-forms/<id>`; an empty base gives a relative link.
pub fn form_link(link_base: &str, form_id: &str) -> String {
    format!("{link_base}/records/stand-forms/{form_id}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
