use std::fmt;

#[derive(Debug)]
pub enum AccuracyError {
    /// Competition key is not `<year><event code>`.
    InvalidCompetitionKey(String),
    /// TOML parse / deserialization error in check options.
    OptionsParse(String),
    /// Check options failed validation.
    OptionsValidation(String),
    /// Form store query failed.
    Store(String),
    /// Results API fetch failed.
    MatchSource(String),
    /// Credential lookup failed (distinct from "not an admin").
    Identity(String),
}

impl fmt::Display for AccuracyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCompetitionKey(key) => {
                write!(f, "invalid competition key '{key}' (expected e.g. 2024txdal)")
            }
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
            Self::OptionsValidation(msg) => write!(f, "options validation error: {msg}"),
            Self::Store(msg) => write!(f, "form store error: {msg}"),
            Self::MatchSource(msg) => write!(f, "match source error: {msg}"),
            Self::Identity(msg) => write!(f, "identity lookup error: {msg}"),
        }
    }
}

impl std::error::Error for AccuracyError {}
