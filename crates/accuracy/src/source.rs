//! Collaborators the engine reads from.
//!
//! The engine never touches storage or the network itself; the CLI wires in
//! the SQLite store and the results-API client.

use crate::config::CompetitionKey;
use crate::error::AccuracyError;
use crate::model::{AllianceGroup, AuthoritativeMatch, TeamGroup};

/// Grouped queries over the forms of one competition.
pub trait FormStore {
    /// Forms grouped by (match, team).
    fn forms_by_team(&self, competition: &CompetitionKey) -> Result<Vec<TeamGroup>, AccuracyError>;

    /// Forms grouped by (match, alliance).
    fn forms_by_alliance(
        &self,
        competition: &CompetitionKey,
    ) -> Result<Vec<AllianceGroup>, AccuracyError>;
}

/// Authoritative match results for one competition.
pub trait MatchSource {
    fn event_matches(
        &self,
        competition: &CompetitionKey,
        completed_only: bool,
    ) -> Result<Vec<AuthoritativeMatch>, AccuracyError>;
}

/// Resolves a request credential to an administrator flag.
pub trait Authorizer {
    /// `Ok(false)` for unknown or missing credentials; `Err` only when the
    /// lookup itself fails.
    fn is_admin(&self, credential: Option<&str>) -> Result<bool, AccuracyError>;
}
