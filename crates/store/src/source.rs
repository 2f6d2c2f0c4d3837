//! Engine collaborators backed by the store.

use standscout_accuracy::{
    group_by_alliance, group_by_team, AccuracyError, AllianceGroup, Authorizer, CompetitionKey,
    FormStore, TeamGroup,
};

use crate::SqliteStore;

impl FormStore for SqliteStore {
    fn forms_by_team(&self, competition: &CompetitionKey) -> Result<Vec<TeamGroup>, AccuracyError> {
        let forms = self.competition_forms(competition)?;
        Ok(group_by_team(&forms))
    }

    fn forms_by_alliance(
        &self,
        competition: &CompetitionKey,
    ) -> Result<Vec<AllianceGroup>, AccuracyError> {
        let forms = self.competition_forms(competition)?;
        Ok(group_by_alliance(&forms))
    }
}

impl Authorizer for SqliteStore {
    fn is_admin(&self, credential: Option<&str>) -> Result<bool, AccuracyError> {
        let Some(token) = credential else {
            return Ok(false);
        };
        let user = self
            .user_by_token(token)
            .map_err(|e| AccuracyError::Identity(e.to_string()))?;
        Ok(user.is_some_and(|u| u.admin))
    }
}
