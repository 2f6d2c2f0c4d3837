use std::path::Path;

use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use standscout_accuracy::model::{Alliance, MatchNumber};
use standscout_accuracy::{CompetitionKey, Observations, ScoutingForm};

use crate::users::User;
use crate::{SqliteStore, StoreError};

const FORM_COLUMNS: &str = "id, competition, match_number, team_number, alliance, observations, \
     crossed_initiation_line, climbed, parked, scout_score, scouter, verified";

/// Counts from a JSON import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    /// Ids already present; existing rows are left untouched.
    pub skipped: usize,
}

/// Raw column values, converted to a form outside the row callback.
struct FormRow {
    id: String,
    competition: String,
    match_number: i64,
    team_number: i64,
    alliance: String,
    observations: String,
    crossed_initiation_line: bool,
    climbed: bool,
    parked: bool,
    scout_score: f64,
    scouter: Option<String>,
    verified: bool,
}

impl FormRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            competition: row.get(1)?,
            match_number: row.get(2)?,
            team_number: row.get(3)?,
            alliance: row.get(4)?,
            observations: row.get(5)?,
            crossed_initiation_line: row.get(6)?,
            climbed: row.get(7)?,
            parked: row.get(8)?,
            scout_score: row.get(9)?,
            scouter: row.get(10)?,
            verified: row.get(11)?,
        })
    }

    fn into_form(self) -> Result<ScoutingForm, StoreError> {
        let alliance = Alliance::parse(&self.alliance).ok_or_else(|| {
            StoreError::Parse(format!("form {}: bad alliance '{}'", self.id, self.alliance))
        })?;
        let observations: Observations = serde_json::from_str(&self.observations)?;
        Ok(ScoutingForm {
            id: self.id,
            competition: self.competition,
            match_number: self.match_number as MatchNumber,
            team_number: self.team_number as u32,
            alliance,
            observations,
            crossed_initiation_line: self.crossed_initiation_line,
            climbed: self.climbed,
            parked: self.parked,
            scout_score: self.scout_score,
            scouter: self.scouter,
            verified: self.verified,
        })
    }
}

/// Whether `user` may edit `form`.
///
/// Administrators may edit any form. The original scouter may edit their own
/// form until it has been verified.
pub fn can_edit(user: &User, form: &ScoutingForm) -> bool {
    if user.admin {
        return true;
    }
    form.scouter.as_deref() == Some(user.id.as_str()) && !form.verified
}

impl SqliteStore {
    /// Insert one form. Returns `false` when a form with this id exists.
    pub fn insert_form(&self, form: &ScoutingForm) -> Result<bool, StoreError> {
        CompetitionKey::parse(&form.competition)
            .map_err(|e| StoreError::Invalid(format!("form {}: {e}", form.id)))?;
        let observations = serde_json::to_string(&form.observations)?;

        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO stand_forms (id, competition, match_number, team_number, alliance, observations, crossed_initiation_line, climbed, parked, scout_score, scouter, verified, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                form.id,
                form.competition,
                form.match_number,
                form.team_number,
                form.alliance.as_str(),
                observations,
                form.crossed_initiation_line,
                form.climbed,
                form.parked,
                form.scout_score,
                form.scouter,
                form.verified,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(changed == 1)
    }

    /// Import a JSON array of forms (document-store export shape).
    ///
    /// `competition` fills in forms exported without one.
    pub fn import_json(
        &self,
        json: &str,
        competition: Option<&CompetitionKey>,
    ) -> Result<ImportSummary, StoreError> {
        let mut forms: Vec<ScoutingForm> = serde_json::from_str(json)?;
        let mut summary = ImportSummary::default();

        self.conn.execute("BEGIN TRANSACTION", [])?;
        let result: Result<(), StoreError> = (|| {
            for form in &mut forms {
                if form.competition.is_empty() {
                    match competition {
                        Some(key) => form.competition = key.to_string(),
                        None => {
                            return Err(StoreError::MissingCompetition(form.id.clone()))
                        }
                    }
                }
                if self.insert_form(form)? {
                    summary.inserted += 1;
                } else {
                    log::debug!("form {} already stored, skipping", form.id);
                    summary.skipped += 1;
                }
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                self.conn.execute("COMMIT", [])?;
                log::info!("imported {} forms ({} skipped)", summary.inserted, summary.skipped);
                Ok(summary)
            }
            Err(e) => {
                self.conn.execute("ROLLBACK", [])?;
                Err(e)
            }
        }
    }

    pub fn import_file(
        &self,
        path: &Path,
        competition: Option<&CompetitionKey>,
    ) -> Result<ImportSummary, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("cannot read {}: {e}", path.display())))?;
        self.import_json(&json, competition)
    }

    pub fn get_form(&self, id: &str) -> Result<ScoutingForm, StoreError> {
        let sql = format!("SELECT {FORM_COLUMNS} FROM stand_forms WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], FormRow::from_row)
            .optional()?
            .ok_or_else(|| StoreError::FormNotFound(id.to_string()))?
            .into_form()
    }

    /// Forms of one match, ordered by team then insertion.
    pub fn forms_for_match(
        &self,
        competition: &CompetitionKey,
        match_number: MatchNumber,
    ) -> Result<Vec<ScoutingForm>, StoreError> {
        let sql = format!(
            "SELECT {FORM_COLUMNS} FROM stand_forms WHERE competition = ?1 AND match_number = ?2 ORDER BY team_number, rowid"
        );
        self.query_forms(&sql, params![competition.as_str(), match_number])
    }

    /// Every form of a competition in insertion order.
    pub fn competition_forms(
        &self,
        competition: &CompetitionKey,
    ) -> Result<Vec<ScoutingForm>, StoreError> {
        let sql = format!("SELECT {FORM_COLUMNS} FROM stand_forms WHERE competition = ?1 ORDER BY rowid");
        self.query_forms(&sql, params![competition.as_str()])
    }

    fn query_forms(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ScoutingForm>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, FormRow::from_row)?;
        let mut forms = Vec::new();
        for row in rows {
            forms.push(row?.into_form()?);
        }
        Ok(forms)
    }

    /// Replace a stored form's recorded values on behalf of the token holder.
    ///
    /// Identity, competition, scouter and verification state are kept from
    /// the stored row.
    pub fn update_form(&self, form: &ScoutingForm, token: &str) -> Result<(), StoreError> {
        let user = self.user_by_token(token)?.ok_or(StoreError::UnknownToken)?;
        let stored = self.get_form(&form.id)?;
        if !can_edit(&user, &stored) {
            let reason = if stored.verified {
                "form is verified; only an administrator can edit it"
            } else {
                "only the original scouter or an administrator can edit this form"
            };
            return Err(StoreError::Forbidden(reason.to_string()));
        }

        let observations = serde_json::to_string(&form.observations)?;
        self.conn.execute(
            "UPDATE stand_forms SET match_number = ?2, team_number = ?3, alliance = ?4, observations = ?5, crossed_initiation_line = ?6, climbed = ?7, parked = ?8, scout_score = ?9, updated_at = ?10 WHERE id = ?1",
            params![
                form.id,
                form.match_number,
                form.team_number,
                form.alliance.as_str(),
                observations,
                form.crossed_initiation_line,
                form.climbed,
                form.parked,
                form.scout_score,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        log::info!("form {} updated by {}", form.id, user.name);
        Ok(())
    }

    /// Mark a form verified. Administrators only.
    pub fn verify_form(&self, id: &str, token: &str) -> Result<(), StoreError> {
        let user = self.user_by_token(token)?.ok_or(StoreError::UnknownToken)?;
        if !user.admin {
            return Err(StoreError::Forbidden(
                "only an administrator can verify forms".to_string(),
            ));
        }
        let changed = self.conn.execute(
            "UPDATE stand_forms SET verified = 1, updated_at = ?2 WHERE id = ?1",
            params![id, chrono::Utc::now().to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(StoreError::FormNotFound(id.to_string()));
        }
        Ok(())
    }
}
