//! Per-team averages over a competition's stand forms.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use standscout_accuracy::model::{EndgameClaim, TeamNumber};
use standscout_accuracy::{CompetitionKey, Observations, ScoutingForm};

use crate::{SqliteStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team_number: TeamNumber,
    pub forms: usize,
    /// Distinct matches the team was scouted in.
    pub matches: usize,
    /// Mean of every tracked field, keyed by wire name.
    pub averages: BTreeMap<&'static str, f64>,
    /// Share of forms recording an auto-line crossing, 0.0 to 1.0.
    pub auto_line_rate: f64,
    pub scout_score: f64,
    /// Most frequent endgame claim. Ties go to the claim recorded first.
    pub end_position: EndgameClaim,
}

/// One summary per team, ordered by team number.
pub fn summarize_teams(forms: &[ScoutingForm]) -> Vec<TeamSummary> {
    let mut by_team: BTreeMap<TeamNumber, Vec<&ScoutingForm>> = BTreeMap::new();
    for form in forms {
        by_team.entry(form.team_number).or_default().push(form);
    }
    by_team
        .into_iter()
        .map(|(team, forms)| summarize(team, &forms))
        .collect()
}

fn summarize(team_number: TeamNumber, forms: &[&ScoutingForm]) -> TeamSummary {
    let count = forms.len() as f64;

    let mut totals: BTreeMap<&'static str, u64> =
        Observations::FIELD_NAMES.iter().map(|&name| (name, 0)).collect();
    for form in forms {
        for (name, value) in form.observations.values() {
            *totals.entry(name).or_default() += u64::from(value);
        }
    }

    let matches: BTreeSet<_> = forms.iter().map(|f| f.match_number).collect();
    let crossed = forms.iter().filter(|f| f.crossed_initiation_line).count();

    TeamSummary {
        team_number,
        forms: forms.len(),
        matches: matches.len(),
        averages: totals
            .into_iter()
            .map(|(name, total)| (name, total as f64 / count))
            .collect(),
        auto_line_rate: crossed as f64 / count,
        scout_score: forms.iter().map(|f| f.scout_score).sum::<f64>() / count,
        end_position: most_common_end_position(forms),
    }
}

fn most_common_end_position(forms: &[&ScoutingForm]) -> EndgameClaim {
    // First-seen order, so reversing before max_by_key keeps the earliest tie.
    let mut counts: Vec<(EndgameClaim, usize)> = Vec::new();
    for form in forms {
        let claim = form.endgame_claim();
        match counts.iter_mut().find(|(c, _)| *c == claim) {
            Some((_, n)) => *n += 1,
            None => counts.push((claim, 1)),
        }
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(claim, _)| claim)
        .unwrap_or(EndgameClaim::Neither)
}

impl SqliteStore {
    pub fn team_summaries(
        &self,
        competition: &CompetitionKey,
    ) -> Result<Vec<TeamSummary>, StoreError> {
        let forms = self.competition_forms(competition)?;
        log::debug!("summarizing {} forms for {}", forms.len(), competition);
        Ok(summarize_teams(&forms))
    }
}
