use std::collections::BTreeMap;

use crate::model::{
    Alliance, AllianceGroup, AlliancePair, MatchNumber, ScoutingForm, TeamGroup, TeamNumber,
};

/// Group forms by (match, team). Forms keep their input order inside a group.
pub fn group_by_team(forms: &[ScoutingForm]) -> Vec<TeamGroup> {
    let mut groups: BTreeMap<(MatchNumber, TeamNumber), Vec<ScoutingForm>> = BTreeMap::new();

    for form in forms {
        groups
            .entry((form.match_number, form.team_number))
            .or_default()
            .push(form.clone());
    }

    groups
        .into_iter()
        .map(|((match_number, team_number), forms)| TeamGroup {
            match_number,
            team_number,
            forms,
        })
        .collect()
}

/// Group forms by (match, alliance color as recorded on the form).
pub fn group_by_alliance(forms: &[ScoutingForm]) -> Vec<AllianceGroup> {
    let mut groups: BTreeMap<(MatchNumber, Alliance), Vec<ScoutingForm>> = BTreeMap::new();

    for form in forms {
        groups
            .entry((form.match_number, form.alliance))
            .or_default()
            .push(form.clone());
    }

    groups
        .into_iter()
        .map(|((match_number, alliance), forms)| AllianceGroup {
            match_number,
            alliance,
            forms,
        })
        .collect()
}

/// Split a full alliance group into per-team pairs.
///
/// Returns `None` unless the group holds exactly `expected` forms. The forms
/// are sorted by team number (stable) and paired consecutively; each pair is
/// labelled with the team of its first form.
pub fn pair_alliance_group(group: &AllianceGroup, expected: usize) -> Option<Vec<AlliancePair<'_>>> {
    if group.forms.len() != expected {
        return None;
    }

    let mut sorted: Vec<&ScoutingForm> = group.forms.iter().collect();
    sorted.sort_by_key(|f| f.team_number);

    Some(
        sorted
            .chunks_exact(2)
            .map(|pair| AlliancePair {
                match_number: group.match_number,
                team_number: pair[0].team_number,
                forms: [pair[0], pair[1]],
            })
            .collect(),
    )
}
