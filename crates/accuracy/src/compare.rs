use crate::model::{CrossFormMismatch, ScoutingForm, TeamGroup};

/// First tracked value on which `other` disagrees with `reference`.
///
/// Scout score is checked first, then the observation fields in schema
/// order. Equality is strict: `0.5 != 0.50000001`, and NaN never matches.
pub fn first_divergence(reference: &ScoutingForm, other: &ScoutingForm) -> Option<&'static str> {
    if reference.scout_score != other.scout_score {
        return Some("scoutScore");
    }
    reference.observations.first_divergence(&other.observations)
}

/// Compare every form in a (match, team) group against the first one.
///
/// Stops at the first form that diverges; at most one entry per group.
pub fn check_group(group: &TeamGroup) -> Option<CrossFormMismatch> {
    let (reference, rest) = group.forms.split_first()?;

    rest.iter().find_map(|form| {
        first_divergence(reference, form).map(|field| CrossFormMismatch {
            match_number: group.match_number,
            team_number: group.team_number,
            form_id: form.id.clone(),
            field,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Alliance;
    use crate::test_support::form;

    fn group(forms: Vec<ScoutingForm>) -> TeamGroup {
        TeamGroup {
            match_number: forms[0].match_number,
            team_number: forms[0].team_number,
            forms,
        }
    }

    #[test]
    fn identical_forms_agree() {
        let mut a = form("a", 4, 254, Alliance::Blue);
        a.observations.teleop_speaker_notes = 7;
        a.scout_score = 3.0;
        let mut b = a.clone();
        b.id = "b".into();
        assert_eq!(check_group(&group(vec![a, b])), None);
    }

    #[test]
    fn single_form_group_is_never_a_mismatch() {
        assert_eq!(check_group(&group(vec![form("a", 4, 254, Alliance::Blue)])), None);
    }

    #[test]
    fn score_divergence_is_reported_first() {
        let a = form("a", 4, 254, Alliance::Blue);
        let mut b = form("b", 4, 254, Alliance::Blue);
        b.scout_score = 2.0;
        b.observations.trap_notes = 1;
        let m = check_group(&group(vec![a, b])).unwrap();
        assert_eq!(m.field, "scoutScore");
        assert_eq!(m.form_id, "b");
        assert_eq!((m.match_number, m.team_number), (4, 254));
    }

    #[test]
    fn stops_at_first_diverging_form() {
        let a = form("a", 4, 254, Alliance::Blue);
        let b = form("b", 4, 254, Alliance::Blue);
        let mut c = form("c", 4, 254, Alliance::Blue);
        c.observations.shuttle_notes = 2;
        let mut d = form("d", 4, 254, Alliance::Blue);
        d.observations.trap_attempts = 1;
        let m = check_group(&group(vec![a, b, c, d])).unwrap();
        assert_eq!(m.form_id, "c");
        assert_eq!(m.field, "shuttleNotes");
    }

    #[test]
    fn endgame_flags_are_not_tracked_fields() {
        // Auto-line and endgame flags are reconciled against match results,
        // not between scouts.
        let a = form("a", 4, 254, Alliance::Blue);
        let mut b = form("b", 4, 254, Alliance::Blue);
        b.climbed = true;
        b.crossed_initiation_line = true;
        assert_eq!(check_group(&group(vec![a, b])), None);
    }
}
