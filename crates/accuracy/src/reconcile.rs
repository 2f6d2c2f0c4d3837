//! Reconcile recorded auto-line and endgame flags against match results.

use crate::join::Slot;
use crate::model::{
    AutoLine, AutoLineMismatch, EndgameMismatch, EndgameStatus, ScoutingForm, TeamGroup,
};

/// True when the recorded crossing disagrees with the results API.
pub fn auto_line_disagrees(recorded: bool, authoritative: AutoLine) -> bool {
    recorded != authoritative.crossed()
}

/// True when the recorded endgame flags are inconsistent with `status`.
///
/// Consistent combinations: neither flag with `None`, only `parked` with
/// `Parked`, only `climbed` with any climb value. Setting both flags is
/// never consistent.
pub fn endgame_disagrees(climbed: bool, parked: bool, status: &EndgameStatus) -> bool {
    let is_none = matches!(status, EndgameStatus::None);
    let is_parked = matches!(status, EndgameStatus::Parked);

    (climbed && (is_parked || is_none))
        || (parked && !is_parked)
        || (!parked && !climbed && !is_none)
}

/// One entry per form in the group whose crossing flag disagrees.
///
/// `None` when the breakdown has no auto-line value for the slot and the
/// check could not run.
pub fn check_auto_line(group: &TeamGroup, slot: &Slot<'_>) -> Option<Vec<AutoLineMismatch>> {
    let Some(authoritative) = slot.breakdown.auto_line[slot.index] else {
        log::debug!(
            "match {} team {}: no auto-line value for {} robot {}",
            group.match_number,
            group.team_number,
            slot.alliance,
            slot.robot()
        );
        return None;
    };

    let found = group
        .forms
        .iter()
        .filter(|form| auto_line_disagrees(form.crossed_initiation_line, authoritative))
        .map(|form| AutoLineMismatch {
            form_id: form.id.clone(),
            match_number: group.match_number,
            team_number: group.team_number,
            alliance: slot.alliance,
            robot: slot.robot(),
            recorded: form.crossed_initiation_line,
            authoritative,
        })
        .collect();
    Some(found)
}

/// One entry per form in the group whose endgame flags disagree, or `None`
/// without an endgame value for the slot.
pub fn check_endgame(group: &TeamGroup, slot: &Slot<'_>) -> Option<Vec<EndgameMismatch>> {
    let Some(status) = &slot.breakdown.endgame[slot.index] else {
        log::debug!(
            "match {} team {}: no endgame value for {} robot {}",
            group.match_number,
            group.team_number,
            slot.alliance,
            slot.robot()
        );
        return None;
    };

    let found = group
        .forms
        .iter()
        .filter(|form| endgame_disagrees(form.climbed, form.parked, status))
        .map(|form: &ScoutingForm| EndgameMismatch {
            form_id: form.id.clone(),
            match_number: group.match_number,
            team_number: group.team_number,
            alliance: slot.alliance,
            robot: slot.robot(),
            recorded: form.endgame_claim(),
            authoritative: status.clone(),
        })
        .collect();
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::MatchIndex;
    use crate::model::{Alliance, EndgameClaim};
    use crate::test_support::{alliance, breakdown, form, played};

    #[test]
    fn endgame_consistency_table() {
        let climb = EndgameStatus::Climbed("StageLeft".into());
        let cases = [
            // (climbed, parked, status, disagrees)
            (false, false, EndgameStatus::None, false),
            (false, false, EndgameStatus::Parked, true),
            (false, false, climb.clone(), true),
            (false, true, EndgameStatus::None, true),
            (false, true, EndgameStatus::Parked, false),
            (false, true, climb.clone(), true),
            (true, false, EndgameStatus::None, true),
            (true, false, EndgameStatus::Parked, true),
            (true, false, climb.clone(), false),
            (true, true, EndgameStatus::None, true),
            (true, true, EndgameStatus::Parked, true),
            (true, true, climb, true),
        ];
        for (climbed, parked, status, expected) in cases {
            assert_eq!(
                endgame_disagrees(climbed, parked, &status),
                expected,
                "climbed={climbed} parked={parked} status={status}"
            );
        }
    }

    #[test]
    fn auto_line_flags_every_disagreeing_form() {
        let m = played(
            3,
            alliance([1, 2, 3], Some(breakdown(["No", "Yes", "No"], ["None"; 3]))),
            alliance([4, 5, 6], Some(breakdown(["No"; 3], ["None"; 3]))),
        );
        let matches = vec![m];
        let index = MatchIndex::build(&matches);
        let joined = index.join(3).unwrap();

        let mut a = form("a", 3, 2, Alliance::Blue);
        a.crossed_initiation_line = true;
        let b = form("b", 3, 2, Alliance::Blue);
        let c = form("c", 3, 2, Alliance::Blue);
        let group = TeamGroup { match_number: 3, team_number: 2, forms: vec![a, b, c] };

        let slot = joined.locate(2).unwrap();
        let found = check_auto_line(&group, &slot).unwrap();
        let ids: Vec<&str> = found.iter().map(|m| m.form_id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
        assert_eq!(found[0].robot, 2);
        assert_eq!(found[0].authoritative, AutoLine::Yes);
        assert!(!found[0].recorded);
    }

    #[test]
    fn alliance_comes_from_results_not_form() {
        // Form says blue; results place the team on red.
        let m = played(
            8,
            alliance([1, 2, 3], Some(breakdown(["No"; 3], ["None"; 3]))),
            alliance([4, 5, 6], Some(breakdown(["No", "No", "Yes"], ["None", "None", "Parked"]))),
        );
        let matches = vec![m];
        let index = MatchIndex::build(&matches);
        let joined = index.join(8).unwrap();
        let slot = joined.locate(6).unwrap();

        let mut f = form("x", 8, 6, Alliance::Blue);
        f.crossed_initiation_line = true;
        f.parked = true;
        let group = TeamGroup { match_number: 8, team_number: 6, forms: vec![f] };

        assert_eq!(check_auto_line(&group, &slot), Some(vec![]));
        assert_eq!(check_endgame(&group, &slot), Some(vec![]));
        assert_eq!(slot.alliance, Alliance::Red);
    }

    #[test]
    fn endgame_entry_carries_claim_and_status() {
        let m = played(
            2,
            alliance([1, 2, 3], Some(breakdown(["No"; 3], ["CenterStage", "None", "None"]))),
            alliance([4, 5, 6], Some(breakdown(["No"; 3], ["None"; 3]))),
        );
        let matches = vec![m];
        let index = MatchIndex::build(&matches);
        let joined = index.join(2).unwrap();
        let slot = joined.locate(1).unwrap();

        let mut f = form("p", 2, 1, Alliance::Blue);
        f.parked = true;
        let group = TeamGroup { match_number: 2, team_number: 1, forms: vec![f] };

        let found = check_endgame(&group, &slot).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].recorded, EndgameClaim::Parked);
        assert_eq!(found[0].authoritative, EndgameStatus::Climbed("CenterStage".into()));
        assert_eq!(found[0].robot, 1);
    }

    #[test]
    fn missing_slot_value_means_check_did_not_run() {
        let mut bd = breakdown(["Yes"; 3], ["None"; 3]);
        bd.auto_line[0] = None;
        bd.endgame[0] = None;
        let m = played(
            1,
            alliance([1, 2, 3], Some(bd)),
            alliance([4, 5, 6], Some(breakdown(["No"; 3], ["None"; 3]))),
        );
        let matches = vec![m];
        let index = MatchIndex::build(&matches);
        let joined = index.join(1).unwrap();
        let slot = joined.locate(1).unwrap();

        let mut f = form("q", 1, 1, Alliance::Blue);
        f.climbed = true;
        f.crossed_initiation_line = true;
        let group = TeamGroup { match_number: 1, team_number: 1, forms: vec![f] };
        assert_eq!(check_auto_line(&group, &slot), None);
        assert_eq!(check_endgame(&group, &slot), None);

        // Slot 2 still has both values.
        let slot = joined.locate(2).unwrap();
        let mut g = form("r", 1, 2, Alliance::Blue);
        g.crossed_initiation_line = true;
        let group = TeamGroup { match_number: 1, team_number: 2, forms: vec![g] };
        assert_eq!(check_auto_line(&group, &slot), Some(vec![]));
        assert_eq!(check_endgame(&group, &slot), Some(vec![]));
    }
}
