// Property-based tests for the accuracy checks.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use standscout_accuracy::compare::check_group;
use standscout_accuracy::model::{
    Alliance, AllianceBreakdown, AllianceResult, AutoLine, EndgameStatus,
};
use standscout_accuracy::reconcile::{auto_line_disagrees, endgame_disagrees};
use standscout_accuracy::{
    group_by_alliance, group_by_team, run, AccuracyInput, AuthoritativeMatch, CheckOptions,
    CompetitionKey, Observations, ScoutingForm, TeamGroup,
};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_observations() -> impl Strategy<Value = Observations> {
    prop::array::uniform11(0u32..12).prop_map(|v| Observations {
        auto_amp_notes: v[0],
        auto_speaker_notes: v[1],
        auto_notes_missed: v[2],
        teleop_amp_notes: v[3],
        teleop_speaker_notes: v[4],
        teleop_amplified_speaker_notes: v[5],
        teleop_notes_missed: v[6],
        shuttle_notes: v[7],
        trap_notes: v[8],
        trap_attempts: v[9],
        number_on_chain: v[10],
    })
}

fn arb_auto_line() -> impl Strategy<Value = AutoLine> {
    prop_oneof![Just(AutoLine::Yes), Just(AutoLine::No)]
}

fn arb_endgame() -> impl Strategy<Value = EndgameStatus> {
    prop_oneof![
        Just(EndgameStatus::None),
        Just(EndgameStatus::Parked),
        Just(EndgameStatus::Climbed("StageLeft".into())),
        Just(EndgameStatus::Climbed("CenterStage".into())),
        Just(EndgameStatus::Climbed("StageRight".into())),
    ]
}

fn arb_breakdown() -> impl Strategy<Value = AllianceBreakdown> {
    (
        prop::array::uniform3(arb_auto_line()),
        prop::array::uniform3(arb_endgame()),
    )
        .prop_map(|(auto, endgame)| AllianceBreakdown {
            auto_line: auto.map(Some),
            endgame: endgame.map(Some),
        })
}

fn form(id: String, match_number: u32, team: u32, observations: Observations) -> ScoutingForm {
    ScoutingForm {
        id,
        competition: "2024txdal".into(),
        match_number,
        team_number: team,
        alliance: if team <= 3 { Alliance::Blue } else { Alliance::Red },
        observations,
        crossed_initiation_line: false,
        climbed: false,
        parked: false,
        scout_score: 0.0,
        scouter: None,
        verified: false,
    }
}

/// Change exactly one tracked value: 0 = scout score, 1..=11 = observations.
fn perturb(form: &mut ScoutingForm, which: usize) {
    let o = &mut form.observations;
    match which {
        0 => form.scout_score += 0.5,
        1 => o.auto_amp_notes += 1,
        2 => o.auto_speaker_notes += 1,
        3 => o.auto_notes_missed += 1,
        4 => o.teleop_amp_notes += 1,
        5 => o.teleop_speaker_notes += 1,
        6 => o.teleop_amplified_speaker_notes += 1,
        7 => o.teleop_notes_missed += 1,
        8 => o.shuttle_notes += 1,
        9 => o.trap_notes += 1,
        10 => o.trap_attempts += 1,
        _ => o.number_on_chain += 1,
    }
}

fn team_group(forms: Vec<ScoutingForm>) -> TeamGroup {
    TeamGroup { match_number: 1, team_number: 254, forms }
}

// ---------------------------------------------------------------------------
// Cross-form equality
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn equal_forms_never_mismatch(obs in arb_observations(), copies in 2usize..5) {
        let forms = (0..copies).map(|i| form(format!("f{i}"), 1, 254, obs.clone())).collect();
        prop_assert_eq!(check_group(&team_group(forms)), None);
    }

    #[test]
    fn one_differing_field_gives_one_entry(
        obs in arb_observations(),
        copies in 2usize..5,
        which in 0usize..12,
        target in 1usize..5,
    ) {
        let target = target.min(copies - 1);
        let mut forms: Vec<_> =
            (0..copies).map(|i| form(format!("f{i}"), 1, 254, obs.clone())).collect();
        perturb(&mut forms[target], which);

        let mismatch = check_group(&team_group(forms.clone()));
        prop_assert!(mismatch.is_some());
        let mismatch = mismatch.unwrap();
        prop_assert_eq!(mismatch.form_id, format!("f{target}"));

        // A group yields at most one entry through the full pass as well.
        let input = AccuracyInput {
            competition: CompetitionKey::parse("2024txdal").unwrap(),
            team_groups: group_by_team(&forms),
            alliance_groups: group_by_alliance(&forms),
            matches: vec![],
        };
        prop_assert_eq!(run(&CheckOptions::default(), &input).mismatched_forms.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Auto-line and endgame
    // -----------------------------------------------------------------------

    #[test]
    fn auto_line_emits_iff_values_differ(recorded in any::<bool>(), auth in arb_auto_line()) {
        let differs = recorded != (auth == AutoLine::Yes);
        prop_assert_eq!(auto_line_disagrees(recorded, auth), differs);
        // Flipping either side flips the emission.
        prop_assert_eq!(auto_line_disagrees(!recorded, auth), !differs);
    }

    #[test]
    fn exactly_one_claim_is_consistent(status in arb_endgame()) {
        let consistent: Vec<(bool, bool)> = [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .filter(|&(climbed, parked)| !endgame_disagrees(climbed, parked, &status))
            .collect();
        let expected = match status {
            EndgameStatus::None => (false, false),
            EndgameStatus::Parked => (false, true),
            EndgameStatus::Climbed(_) => (true, false),
        };
        prop_assert_eq!(consistent, vec![expected]);
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    #[test]
    fn discrepancy_lists_sorted_and_stable(
        breakdowns in prop::collection::vec((arb_breakdown(), arb_breakdown()), 1..5),
        entries in prop::collection::vec((0usize..5, 1u32..7, any::<bool>(), any::<bool>(), any::<bool>()), 0..40),
    ) {
        let matches: Vec<AuthoritativeMatch> = breakdowns
            .into_iter()
            .enumerate()
            .map(|(i, (blue, red))| AuthoritativeMatch {
                key: format!("2024txdal_qm{}", i + 1),
                comp_level: "qm".into(),
                match_number: i as u32 + 1,
                blue: AllianceResult {
                    team_keys: vec!["frc1".into(), "frc2".into(), "frc3".into()],
                    breakdown: Some(blue),
                },
                red: AllianceResult {
                    team_keys: vec!["frc4".into(), "frc5".into(), "frc6".into()],
                    breakdown: Some(red),
                },
            })
            .collect();

        // Entries arrive in arbitrary match order; ids record input order.
        let forms: Vec<ScoutingForm> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (m, team, crossed, climbed, parked))| {
                let mut f = form(format!("{i:04}"), m as u32 + 1, team, Observations::default());
                f.crossed_initiation_line = crossed;
                f.climbed = climbed;
                f.parked = parked;
                f
            })
            .collect();

        let input = AccuracyInput {
            competition: CompetitionKey::parse("2024txdal").unwrap(),
            team_groups: group_by_team(&forms),
            alliance_groups: group_by_alliance(&forms),
            matches,
        };
        let report = run(&CheckOptions::default(), &input);

        let auto: Vec<(u32, u32, &str)> = report
            .mismatched_auto_line
            .iter()
            .map(|m| (m.match_number, m.team_number, m.form_id.as_str()))
            .collect();
        let endgame: Vec<(u32, u32, &str)> = report
            .mismatched_endgame
            .iter()
            .map(|m| (m.match_number, m.team_number, m.form_id.as_str()))
            .collect();

        // Non-decreasing in match; ties keep group order (team, then input order).
        for list in [&auto, &endgame] {
            for w in list.windows(2) {
                prop_assert!(w[0] <= w[1], "{:?} before {:?}", w[0], w[1]);
            }
        }
    }
}
