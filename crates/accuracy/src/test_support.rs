//! Builders shared by the unit tests.

use crate::fields::Observations;
use crate::model::{
    Alliance, AllianceBreakdown, AllianceResult, AuthoritativeMatch, AutoLine, EndgameStatus,
    ScoutingForm,
};

pub fn form(id: &str, match_number: u32, team: u32, alliance: Alliance) -> ScoutingForm {
    ScoutingForm {
        id: id.into(),
        competition: "2024txdal".into(),
        match_number,
        team_number: team,
        alliance,
        observations: Observations::default(),
        crossed_initiation_line: false,
        climbed: false,
        parked: false,
        scout_score: 0.0,
        scouter: None,
        verified: false,
    }
}

pub fn breakdown(auto: [&str; 3], endgame: [&str; 3]) -> AllianceBreakdown {
    AllianceBreakdown {
        auto_line: auto.map(AutoLine::parse),
        endgame: endgame.map(|s| Some(EndgameStatus::parse(s))),
    }
}

pub fn alliance(teams: [u32; 3], breakdown: Option<AllianceBreakdown>) -> AllianceResult {
    AllianceResult {
        team_keys: teams.iter().map(|t| format!("frc{t}")).collect(),
        breakdown,
    }
}

pub fn played(match_number: u32, blue: AllianceResult, red: AllianceResult) -> AuthoritativeMatch {
    AuthoritativeMatch {
        key: format!("2024txdal_qm{match_number}"),
        comp_level: "qm".into(),
        match_number,
        blue,
        red,
    }
}
