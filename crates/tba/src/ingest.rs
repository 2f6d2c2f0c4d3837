//! TBA match payloads and their conversion into engine records.

use serde::Deserialize;
use serde_json::{Map, Value};

use standscout_accuracy::model::{AllianceBreakdown, AllianceResult, AutoLine, EndgameStatus};
use standscout_accuracy::AuthoritativeMatch;

/// Comp level of qualification matches, the only ones stand forms number.
const QUALIFICATION: &str = "qm";

/// One element of `GET /event/{key}/matches`. Unused fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TbaMatch {
    pub key: String,
    #[serde(default)]
    pub comp_level: String,
    pub match_number: u32,
    pub alliances: TbaAlliances,
    #[serde(default)]
    pub score_breakdown: Option<TbaScoreBreakdown>,
    #[serde(default)]
    pub actual_time: Option<i64>,
    #[serde(default)]
    pub post_result_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TbaAlliances {
    pub blue: TbaAlliance,
    pub red: TbaAlliance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TbaAlliance {
    #[serde(default)]
    pub team_keys: Vec<String>,
}

/// Season-specific breakdown objects, kept as raw JSON maps.
#[derive(Debug, Clone, Deserialize)]
pub struct TbaScoreBreakdown {
    #[serde(default)]
    pub blue: Option<Map<String, Value>>,
    #[serde(default)]
    pub red: Option<Map<String, Value>>,
}

/// A match counts as played once it has a start time, a posted result or a
/// score breakdown.
pub fn is_completed(m: &TbaMatch) -> bool {
    m.actual_time.is_some() || m.post_result_time.is_some() || m.score_breakdown.is_some()
}

/// Convert one payload. An alliance that does not list three teams is kept
/// as is; the engine reports its forms as unverifiable.
pub fn ingest_match(m: TbaMatch) -> AuthoritativeMatch {
    let (blue_breakdown, red_breakdown) = match m.score_breakdown {
        Some(sb) => (sb.blue, sb.red),
        None => (None, None),
    };

    let blue = alliance_result(&m.key, m.alliances.blue, blue_breakdown);
    let red = alliance_result(&m.key, m.alliances.red, red_breakdown);

    AuthoritativeMatch {
        key: m.key,
        comp_level: m.comp_level,
        match_number: m.match_number,
        blue,
        red,
    }
}

fn alliance_result(
    match_key: &str,
    alliance: TbaAlliance,
    breakdown: Option<Map<String, Value>>,
) -> AllianceResult {
    let count = alliance.team_keys.len();
    if count != 3 {
        log::warn!("{match_key}: alliance lists {count} teams, expected 3");
    }

    AllianceResult {
        team_keys: alliance.team_keys,
        breakdown: breakdown.as_ref().map(slot_breakdown),
    }
}

/// Read `autoLineRobotN` / `endGameRobotN` into slot triples.
fn slot_breakdown(raw: &Map<String, Value>) -> AllianceBreakdown {
    let field = |prefix: &str, robot: usize| {
        raw.get(&format!("{prefix}{robot}")).and_then(Value::as_str)
    };

    AllianceBreakdown {
        auto_line: [1, 2, 3].map(|robot| field("autoLineRobot", robot).and_then(AutoLine::parse)),
        endgame: [1, 2, 3].map(|robot| field("endGameRobot", robot).map(EndgameStatus::parse)),
    }
}

/// Convert a full event listing.
///
/// Keeps qualification matches only: playoff matches reuse small match
/// numbers and would collide with them.
pub fn ingest_matches(raw: Vec<TbaMatch>, completed_only: bool) -> Vec<AuthoritativeMatch> {
    let total = raw.len();
    let matches: Vec<AuthoritativeMatch> = raw
        .into_iter()
        .filter(|m| {
            if m.comp_level != QUALIFICATION {
                log::debug!("{}: not a qualification match, ignored", m.key);
                return false;
            }
            !completed_only || is_completed(m)
        })
        .map(ingest_match)
        .collect();
    log::debug!("ingested {} of {} TBA matches", matches.len(), total);
    matches
}
