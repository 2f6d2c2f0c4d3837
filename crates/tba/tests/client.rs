use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use standscout_accuracy::model::{AutoLine, EndgameStatus};
use standscout_accuracy::{CompetitionKey, MatchSource};
use standscout_tba::{TbaClient, TbaError};

fn event() -> CompetitionKey {
    CompetitionKey::parse("2024txdal").unwrap()
}

fn client(server: &MockServer) -> TbaClient {
    TbaClient::with_base_url("tba_test_key".into(), server.url("/api/v3"))
        .unwrap()
        .with_retry(2, Duration::from_millis(1))
}

// ── Helper: build a TBA-shaped match ─────────────────────────────

fn tba_match(comp_level: &str, n: u32, played: bool) -> serde_json::Value {
    json!({
        "key": format!("2024txdal_{comp_level}{n}"),
        "comp_level": comp_level,
        "set_number": 1,
        "match_number": n,
        "alliances": {
            "blue": {"team_keys": ["frc118", "frc254", "frc148"], "score": if played { 70 } else { -1 }},
            "red": {"team_keys": ["frc1678", "frc971", "frc604"], "score": if played { 52 } else { -1 }}
        },
        "score_breakdown": if played {
            json!({
                "blue": {
                    "autoLineRobot1": "No", "autoLineRobot2": "Yes", "autoLineRobot3": "No",
                    "endGameRobot1": "None", "endGameRobot2": "Parked", "endGameRobot3": "StageRight"
                },
                "red": {
                    "autoLineRobot1": "Yes", "autoLineRobot2": "Yes", "autoLineRobot3": "Yes",
                    "endGameRobot1": "None", "endGameRobot2": "None", "endGameRobot3": "None"
                }
            })
        } else {
            serde_json::Value::Null
        },
        "actual_time": if played { json!(1710000000) } else { serde_json::Value::Null },
        "post_result_time": serde_json::Value::Null
    })
}

// ── Fetch + ingest ───────────────────────────────────────────────

#[test]
fn fetches_completed_qualification_matches() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/event/2024txdal/matches")
            .header("X-TBA-Auth-Key", "tba_test_key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([
                tba_match("qm", 10, true),
                tba_match("qm", 11, false),
                tba_match("sf", 1, true),
            ]));
    });

    let matches = client(&server).event_matches(&event(), true).unwrap();

    mock.assert();
    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.match_number, 10);
    assert_eq!(m.blue.slot_of(254), Some(1));
    let blue = m.blue.breakdown.as_ref().unwrap();
    assert_eq!(blue.auto_line[1], Some(AutoLine::Yes));
    assert_eq!(blue.endgame[1], Some(EndgameStatus::Parked));
    assert_eq!(blue.endgame[2], Some(EndgameStatus::Climbed("StageRight".into())));
}

#[test]
fn completed_only_false_keeps_unplayed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(200)
            .json_body(json!([tba_match("qm", 10, true), tba_match("qm", 11, false)]));
    });

    let matches = client(&server).fetch_event_matches(&event(), false).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches[1].blue.breakdown.is_none());
}

// ── Error classification ─────────────────────────────────────────

#[test]
fn unauthorized_fails_without_retry() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(401).json_body(json!({"Error": "X-TBA-Auth-Key is invalid."}));
    });

    let err = client(&server).fetch_event_matches(&event(), true).unwrap_err();
    mock.assert_calls(1);
    match err {
        TbaError::Auth(401, msg) => assert!(msg.contains("invalid"), "{msg}"),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[test]
fn unknown_event_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(404).json_body(json!({"Error": "event not found"}));
    });

    let err = client(&server).fetch_event_matches(&event(), true).unwrap_err();
    assert!(matches!(err, TbaError::NotFound(_)), "{err}");
    assert!(err.to_string().contains("event/2024txdal/matches"));
}

#[test]
fn rate_limit_retries_then_fails() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(429).header("retry-after", "0");
    });

    let err = client(&server).fetch_event_matches(&event(), true).unwrap_err();
    // 1 initial + 2 retries
    mock.assert_calls(3);
    assert!(matches!(err, TbaError::RateLimited { attempts: 3 }), "{err}");
}

#[test]
fn server_error_retries_then_fails() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(503);
    });

    let err = client(&server).fetch_event_matches(&event(), true).unwrap_err();
    mock.assert_calls(3);
    assert!(matches!(err, TbaError::Http(503, _)), "{err}");
}

#[test]
fn malformed_body_is_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(200).body("<html>maintenance</html>");
    });

    let err = client(&server).fetch_event_matches(&event(), true).unwrap_err();
    assert!(matches!(err, TbaError::Parse(_)), "{err}");
}

#[test]
fn match_source_errors_become_engine_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v3/event/2024txdal/matches");
        then.status(403).json_body(json!({"Error": "forbidden"}));
    });

    let err = client(&server).event_matches(&event(), true).unwrap_err();
    assert!(err.to_string().starts_with("match source error: TBA auth failed (403)"), "{err}");
}
