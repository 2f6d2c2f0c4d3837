use serde::{Deserialize, Serialize};

use crate::fields::Observations;

pub type MatchNumber = u32;
pub type TeamNumber = u32;

/// Per-robot values for one alliance, indexed by slot 0/1/2.
pub type SlotTriple<T> = [T; 3];

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Serializes lowercase; deserializes through [`Alliance::parse`] so imports
/// accept the same spellings the store does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Alliance {
    Blue,
    Red,
}

impl Alliance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            _ => None,
        }
    }
}

impl TryFrom<String> for Alliance {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("unknown alliance '{s}', expected blue or red"))
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stand-scouting submission for one team in one match.
///
/// Accepts the document-store export shape: `_id`, camelCase keys, and the
/// legacy `initiationLine` / `climb` / `park` names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutingForm {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub competition: String,
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub alliance: Alliance,
    #[serde(flatten)]
    pub observations: Observations,
    #[serde(default, alias = "initiationLine")]
    pub crossed_initiation_line: bool,
    #[serde(default, alias = "climb")]
    pub climbed: bool,
    #[serde(default, alias = "park")]
    pub parked: bool,
    #[serde(default)]
    pub scout_score: f64,
    /// User id of the submitting scout.
    #[serde(default)]
    pub scouter: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl ScoutingForm {
    pub fn endgame_claim(&self) -> EndgameClaim {
        EndgameClaim::from_flags(self.climbed, self.parked)
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Forms describing the same (match, team).
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGroup {
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub forms: Vec<ScoutingForm>,
}

/// Forms describing one alliance in one match (normally 3 teams x 2 scouts).
#[derive(Debug, Clone, PartialEq)]
pub struct AllianceGroup {
    pub match_number: MatchNumber,
    pub alliance: Alliance,
    pub forms: Vec<ScoutingForm>,
}

/// Two consecutive forms of a team-sorted alliance group.
#[derive(Debug, Clone, Copy)]
pub struct AlliancePair<'a> {
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub forms: [&'a ScoutingForm; 2],
}

// ---------------------------------------------------------------------------
// Authoritative results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoLine {
    Yes,
    No,
}

impl AutoLine {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }

    pub fn crossed(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl std::fmt::Display for AutoLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Endgame status of one robot as reported by the results API.
///
/// Anything other than `None` / `Parked` is some form of climb
/// (`StageLeft`, `CenterStage`, ...); the raw value is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EndgameStatus {
    None,
    Parked,
    Climbed(String),
}

impl EndgameStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "None" => Self::None,
            "Parked" => Self::Parked,
            other => Self::Climbed(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Parked => "Parked",
            Self::Climbed(raw) => raw,
        }
    }
}

impl From<String> for EndgameStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EndgameStatus> for String {
    fn from(status: EndgameStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for EndgameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-slot score breakdown for one alliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceBreakdown {
    pub auto_line: SlotTriple<Option<AutoLine>>,
    pub endgame: SlotTriple<Option<EndgameStatus>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceResult {
    /// Team keys in slot order (`frc254`). Normally three; other counts are
    /// kept so the join can report them.
    pub team_keys: Vec<String>,
    #[serde(default)]
    pub breakdown: Option<AllianceBreakdown>,
}

impl AllianceResult {
    pub fn is_well_formed(&self) -> bool {
        self.team_keys.len() == 3
    }

    pub fn slot_of(&self, team: TeamNumber) -> Option<usize> {
        let key = team_key(team);
        self.team_keys.iter().position(|k| *k == key)
    }
}

/// One completed match from the results API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeMatch {
    pub key: String,
    #[serde(default = "default_comp_level")]
    pub comp_level: String,
    pub match_number: MatchNumber,
    pub blue: AllianceResult,
    pub red: AllianceResult,
}

fn default_comp_level() -> String {
    "qm".into()
}

/// Results-API key for a team number.
pub fn team_key(team: TeamNumber) -> String {
    format!("frc{team}")
}

// ---------------------------------------------------------------------------
// Discrepancies
// ---------------------------------------------------------------------------

/// Forms for the same (match, team) that disagree with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossFormMismatch {
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    /// First form that diverged from the group's reference form.
    pub form_id: String,
    /// First diverging field (wire name).
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoLineMismatch {
    pub form_id: String,
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub alliance: Alliance,
    /// Robot slot, 1-based as in the results API.
    pub robot: u8,
    pub recorded: bool,
    pub authoritative: AutoLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndgameClaim {
    Neither,
    Parked,
    Climbed,
    Both,
}

impl EndgameClaim {
    pub fn from_flags(climbed: bool, parked: bool) -> Self {
        match (climbed, parked) {
            (false, false) => Self::Neither,
            (false, true) => Self::Parked,
            (true, false) => Self::Climbed,
            (true, true) => Self::Both,
        }
    }
}

impl std::fmt::Display for EndgameClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neither => write!(f, "neither"),
            Self::Parked => write!(f, "parked"),
            Self::Climbed => write!(f, "climbed"),
            Self::Both => write!(f, "parked+climbed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndgameMismatch {
    pub form_id: String,
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub alliance: Alliance,
    pub robot: u8,
    pub recorded: EndgameClaim,
    pub authoritative: EndgameStatus,
}

/// Why a (match, team) group could not be checked against the results API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifiableReason {
    /// No completed match with this number.
    NoMatchResult,
    /// The match lists an alliance without exactly three teams.
    MalformedAlliance,
    /// Blue or red score breakdown absent.
    MissingBreakdown,
    /// Team is on neither alliance of the match.
    TeamNotInMatch,
    /// Breakdown has neither an auto-line nor an endgame value for the
    /// team's slot, so nothing was compared.
    MissingSlotValue,
}

impl std::fmt::Display for UnverifiableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatchResult => write!(f, "no match result"),
            Self::MissingBreakdown => write!(f, "missing score breakdown"),
            Self::MalformedAlliance => write!(f, "malformed alliance"),
            Self::TeamNotInMatch => write!(f, "team not in match"),
            Self::MissingSlotValue => write!(f, "missing slot value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unverifiable {
    pub match_number: MatchNumber,
    pub team_number: TeamNumber,
    pub form_count: usize,
    pub reason: UnverifiableReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageIssue {
    /// Alliance group does not hold the expected number of forms.
    IncompleteAlliance { form_count: usize, expected: usize },
    /// A sorted pair straddles two teams: one team was over-scouted while
    /// its neighbour was under-scouted.
    SplitPair { teams: [TeamNumber; 2] },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageAnomaly {
    pub match_number: MatchNumber,
    pub alliance: Alliance,
    #[serde(flatten)]
    pub issue: CoverageIssue,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub team_groups: usize,
    pub forms_checked: usize,
    pub matches_available: usize,
    pub groups_verified: usize,
    pub cross_form_mismatches: usize,
    pub auto_line_mismatches: usize,
    pub endgame_mismatches: usize,
    pub unverifiable: usize,
    pub coverage_anomalies: usize,
}

impl ReportSummary {
    /// Data-entry defects found (cross-form, auto-line and endgame).
    pub fn discrepancies(&self) -> usize {
        self.cross_form_mismatches + self.auto_line_mismatches + self.endgame_mismatches
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub competition: String,
    pub engine_version: String,
    pub run_at: String,
    pub link_base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    /// In group order; not sorted.
    pub mismatched_forms: Vec<CrossFormMismatch>,
    /// Sorted ascending by match number (stable).
    pub mismatched_auto_line: Vec<AutoLineMismatch>,
    /// Sorted ascending by match number (stable).
    pub mismatched_endgame: Vec<EndgameMismatch>,
    pub unverifiable: Vec<Unverifiable>,
    pub alliance_coverage: Vec<CoverageAnomaly>,
}

/// Result of the guarded entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum AccuracyOutcome {
    /// Credential does not belong to an administrator.
    Unauthorized,
    /// No active competition is configured.
    NotConfigured,
    Report(Box<AccuracyReport>),
}
