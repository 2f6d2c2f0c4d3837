use crate::model::{
    AutoLineMismatch, CoverageAnomaly, CrossFormMismatch, EndgameMismatch, ReportSummary,
    TeamGroup, Unverifiable,
};

/// Everything one verification pass found, before report assembly.
#[derive(Debug, Default)]
pub struct Findings {
    pub mismatched_forms: Vec<CrossFormMismatch>,
    pub mismatched_auto_line: Vec<AutoLineMismatch>,
    pub mismatched_endgame: Vec<EndgameMismatch>,
    pub unverifiable: Vec<Unverifiable>,
    pub alliance_coverage: Vec<CoverageAnomaly>,
    /// Team groups that were joined to a result and checked.
    pub groups_verified: usize,
}

/// Compute summary counts for a pass.
pub fn compute_summary(
    groups: &[TeamGroup],
    matches_available: usize,
    findings: &Findings,
) -> ReportSummary {
    ReportSummary {
        team_groups: groups.len(),
        forms_checked: groups.iter().map(|g| g.forms.len()).sum(),
        matches_available,
        groups_verified: findings.groups_verified,
        cross_form_mismatches: findings.mismatched_forms.len(),
        auto_line_mismatches: findings.mismatched_auto_line.len(),
        endgame_mismatches: findings.mismatched_endgame.len(),
        unverifiable: findings.unverifiable.len(),
        coverage_anomalies: findings.alliance_coverage.len(),
    }
}
