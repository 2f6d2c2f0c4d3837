use crate::compare::check_group;
use crate::config::{CheckOptions, CompetitionContext, CompetitionKey};
use crate::coverage::alliance_coverage;
use crate::error::AccuracyError;
use crate::join::MatchIndex;
use crate::model::{
    AccuracyOutcome, AccuracyReport, AllianceGroup, AuthoritativeMatch, ReportMeta, TeamGroup,
    Unverifiable, UnverifiableReason,
};
use crate::reconcile::{check_auto_line, check_endgame};
use crate::source::{Authorizer, FormStore, MatchSource};
use crate::summary::{compute_summary, Findings};

/// Data for one verification pass, already fetched.
#[derive(Debug, Clone)]
pub struct AccuracyInput {
    pub competition: CompetitionKey,
    pub team_groups: Vec<TeamGroup>,
    pub alliance_groups: Vec<AllianceGroup>,
    pub matches: Vec<AuthoritativeMatch>,
}

/// The services `verify_form_accuracy` reads from.
pub struct Collaborators<'a> {
    pub authorizer: &'a dyn Authorizer,
    pub forms: &'a dyn FormStore,
    pub matches: &'a dyn MatchSource,
}

/// Guarded entry point: authorize, require an active competition, fetch,
/// then run.
///
/// Authorization is checked before configuration. When no competition is
/// active, neither the form store nor the match source is called.
pub fn verify_form_accuracy(
    collaborators: &Collaborators<'_>,
    options: &CheckOptions,
    credential: Option<&str>,
    context: &CompetitionContext,
) -> Result<AccuracyOutcome, AccuracyError> {
    if !collaborators.authorizer.is_admin(credential)? {
        log::info!("accuracy check refused: credential is not an administrator");
        return Ok(AccuracyOutcome::Unauthorized);
    }

    let Some(competition) = context.active() else {
        log::info!("accuracy check refused: no active competition");
        return Ok(AccuracyOutcome::NotConfigured);
    };

    options.validate()?;

    let team_groups = collaborators.forms.forms_by_team(competition)?;
    let alliance_groups = collaborators.forms.forms_by_alliance(competition)?;
    let matches = collaborators
        .matches
        .event_matches(competition, options.completed_only)?;
    log::debug!(
        "{competition}: {} team groups, {} alliance groups, {} matches",
        team_groups.len(),
        alliance_groups.len(),
        matches.len()
    );

    let input = AccuracyInput {
        competition: competition.clone(),
        team_groups,
        alliance_groups,
        matches,
    };

    Ok(AccuracyOutcome::Report(Box::new(run(options, &input))))
}

/// Run every check over already-fetched data.
///
/// Never fails: groups that cannot be joined to a result are reported as
/// unverifiable and the pass continues with the next group.
pub fn run(options: &CheckOptions, input: &AccuracyInput) -> AccuracyReport {
    let index = MatchIndex::build(&input.matches);
    let mut findings = Findings::default();

    for group in &input.team_groups {
        if let Some(mismatch) = check_group(group) {
            findings.mismatched_forms.push(mismatch);
        }

        let unverifiable = |reason: UnverifiableReason| Unverifiable {
            match_number: group.match_number,
            team_number: group.team_number,
            form_count: group.forms.len(),
            reason,
        };

        let joined = match index.join(group.match_number) {
            Ok(joined) => joined,
            Err(reason) => {
                log::debug!(
                    "match {} team {}: skipped ({reason})",
                    group.match_number,
                    group.team_number
                );
                findings.unverifiable.push(unverifiable(reason));
                continue;
            }
        };

        let Some(slot) = joined.locate(group.team_number) else {
            log::warn!(
                "team {} not on either alliance of {}",
                group.team_number,
                joined.result.key
            );
            findings
                .unverifiable
                .push(unverifiable(UnverifiableReason::TeamNotInMatch));
            continue;
        };

        let auto_line = check_auto_line(group, &slot);
        let endgame = check_endgame(group, &slot);
        if auto_line.is_none() && endgame.is_none() {
            log::warn!(
                "{} has no auto-line or endgame value for team {}",
                joined.result.key,
                group.team_number
            );
            findings
                .unverifiable
                .push(unverifiable(UnverifiableReason::MissingSlotValue));
            continue;
        }

        findings.mismatched_auto_line.extend(auto_line.unwrap_or_default());
        findings.mismatched_endgame.extend(endgame.unwrap_or_default());
        findings.groups_verified += 1;
    }

    findings.alliance_coverage =
        alliance_coverage(&input.alliance_groups, options.expected_alliance_forms);

    // Stable: ties keep group order.
    findings.mismatched_auto_line.sort_by_key(|m| m.match_number);
    findings.mismatched_endgame.sort_by_key(|m| m.match_number);
    findings.unverifiable.sort_by_key(|u| u.match_number);

    let summary = compute_summary(&input.team_groups, index.len(), &findings);
    log::info!(
        "{}: {} forms in {} groups, {} discrepancies, {} unverifiable",
        input.competition,
        summary.forms_checked,
        summary.team_groups,
        summary.discrepancies(),
        summary.unverifiable
    );

    AccuracyReport {
        meta: ReportMeta {
            competition: input.competition.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            link_base: options.link_base.clone(),
        },
        summary,
        mismatched_forms: findings.mismatched_forms,
        mismatched_auto_line: findings.mismatched_auto_line,
        mismatched_endgame: findings.mismatched_endgame,
        unverifiable: findings.unverifiable,
        alliance_coverage: findings.alliance_coverage,
    }
}
