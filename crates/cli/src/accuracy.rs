//! `standscout accuracy`: form accuracy report for the active competition.

use std::path::{Path, PathBuf};

use standscout_accuracy::{
    render_text, AccuracyError, AccuracyOutcome, AccuracyReport, AuthoritativeMatch,
    CheckOptions, Collaborators, CompetitionContext, CompetitionKey, MatchSource,
};
use standscout_tba::{TbaClient, TbaError};

use crate::exit_codes::{
    EXIT_ACCESS_UNAUTHORIZED, EXIT_ACCURACY_DISCREPANCIES, EXIT_ACCURACY_OPTIONS,
    EXIT_CONFIG_NO_COMPETITION, EXIT_ERROR,
};
use crate::{to_json, CliError, Context};

#[derive(clap::Args)]
pub struct AccuracyArgs {
    /// Administrator access token
    #[arg(long, env = "STANDSCOUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Competition key (default: competition.key setting)
    #[arg(long, value_name = "KEY")]
    competition: Option<String>,

    /// TBA API base URL (default: tba.apiBase setting)
    #[arg(long, value_name = "URL")]
    tba_base: Option<String>,

    /// TBA read key (default: keychain, then STANDSCOUT_TBA_KEY)
    #[arg(long, value_name = "KEY")]
    tba_key: Option<String>,

    /// Check options TOML (link_base, expected_alliance_forms, completed_only)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Output JSON to stdout instead of the text report
    #[arg(long)]
    json: bool,

    /// Write JSON report to file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Exit 3 when any form disagrees with another form or with TBA
    #[arg(long)]
    fail_on_discrepancy: bool,
}

/// Results source for the run. A missing key only fails once the engine
/// actually asks for matches, so authorization is still checked first.
enum Results {
    Tba(TbaClient),
    NoKey,
}

impl MatchSource for Results {
    fn event_matches(
        &self,
        competition: &CompetitionKey,
        completed_only: bool,
    ) -> Result<Vec<AuthoritativeMatch>, AccuracyError> {
        match self {
            Results::Tba(client) => client.event_matches(competition, completed_only),
            Results::NoKey => Err(TbaError::NotAuthenticated.into()),
        }
    }
}

pub fn cmd_accuracy(ctx: &Context, args: AccuracyArgs) -> Result<(), CliError> {
    let options = load_options(ctx, args.options.as_deref())?;
    let competition = CompetitionContext::new(ctx.competition(args.competition.as_deref())?);
    let store = ctx.open_store()?;
    let results = match ctx.tba_client(args.tba_base, args.tba_key)? {
        Some(client) => Results::Tba(client),
        None => Results::NoKey,
    };

    let collaborators = Collaborators {
        authorizer: &store,
        forms: &store,
        matches: &results,
    };

    let outcome = standscout_accuracy::verify_form_accuracy(
        &collaborators,
        &options,
        args.token.as_deref(),
        &competition,
    )
    .map_err(|e| {
        if matches!(results, Results::NoKey) && matches!(e, AccuracyError::MatchSource(_)) {
            CliError::tba(TbaError::NotAuthenticated)
        } else {
            CliError::accuracy(e)
        }
    })?;

    let report = match outcome {
        AccuracyOutcome::Report(report) => report,
        AccuracyOutcome::Unauthorized => {
            return Err(CliError::new(
                EXIT_ACCESS_UNAUTHORIZED,
                "accuracy checks require an administrator token",
            )
            .with_hint("pass --token or set STANDSCOUT_TOKEN; create one with `standscout users add <name> --admin`"));
        }
        AccuracyOutcome::NotConfigured => {
            return Err(CliError::new(EXIT_CONFIG_NO_COMPETITION, "no active competition")
                .with_hint("standscout config set-competition <key>, or pass --competition"));
        }
    };

    write_report(&report, args.json, args.output.as_deref())?;

    let s = &report.summary;
    eprintln!(
        "accuracy {}: {} forms in {} team groups, {} verified against TBA; {} discrepancies, {} unverifiable, {} coverage anomalies",
        report.meta.competition,
        s.forms_checked,
        s.team_groups,
        s.groups_verified,
        s.discrepancies(),
        s.unverifiable,
        s.coverage_anomalies,
    );

    if args.fail_on_discrepancy && s.discrepancies() > 0 {
        return Err(CliError::new(
            EXIT_ACCURACY_DISCREPANCIES,
            format!("{} discrepancies found", s.discrepancies()),
        ));
    }

    Ok(())
}

/// Options file if given; an empty `link_base` falls back to `report.linkBase`.
fn load_options(ctx: &Context, path: Option<&Path>) -> Result<CheckOptions, CliError> {
    let mut options = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::new(EXIT_ACCURACY_OPTIONS, format!("cannot read {}: {e}", path.display()))
            })?;
            CheckOptions::from_toml(&text).map_err(CliError::accuracy)?
        }
        None => CheckOptions::default(),
    };
    if options.link_base.is_empty() {
        options.link_base = ctx.settings.link_base.trim_end_matches('/').to_string();
    }
    Ok(options)
}

fn write_report(report: &AccuracyReport, json: bool, output: Option<&Path>) -> Result<(), CliError> {
    if json || output.is_some() {
        let json_str = to_json(report)?;
        if let Some(path) = output {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if json {
            println!("{json_str}");
            return Ok(());
        }
    }
    print!("{}", render_text(report));
    Ok(())
}
