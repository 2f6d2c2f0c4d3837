//! `standscout matches`: qualification results as the engine sees them.

use standscout_accuracy::model::{AllianceResult, AuthoritativeMatch};
use standscout_tba::TbaError;

use crate::{to_json, CliError, Context};

#[derive(clap::Args)]
pub struct MatchesArgs {
    /// Competition key (default: competition.key setting)
    #[arg(long, value_name = "KEY")]
    competition: Option<String>,

    /// TBA API base URL (default: tba.apiBase setting)
    #[arg(long, value_name = "URL")]
    tba_base: Option<String>,

    /// TBA read key (default: keychain, then STANDSCOUT_TBA_KEY)
    #[arg(long, value_name = "KEY")]
    tba_key: Option<String>,

    /// Include scheduled matches that have not been played
    #[arg(long)]
    all: bool,

    #[arg(long)]
    json: bool,
}

pub fn cmd_matches(ctx: &Context, args: MatchesArgs) -> Result<(), CliError> {
    let competition = ctx.require_competition(args.competition.as_deref())?;
    let client = ctx
        .tba_client(args.tba_base, args.tba_key)?
        .ok_or_else(|| CliError::tba(TbaError::NotAuthenticated))?;

    let matches = client
        .fetch_event_matches(&competition, !args.all)
        .map_err(CliError::tba)?;

    if args.json {
        println!("{}", to_json(&matches)?);
    } else {
        for m in &matches {
            println!("{}", match_line(m));
        }
    }
    eprintln!("{} qualification matches for {}", matches.len(), competition);
    Ok(())
}

fn match_line(m: &AuthoritativeMatch) -> String {
    format!(
        "qm{:<4} blue {}  red {}",
        m.match_number,
        alliance_cell(&m.blue),
        alliance_cell(&m.red)
    )
}

fn alliance_cell(result: &AllianceResult) -> String {
    let teams = result.team_keys.join(" ");
    match result.breakdown {
        Some(_) => teams,
        None => format!("{teams} (no breakdown)"),
    }
}
