//! `standscout teams`: per-team averages from stored forms.

use standscout_accuracy::Observations;
use standscout_store::TeamSummary;

use crate::{to_json, CliError, Context};

#[derive(clap::Args)]
pub struct TeamsArgs {
    /// Competition key (default: competition.key setting)
    #[arg(long, value_name = "KEY")]
    competition: Option<String>,

    /// Also print the average of every tracked field
    #[arg(long)]
    fields: bool,

    #[arg(long)]
    json: bool,
}

pub fn cmd_teams(ctx: &Context, args: TeamsArgs) -> Result<(), CliError> {
    let competition = ctx.require_competition(args.competition.as_deref())?;
    let store = ctx.open_store()?;
    let teams = store.team_summaries(&competition).map_err(CliError::store)?;

    if args.json {
        println!("{}", to_json(&teams)?);
        return Ok(());
    }

    if teams.is_empty() {
        eprintln!("no forms for {}", competition);
        return Ok(());
    }
    println!(
        "{:<6} {:<6} {:<8} {:<6} {:<6} END",
        "TEAM", "FORMS", "MATCHES", "AUTO%", "SCORE"
    );
    for team in &teams {
        println!("{}", team_line(team));
        if args.fields {
            println!("       {}", field_line(team));
        }
    }
    Ok(())
}

fn team_line(team: &TeamSummary) -> String {
    format!(
        "{:<6} {:<6} {:<8} {:<6.0} {:<6.2} {}",
        team.team_number,
        team.forms,
        team.matches,
        team.auto_line_rate * 100.0,
        team.scout_score,
        team.end_position
    )
}

/// Field averages in declaration order.
fn field_line(team: &TeamSummary) -> String {
    Observations::FIELD_NAMES
        .iter()
        .filter_map(|name| team.averages.get(name).map(|avg| format!("{name}={avg:.1}")))
        .collect::<Vec<_>>()
        .join(" ")
}
