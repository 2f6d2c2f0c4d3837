//! `standscout forms`: stand-form records.

use std::path::PathBuf;

use clap::Subcommand;

use standscout_accuracy::config::form_link;
use standscout_accuracy::model::MatchNumber;
use standscout_accuracy::ScoutingForm;

use crate::exit_codes::EXIT_STORE_IMPORT;
use crate::{to_json, CliError, Context};

#[derive(Subcommand)]
pub enum FormsCommands {
    /// Import forms from a JSON export (array of form documents)
    #[command(after_help = "\
Examples:
  standscout forms import stand-forms.json
  standscout forms import export.json --competition 2024txdal")]
    Import {
        /// JSON file holding an array of forms
        file: PathBuf,

        /// Competition for forms exported without one (default: competition.key setting)
        #[arg(long, value_name = "KEY")]
        competition: Option<String>,

        /// Print the import counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one form as JSON
    Show {
        /// Form id
        id: String,
    },

    /// List the forms of one match
    #[command(after_help = "\
Examples:
  standscout forms list --match 12
  standscout forms list --match 12 --competition 2024txdal --json")]
    List {
        /// Qualification match number
        #[arg(long = "match", value_name = "N")]
        match_number: MatchNumber,

        /// Competition key (default: competition.key setting)
        #[arg(long, value_name = "KEY")]
        competition: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Replace a form's recorded values (original scouter or administrator)
    Update {
        /// JSON file holding the edited form; its id selects the stored form
        file: PathBuf,

        #[arg(long, env = "STANDSCOUT_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Mark a form verified (administrator only)
    Verify {
        /// Form id
        id: String,

        #[arg(long, env = "STANDSCOUT_TOKEN", hide_env_values = true)]
        token: String,
    },
}

pub fn cmd_forms(ctx: &Context, cmd: FormsCommands) -> Result<(), CliError> {
    match cmd {
        FormsCommands::Import { file, competition, json } => {
            cmd_forms_import(ctx, file, competition, json)
        }
        FormsCommands::Show { id } => cmd_forms_show(ctx, &id),
        FormsCommands::List { match_number, competition, json } => {
            cmd_forms_list(ctx, match_number, competition, json)
        }
        FormsCommands::Update { file, token } => cmd_forms_update(ctx, file, &token),
        FormsCommands::Verify { id, token } => cmd_forms_verify(ctx, &id, &token),
    }
}

fn cmd_forms_import(
    ctx: &Context,
    file: PathBuf,
    competition: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let competition = ctx.competition(competition.as_deref())?;
    let store = ctx.open_store()?;
    let summary = store
        .import_file(&file, competition.as_ref())
        .map_err(CliError::store)?;

    if json {
        println!("{}", to_json(&summary)?);
    }
    eprintln!(
        "imported {} forms from {} ({} already stored)",
        summary.inserted,
        file.display(),
        summary.skipped
    );
    Ok(())
}

fn cmd_forms_show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let store = ctx.open_store()?;
    let form = store.get_form(id).map_err(CliError::store)?;
    println!("{}", to_json(&form)?);
    eprintln!("{}", form_link(ctx.settings.link_base.trim_end_matches('/'), &form.id));
    Ok(())
}

fn cmd_forms_list(
    ctx: &Context,
    match_number: MatchNumber,
    competition: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let competition = ctx.require_competition(competition.as_deref())?;
    let store = ctx.open_store()?;
    let forms = store
        .forms_for_match(&competition, match_number)
        .map_err(CliError::store)?;

    if json {
        println!("{}", to_json(&forms)?);
        return Ok(());
    }

    if forms.is_empty() {
        eprintln!("no forms for {} match {}", competition, match_number);
        return Ok(());
    }
    println!("{:<6} {:<8} {:<9} {:<8} ID", "TEAM", "ALLIANCE", "VERIFIED", "SCORE");
    for form in &forms {
        println!(
            "{:<6} {:<8} {:<9} {:<8} {}",
            form.team_number,
            form.alliance.as_str(),
            if form.verified { "yes" } else { "no" },
            form.scout_score,
            form.id
        );
    }
    Ok(())
}

fn cmd_forms_update(ctx: &Context, file: PathBuf, token: &str) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&file).map_err(|e| {
        CliError::new(EXIT_STORE_IMPORT, format!("cannot read {}: {e}", file.display()))
    })?;
    let form: ScoutingForm = serde_json::from_str(&text).map_err(|e| {
        CliError::new(EXIT_STORE_IMPORT, format!("{} is not a stand form: {e}", file.display()))
    })?;

    let store = ctx.open_store()?;
    store.update_form(&form, token).map_err(CliError::store)?;
    eprintln!("updated form {}", form.id);
    Ok(())
}

fn cmd_forms_verify(ctx: &Context, id: &str, token: &str) -> Result<(), CliError> {
    let store = ctx.open_store()?;
    store.verify_form(id, token).map_err(CliError::store)?;
    eprintln!("verified form {}", id);
    Ok(())
}
