//! `standscout config`: settings file and TBA key.

use clap::Subcommand;

use standscout_accuracy::CompetitionKey;
use standscout_config::keys::{self, KeySource};
use standscout_config::Settings;

use crate::exit_codes::{EXIT_CONFIG_KEYCHAIN, EXIT_CONFIG_WRITE};
use crate::{to_json, CliError, Context};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show resolved settings and where the TBA key comes from
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Set the active competition
    #[command(after_help = "\
Examples:
  standscout config set-competition 2024txdal")]
    SetCompetition {
        /// TBA event key
        key: String,
    },

    /// Unset the active competition (accuracy checks refuse to run)
    ClearCompetition,

    /// Store the TBA read key in the system keychain
    SetTbaKey {
        key: String,
    },

    /// Remove the TBA read key from the system keychain
    DeleteTbaKey,
}

pub fn cmd_config(ctx: &Context, cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Show { json } => cmd_config_show(ctx, json),
        ConfigCommands::SetCompetition { key } => {
            let key = CompetitionKey::parse(&key).map_err(CliError::accuracy)?;
            let mut settings = ctx.settings.clone();
            settings.competition_key = Some(key.to_string());
            save(&settings)?;
            eprintln!("active competition: {}", key);
            Ok(())
        }
        ConfigCommands::ClearCompetition => {
            let mut settings = ctx.settings.clone();
            settings.competition_key = None;
            save(&settings)?;
            eprintln!("active competition cleared");
            Ok(())
        }
        ConfigCommands::SetTbaKey { key } => {
            if key.trim().is_empty() {
                return Err(CliError::args("TBA key is empty"));
            }
            keys::set_tba_key(key.trim()).map_err(|e| {
                CliError::new(EXIT_CONFIG_KEYCHAIN, e)
                    .with_hint(format!("set {} instead", keys::TBA_KEY_ENV))
            })?;
            eprintln!("TBA key stored in keychain");
            Ok(())
        }
        ConfigCommands::DeleteTbaKey => {
            keys::delete_tba_key().map_err(|e| CliError::new(EXIT_CONFIG_KEYCHAIN, e))?;
            eprintln!("TBA key removed from keychain");
            Ok(())
        }
    }
}

fn save(settings: &Settings) -> Result<(), CliError> {
    settings.save().map_err(|e| {
        CliError::new(
            EXIT_CONFIG_WRITE,
            format!("cannot write {}: {e}", Settings::config_path_display()),
        )
    })
}

fn cmd_config_show(ctx: &Context, json: bool) -> Result<(), CliError> {
    let settings = &ctx.settings;
    let key = keys::get_tba_key();
    let keychain = keys::keychain_available();
    let store_path = ctx.store_path();

    if json {
        let out = serde_json::json!({
            "config_path": Settings::config_path_display(),
            "competition": settings.competition(),
            "tba_api_base": settings.tba_api_base,
            "tba_key": if key.key.is_some() { "present" } else { "missing" },
            "tba_key_source": key.source.as_str(),
            "keychain": if keychain { "ok" } else { "unavailable" },
            "store_path": store_path.to_string_lossy(),
            "link_base": settings.link_base,
        });
        println!("{}", to_json(&out)?);
        return Ok(());
    }

    println!("config:       {}", Settings::config_path_display());
    println!("competition:  {}", settings.competition().unwrap_or("(not set)"));
    println!("tba api:      {}", settings.tba_api_base);
    let key_line = match key.source {
        KeySource::None => "missing".to_string(),
        source => format!("present ({})", source.as_str()),
    };
    println!("tba key:      {}", key_line);
    println!("keychain:     {}", if keychain { "ok" } else { "unavailable" });
    println!("store:        {}", store_path.display());
    println!(
        "link base:    {}",
        if settings.link_base.is_empty() { "(relative links)" } else { settings.link_base.as_str() }
    );
    Ok(())
}
