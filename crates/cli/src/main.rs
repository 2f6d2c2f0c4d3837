// standscout CLI - stand-scouting form accuracy checks

mod accuracy;
mod config;
mod exit_codes;
mod forms;
mod matches;
mod teams;
mod users;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use standscout_accuracy::{AccuracyError, CompetitionKey};
use standscout_config::{get_tba_key, Settings};
use standscout_store::{SqliteStore, StoreError};
use standscout_tba::{TbaClient, TbaError};

use exit_codes::{
    accuracy_exit_code, store_exit_code, tba_exit_code, EXIT_CONFIG_NO_COMPETITION,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "standscout")]
#[command(about = "Verify stand-scouting forms against each other and against official match results")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// SQLite database (default: store.path setting, then the data directory)
    #[arg(long, global = true, env = "STANDSCOUT_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-check stored forms and verify them against TBA results
    #[command(after_help = "\
Examples:
  standscout accuracy --token $ADMIN_TOKEN
  standscout accuracy --competition 2024txdal --json
  standscout accuracy --options accuracy.toml --output report.json
  standscout accuracy --fail-on-discrepancy")]
    Accuracy(accuracy::AccuracyArgs),

    /// Import, inspect, edit and verify stand forms
    Forms {
        #[command(subcommand)]
        command: forms::FormsCommands,
    },

    /// Manage scouts and administrators
    Users {
        #[command(subcommand)]
        command: users::UsersCommands,
    },

    /// Show or change settings and the TBA key
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// List qualification results for the competition from TBA
    #[command(after_help = "\
Examples:
  standscout matches
  standscout matches --competition 2024txdal --all --json")]
    Matches(matches::MatchesArgs),

    /// Per-team averages and most common end position from stored forms
    #[command(after_help = "\
Examples:
  standscout teams
  standscout teams --competition 2024txdal --fields
  standscout teams --json")]
    Teams(teams::TeamsArgs),
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  standscout-accuracy ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context {
        settings: Settings::load(),
        db: cli.db,
    };

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: standscout <command> [options]");
            eprintln!("       standscout --help for more information");
            Ok(())
        }
        Some(Commands::Accuracy(args)) => accuracy::cmd_accuracy(&ctx, args),
        Some(Commands::Forms { command }) => forms::cmd_forms(&ctx, command),
        Some(Commands::Users { command }) => users::cmd_users(&ctx, command),
        Some(Commands::Config { command }) => config::cmd_config(&ctx, command),
        Some(Commands::Matches(args)) => matches::cmd_matches(&ctx, args),
        Some(Commands::Teams(args)) => teams::cmd_teams(&ctx, args),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// Shared command context
// ============================================================================

/// Loaded settings plus the global flags every command resolves against.
pub struct Context {
    pub settings: Settings,
    db: Option<PathBuf>,
}

impl Context {
    pub fn store_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(|| self.settings.store_path())
    }

    pub fn open_store(&self) -> Result<SqliteStore, CliError> {
        let path = self.store_path();
        log::debug!("opening store at {}", path.display());
        SqliteStore::open(&path).map_err(CliError::store)
    }

    /// `--competition` when given, else the configured active competition.
    pub fn competition(&self, flag: Option<&str>) -> Result<Option<CompetitionKey>, CliError> {
        flag.or_else(|| self.settings.competition())
            .map(CompetitionKey::parse)
            .transpose()
            .map_err(CliError::accuracy)
    }

    pub fn require_competition(&self, flag: Option<&str>) -> Result<CompetitionKey, CliError> {
        self.competition(flag)?.ok_or_else(|| {
            CliError::new(EXIT_CONFIG_NO_COMPETITION, "no active competition")
                .with_hint("standscout config set-competition <key>, or pass --competition")
        })
    }

    /// TBA client from flags, then settings and the key store.
    /// `None` when no auth key is available anywhere.
    pub fn tba_client(
        &self,
        api_base: Option<String>,
        auth_key: Option<String>,
    ) -> Result<Option<TbaClient>, CliError> {
        let key = match auth_key {
            Some(key) => Some(key),
            None => {
                let lookup = get_tba_key();
                log::debug!("TBA key source: {}", lookup.source.as_str());
                lookup.key
            }
        };
        let Some(key) = key else {
            return Ok(None);
        };
        let base = api_base.unwrap_or_else(|| self.settings.tba_api_base.clone());
        TbaClient::with_base_url(key, base).map(Some).map_err(CliError::tba)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn store(err: StoreError) -> Self {
        let hint = match &err {
            StoreError::UnknownToken => Some("check --token or STANDSCOUT_TOKEN"),
            StoreError::MissingCompetition(_) => {
                Some("pass --competition or run `standscout config set-competition <key>`")
            }
            _ => None,
        };
        Self {
            code: store_exit_code(&err),
            message: err.to_string(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn tba(err: TbaError) -> Self {
        let hint = match &err {
            TbaError::NotAuthenticated => {
                Some("store a read key with `standscout config set-tba-key <key>`")
            }
            TbaError::Auth(..) => Some("the TBA read key was rejected; generate a new one on your TBA account page"),
            TbaError::NotFound(_) => Some("check the competition key (e.g. 2024txdal)"),
            _ => None,
        };
        Self {
            code: tba_exit_code(&err),
            message: err.to_string(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn accuracy(err: AccuracyError) -> Self {
        Self::new(accuracy_exit_code(&err), err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Serialize `value` as pretty JSON, mapping failures to a CLI error.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(exit_codes::EXIT_ERROR, format!("JSON serialization error: {e}")))
}
