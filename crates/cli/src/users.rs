//! `standscout users`: scouts and administrators.

use clap::Subcommand;

use crate::{to_json, CliError, Context};

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Create a user and print their access token
    #[command(after_help = "\
Examples:
  standscout users add \"Lead Scout\" --admin
  standscout users add alex --json")]
    Add {
        /// Display name
        name: String,

        /// Allow accuracy checks, form verification and editing any form
        #[arg(long)]
        admin: bool,

        /// Print the new user (including token) as JSON
        #[arg(long)]
        json: bool,
    },

    /// List users (tokens are not shown)
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_users(ctx: &Context, cmd: UsersCommands) -> Result<(), CliError> {
    let store = ctx.open_store()?;
    match cmd {
        UsersCommands::Add { name, admin, json } => {
            let user = store.add_user(&name, admin).map_err(CliError::store)?;
            if json {
                println!("{}", to_json(&user)?);
            } else {
                // Token alone on stdout so it can be captured
                println!("{}", user.token);
            }
            eprintln!(
                "added {} ({}){}",
                user.name,
                user.id,
                if user.admin { " as administrator" } else { "" }
            );
            Ok(())
        }
        UsersCommands::List { json } => {
            let users = store.list_users().map_err(CliError::store)?;
            if json {
                let listed: Vec<_> = users
                    .iter()
                    .map(|u| serde_json::json!({ "id": u.id, "name": u.name, "admin": u.admin }))
                    .collect();
                println!("{}", to_json(&listed)?);
                return Ok(());
            }
            for user in &users {
                println!(
                    "{:<24} {:<6} {}",
                    user.name,
                    if user.admin { "admin" } else { "scout" },
                    user.id
                );
            }
            Ok(())
        }
    }
}
