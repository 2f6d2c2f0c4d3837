//! SQLite store for stand-scouting forms and scouting users.
//!
//! One database file holds the `stand_forms` and `users` tables. The store
//! implements the engine's `FormStore` and `Authorizer` collaborators.

use std::path::Path;

use rusqlite::Connection;

mod error;
mod forms;
mod source;
mod teams;
mod users;

pub use error::StoreError;
pub use forms::{can_edit, ImportSummary};
pub use teams::TeamSummary;
pub use users::User;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS stand_forms (
    id TEXT PRIMARY KEY,
    competition TEXT NOT NULL,
    match_number INTEGER NOT NULL,
    team_number INTEGER NOT NULL,
    alliance TEXT NOT NULL,               -- 'blue' | 'red'
    observations TEXT NOT NULL,           -- JSON, tracked count fields
    crossed_initiation_line INTEGER NOT NULL DEFAULT 0,
    climbed INTEGER NOT NULL DEFAULT 0,
    parked INTEGER NOT NULL DEFAULT 0,
    scout_score REAL NOT NULL DEFAULT 0,
    scouter TEXT,                         -- users.id, NULL for imported legacy forms
    verified INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS stand_forms_match
    ON stand_forms (competition, match_number, team_number);

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    token TEXT NOT NULL UNIQUE,
    admin INTEGER NOT NULL DEFAULT 0
);
"#;

/// SQLite-backed form and user store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }
        let conn = Connection::open(path)?;
        log::debug!("opened form store at {}", path.display());
        Self::init(conn)
    }

    /// Private in-memory database, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}
