//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad key)      |
//! | 3-9     | accuracy         | Accuracy run outcomes                    |
//! | 10-19   | config           | Competition / API key configuration      |
//! | 20-29   | access           | Tokens and edit permission               |
//! | 40-49   | store            | SQLite form store                        |
//! | 50-59   | fetch            | The Blue Alliance results API            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use standscout_accuracy::AccuracyError;
use standscout_store::StoreError;
use standscout_tba::TbaError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid competition key.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Accuracy (3-9)
// =============================================================================

/// Report contained discrepancies (only with --fail-on-discrepancy).
pub const EXIT_ACCURACY_DISCREPANCIES: u8 = 3;

/// Check options file could not be read, parsed or validated.
pub const EXIT_ACCURACY_OPTIONS: u8 = 4;

// =============================================================================
// Config (10-19)
// =============================================================================

/// No active competition configured.
pub const EXIT_CONFIG_NO_COMPETITION: u8 = 10;

/// Settings file could not be written.
pub const EXIT_CONFIG_WRITE: u8 = 11;

/// Keychain error (cannot read/write credentials).
pub const EXIT_CONFIG_KEYCHAIN: u8 = 12;

// =============================================================================
// Access (20-29)
// =============================================================================

/// Token does not belong to any user.
pub const EXIT_ACCESS_UNKNOWN_TOKEN: u8 = 20;

/// User may not edit or verify this form.
pub const EXIT_ACCESS_FORBIDDEN: u8 = 21;

/// Accuracy check requested without an administrator token.
pub const EXIT_ACCESS_UNAUTHORIZED: u8 = 22;

// =============================================================================
// Store (40-49)
// =============================================================================

/// Database open/query failure.
pub const EXIT_STORE_DB: u8 = 40;

/// No form with the requested id.
pub const EXIT_STORE_NOT_FOUND: u8 = 41;

/// Import file unreadable, malformed, or missing required data.
pub const EXIT_STORE_IMPORT: u8 = 42;

// =============================================================================
// Fetch (50-59)
// =============================================================================

/// No TBA auth key (neither flag, keychain, nor env var).
pub const EXIT_FETCH_NOT_AUTH: u8 = 50;

/// Auth key rejected by TBA (401/403).
pub const EXIT_FETCH_AUTH: u8 = 51;

/// Event unknown to TBA (404) or other 4xx.
pub const EXIT_FETCH_NOT_FOUND: u8 = 52;

/// Rate limited after retries (429).
pub const EXIT_FETCH_RATE_LIMIT: u8 = 53;

/// Upstream error (5xx) or network failure after retries.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;

/// TBA response did not parse.
pub const EXIT_FETCH_PARSE: u8 = 55;

// =============================================================================
// Error mapping
// =============================================================================

pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Sqlite(_) => EXIT_STORE_DB,
        StoreError::FormNotFound(_) => EXIT_STORE_NOT_FOUND,
        StoreError::Parse(_)
        | StoreError::Io(_)
        | StoreError::MissingCompetition(_)
        | StoreError::Invalid(_) => EXIT_STORE_IMPORT,
        StoreError::UnknownToken => EXIT_ACCESS_UNKNOWN_TOKEN,
        StoreError::Forbidden(_) => EXIT_ACCESS_FORBIDDEN,
    }
}

pub fn tba_exit_code(err: &TbaError) -> u8 {
    match err {
        TbaError::NotAuthenticated => EXIT_FETCH_NOT_AUTH,
        TbaError::Auth(..) => EXIT_FETCH_AUTH,
        TbaError::NotFound(_) => EXIT_FETCH_NOT_FOUND,
        TbaError::Http(code, _) if *code < 500 => EXIT_FETCH_NOT_FOUND,
        TbaError::RateLimited { .. } => EXIT_FETCH_RATE_LIMIT,
        TbaError::Http(..) | TbaError::Network(_) => EXIT_FETCH_UPSTREAM,
        TbaError::Parse(_) => EXIT_FETCH_PARSE,
    }
}

/// Engine errors only carry the collaborator's message, so fetch failures
/// collapse to the upstream code.
pub fn accuracy_exit_code(err: &AccuracyError) -> u8 {
    match err {
        AccuracyError::InvalidCompetitionKey(_) => EXIT_USAGE,
        AccuracyError::OptionsParse(_) | AccuracyError::OptionsValidation(_) => {
            EXIT_ACCURACY_OPTIONS
        }
        AccuracyError::Store(_) | AccuracyError::Identity(_) => EXIT_STORE_DB,
        AccuracyError::MatchSource(_) => EXIT_FETCH_UPSTREAM,
    }
}
