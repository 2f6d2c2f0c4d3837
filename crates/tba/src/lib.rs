//! The Blue Alliance (TBA) client: completed match results for an event.
//!
//! Fetches `/api/v3/event/{key}/matches` and turns each payload into an
//! `AuthoritativeMatch` with per-slot auto-line and endgame triples.
//!
//! Blocking reqwest (no Tokio runtime). Retries 429/5xx with backoff.

mod client;
mod error;
mod ingest;

pub use client::{TbaClient, DEFAULT_API_BASE};
pub use error::TbaError;
pub use ingest::{ingest_match, ingest_matches, is_completed, TbaMatch};
