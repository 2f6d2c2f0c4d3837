//! TBA HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Auth errors and
//! other 4xx responses fail immediately; 429 and 5xx are retried with
//! exponential backoff, honouring `Retry-After` on 429.

use std::thread;
use std::time::Duration;

use standscout_accuracy::{AccuracyError, AuthoritativeMatch, CompetitionKey, MatchSource};

use crate::error::TbaError;
use crate::ingest::{ingest_matches, TbaMatch};

pub const DEFAULT_API_BASE: &str = "https://www.thebluealliance.com/api/v3";

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("standscout/", env!("CARGO_PKG_VERSION"));

/// TBA read API client (blocking).
#[derive(Clone)]
pub struct TbaClient {
    http: reqwest::blocking::Client,
    api_base: String,
    auth_key: String,
    max_retries: u32,
    initial_backoff: Duration,
}

impl TbaClient {
    pub fn new(auth_key: String) -> Result<Self, TbaError> {
        Self::with_base_url(auth_key, DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(auth_key: String, api_base: String) -> Result<Self, TbaError> {
        if auth_key.trim().is_empty() {
            return Err(TbaError::NotAuthenticated);
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TbaError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_key: auth_key.trim().to_string(),
            max_retries: MAX_RETRIES,
            initial_backoff: Duration::from_secs(1),
        })
    }

    /// Override the retry budget and the first backoff delay.
    pub fn with_retry(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET `path` under the API base with retry + exponential backoff.
    fn get_json(&self, path: &str) -> Result<serde_json::Value, TbaError> {
        let url = format!("{}{}", self.api_base, path);
        let mut backoff = self.initial_backoff;

        for attempt in 0..=self.max_retries {
            let result = self
                .http
                .get(&url)
                .header("X-TBA-Auth-Key", &self.auth_key)
                .header("Accept", "application/json")
                .send();

            let resp = match result {
                Ok(resp) => resp,
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == self.max_retries {
                        return Err(TbaError::Network(format!(
                            "{} after {} attempts",
                            e,
                            attempt + 1
                        )));
                    }
                    log::warn!(
                        "TBA retry {}/{} in {:?} ({})",
                        attempt + 1,
                        self.max_retries,
                        backoff,
                        e
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                    continue;
                }
            };

            let status = resp.status().as_u16();

            if status == 401 || status == 403 {
                let msg = error_message(resp);
                return Err(TbaError::Auth(status, msg));
            }

            if status == 404 {
                return Err(TbaError::NotFound(path.trim_start_matches('/').to_string()));
            }

            if (400..500).contains(&status) && status != 429 {
                let msg = error_message(resp);
                return Err(TbaError::Http(status, msg));
            }

            if status == 429 || status >= 500 {
                if attempt == self.max_retries {
                    if status == 429 {
                        return Err(TbaError::RateLimited { attempts: attempt + 1 });
                    }
                    let msg = error_message(resp);
                    return Err(TbaError::Http(status, msg));
                }

                let wait = if status == 429 {
                    resp.headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(backoff)
                } else {
                    backoff
                };

                log::warn!(
                    "TBA retry {}/{} in {:?} (HTTP {})",
                    attempt + 1,
                    self.max_retries,
                    wait,
                    status
                );
                thread::sleep(wait);
                backoff *= 2;
                continue;
            }

            let text = resp
                .text()
                .map_err(|e| TbaError::Network(format!("failed to read response body: {e}")))?;
            return serde_json::from_str(&text).map_err(|e| {
                let head: String = text.chars().take(200).collect();
                TbaError::Parse(format!("{e} (body: {head})"))
            });
        }

        Err(TbaError::Network(format!("no response from {url}")))
    }

    /// Raw match listing for an event.
    pub fn event_matches_raw(&self, event: &CompetitionKey) -> Result<Vec<TbaMatch>, TbaError> {
        let body = self.get_json(&format!("/event/{}/matches", event.as_str()))?;
        serde_json::from_value(body).map_err(|e| TbaError::Parse(e.to_string()))
    }

    /// Qualification matches of an event, converted for the engine.
    pub fn fetch_event_matches(
        &self,
        event: &CompetitionKey,
        completed_only: bool,
    ) -> Result<Vec<AuthoritativeMatch>, TbaError> {
        let raw = self.event_matches_raw(event)?;
        log::info!("fetched {} matches for {} from TBA", raw.len(), event);
        Ok(ingest_matches(raw, completed_only))
    }
}

/// TBA errors look like `{"Error": "..."}`.
fn error_message(resp: reqwest::blocking::Response) -> String {
    let body: serde_json::Value = resp.json().unwrap_or(serde_json::Value::Null);
    body.get("Error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| "no error message".to_string())
}

impl MatchSource for TbaClient {
    fn event_matches(
        &self,
        competition: &CompetitionKey,
        completed_only: bool,
    ) -> Result<Vec<AuthoritativeMatch>, AccuracyError> {
        Ok(self.fetch_event_matches(competition, completed_only)?)
    }
}
