use standscout_accuracy::AccuracyError;

/// Error type for results-API calls.
#[derive(Debug)]
pub enum TbaError {
    /// No auth key configured
    NotAuthenticated,
    /// Auth key rejected (401/403)
    Auth(u16, String),
    /// Event or route not found (404)
    NotFound(String),
    /// Rate limited after every retry
    RateLimited { attempts: u32 },
    /// Other HTTP error with status code
    Http(u16, String),
    /// Network error after every retry
    Network(String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for TbaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TbaError::NotAuthenticated => {
                write!(f, "no TBA auth key (set STANDSCOUT_TBA_KEY or pass --tba-key)")
            }
            TbaError::Auth(code, msg) => write!(f, "TBA auth failed ({}): {}", code, msg),
            TbaError::NotFound(what) => write!(f, "TBA has no {}", what),
            TbaError::RateLimited { attempts } => {
                write!(f, "TBA rate limited after {} attempts", attempts)
            }
            TbaError::Http(code, msg) => write!(f, "TBA error (HTTP {}): {}", code, msg),
            TbaError::Network(msg) => write!(f, "network error: {}", msg),
            TbaError::Parse(msg) => write!(f, "failed to parse TBA response: {}", msg),
        }
    }
}

impl std::error::Error for TbaError {}

impl From<TbaError> for AccuracyError {
    fn from(e: TbaError) -> Self {
        AccuracyError::MatchSource(e.to_string())
    }
}
