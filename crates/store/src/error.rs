use standscout_accuracy::AccuracyError;

/// Error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Database open/query failure
    Sqlite(String),
    /// Stored or imported JSON could not be (de)serialized
    Parse(String),
    /// File I/O error (imports)
    Io(String),
    /// No form with this id
    FormNotFound(String),
    /// Token does not belong to any user
    UnknownToken,
    /// User may not perform this change
    Forbidden(String),
    /// Imported form has no competition and none was supplied (form id)
    MissingCompetition(String),
    /// Record failed validation
    Invalid(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Sqlite(msg) => write!(f, "database error: {}", msg),
            StoreError::Parse(msg) => write!(f, "parse error: {}", msg),
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::FormNotFound(id) => write!(f, "no stand form with id '{}'", id),
            StoreError::UnknownToken => write!(f, "access token does not match any user"),
            StoreError::Forbidden(msg) => write!(f, "not allowed: {}", msg),
            StoreError::MissingCompetition(id) => write!(f, "form '{}' has no competition", id),
            StoreError::Invalid(msg) => write!(f, "invalid record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

impl From<StoreError> for AccuracyError {
    fn from(e: StoreError) -> Self {
        AccuracyError::Store(e.to_string())
    }
}
