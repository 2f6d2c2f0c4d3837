// TBA auth key storage
//
// The key is read from:
// 1. System keychain (preferred)
// 2. STANDSCOUT_TBA_KEY (fallback for CI/headless)
//
// Keys are NEVER stored in settings.json

use std::env;

/// Service name for keychain storage
const KEYCHAIN_SERVICE: &str = "standscout";

/// Keychain account holding the TBA read key
const KEYCHAIN_ACCOUNT: &str = "tba";

pub const TBA_KEY_ENV: &str = "STANDSCOUT_TBA_KEY";

/// Source of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Key retrieved from system keychain
    Keychain,
    /// Key retrieved from environment variable
    Environment,
    /// No key found
    None,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Keychain => "keychain",
            KeySource::Environment => "environment",
            KeySource::None => "none",
        }
    }
}

/// Result of key lookup
#[derive(Debug, Clone)]
pub struct KeyLookup {
    pub key: Option<String>,
    pub source: KeySource,
}

/// Get the TBA auth key
///
/// Checks in order:
/// 1. System keychain
/// 2. Environment variable (STANDSCOUT_TBA_KEY)
pub fn get_tba_key() -> KeyLookup {
    #[cfg(feature = "keychain")]
    {
        if let Ok(entry) = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT) {
            if let Ok(key) = entry.get_password() {
                return KeyLookup {
                    key: Some(key),
                    source: KeySource::Keychain,
                };
            }
        }
    }

    from_env(TBA_KEY_ENV)
}

fn from_env(name: &str) -> KeyLookup {
    match env::var(name) {
        Ok(key) if !key.trim().is_empty() => KeyLookup {
            key: Some(key.trim().to_string()),
            source: KeySource::Environment,
        },
        _ => KeyLookup {
            key: None,
            source: KeySource::None,
        },
    }
}

/// Store the TBA key in the system keychain
#[cfg(feature = "keychain")]
pub fn set_tba_key(key: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to create keychain entry: {}", e))?;

    entry
        .set_password(key)
        .map_err(|e| format!("Failed to store key in keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn set_tba_key(_key: &str) -> Result<(), String> {
    Err(format!("Keychain support not enabled. Set {TBA_KEY_ENV} instead."))
}

/// Delete the TBA key from the system keychain
#[cfg(feature = "keychain")]
pub fn delete_tba_key() -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to access keychain entry: {}", e))?;

    entry
        .delete_credential()
        .map_err(|e| format!("Failed to delete key from keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn delete_tba_key() -> Result<(), String> {
    Err("Keychain support not enabled.".to_string())
}

/// Check if keychain support is available
pub fn keychain_available() -> bool {
    #[cfg(feature = "keychain")]
    {
        keyring::Entry::new(KEYCHAIN_SERVICE, "test").is_ok()
    }
    #[cfg(not(feature = "keychain"))]
    {
        false
    }
}
