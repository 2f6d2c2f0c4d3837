// Application settings
// Loaded from ~/.config/standscout/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment override for the settings file location.
pub const SETTINGS_PATH_ENV: &str = "STANDSCOUT_CONFIG";

const DEFAULT_TBA_API_BASE: &str = "https://www.thebluealliance.com/api/v3";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Competition
    /// Active event key, e.g. "2024txdal". Unset = accuracy checks refuse to run.
    #[serde(rename = "competition.key")]
    pub competition_key: Option<String>,

    // Results API
    #[serde(rename = "tba.apiBase")]
    pub tba_api_base: String,

    // Storage
    /// SQLite database file. None = platform data dir.
    #[serde(rename = "store.path")]
    pub store_path: Option<String>,

    // Report
    /// Base URL of the scouting site, prefixed to form links.
    #[serde(rename = "report.linkBase")]
    pub link_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            competition_key: None,
            tba_api_base: DEFAULT_TBA_API_BASE.to_string(),
            store_path: None,
            link_base: String::new(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("standscout");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, writing a commented default file if missing.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(path);
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        log::warn!("error parsing {}: {}; using defaults", path.display(), e);
                        Self::default()
                    }
                }
            }
            Err(e) => {
                log::warn!("error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Active competition key, if one is set and non-blank.
    pub fn competition(&self) -> Option<&str> {
        self.competition_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Database path: `store.path`, else `<data dir>/standscout/standscout.db`.
    pub fn store_path(&self) -> PathBuf {
        match self.store_path.as_deref().filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("standscout")
                .join("standscout.db"),
        }
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Active competition (TBA event key, e.g. "2024txdal")
    // Set with: standscout config set-competition <key>
    "competition.key": null,

    // The Blue Alliance read API
    // The auth key is stored in the system keychain or STANDSCOUT_TBA_KEY, not in this file
    "tba.apiBase": "https://www.thebluealliance.com/api/v3",

    // SQLite database (null = platform data directory)
    "store.path": null,

    // Scouting site URL used for form links in reports ("" = relative links)
    "report.linkBase": ""
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("error writing default {}: {}", path.display(), e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_writes_commented_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings::load_from(&path);
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        // The commented default file loads back to the same values.
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn dotted_keys_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            competition_key: Some("2024txdal".into()),
            link_base: "https://scout.example.org".into(),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"competition.key\": \"2024txdal\""));

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.competition(), Some("2024txdal"));
        assert_eq!(loaded.link_base, "https://scout.example.org");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{\n  // comment\n  \"store.path\": \"/tmp/s.db\"\n}").unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.store_path(), PathBuf::from("/tmp/s.db"));
        assert_eq!(loaded.tba_api_base, DEFAULT_TBA_API_BASE);
        assert_eq!(loaded.competition(), None);
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn blank_competition_is_unset() {
        let settings = Settings { competition_key: Some("  ".into()), ..Settings::default() };
        assert_eq!(settings.competition(), None);
    }
}
