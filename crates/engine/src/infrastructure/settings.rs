//! Remembered user settings.
//!
//! Stored as JSON at:
//! - Linux: ~/.config/spellgen/settings.json
//! - macOS: ~/Library/Application Support/io.spellgen.spellgen/settings.json
//! - Windows: C:\Users\<User>\AppData\Roaming\spellgen\spellgen\config\settings.json
//!
//! `SPELLGEN_SETTINGS` overrides the path.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use spellgen_domain::RuleSystem;
use thiserror::Error;

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "SPELLGEN_SETTINGS";

/// Errors that can occur while saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Last-used directory and rule system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub default_directory: PathBuf,
    #[serde(default)]
    pub default_system: RuleSystem,
}

impl Default for AppSettings {
    fn default() -> Self {
        let default_directory = directories::BaseDirs::new()
            .and_then(|dirs| find_pcgen_data_dir(dirs.home_dir()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            default_directory,
            default_system: RuleSystem::default(),
        }
    }
}

/// Locate the PCGen `data` directory of a default Windows install.
///
/// Looks for `<home>/AppData/Local/PCGen/<6.x version>/data`, skipping
/// directories whose name contains `Save`.
pub fn find_pcgen_data_dir(home: &Path) -> Option<PathBuf> {
    let pcgen = home.join("AppData").join("Local").join("PCGen");
    let mut versions: Vec<PathBuf> = fs::read_dir(&pcgen)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with("6.") && !name.contains("Save") && entry.path().is_dir()
        })
        .map(|entry| entry.path())
        .collect();
    versions.sort();
    let data = versions.into_iter().next()?.join("data");
    tracing::debug!(path = %data.display(), "Found PCGen data directory");
    Some(data)
}

/// JSON file backing [`AppSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Store at the platform config location, or `SPELLGEN_SETTINGS`.
    pub fn new() -> Self {
        let path = match std::env::var_os(SETTINGS_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => match ProjectDirs::from("io", "spellgen", "spellgen") {
                Some(dirs) => dirs.config_dir().join("settings.json"),
                None => PathBuf::from("spellgen_settings.json"),
            },
        };
        Self::at(path)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when missing or unreadable.
    pub fn load(&self) -> AppSettings {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
            return AppSettings::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(data) => match serde_json::from_str::<AppSettings>(&data) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings file: {}", e);
                    AppSettings::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings file: {}", e);
                AppSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        tracing::debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));
        let settings = AppSettings {
            default_directory: PathBuf::from("/data/homebrew"),
            default_system: RuleSystem::Dnd5e,
        };
        store.save(&settings).expect("save");
        assert_eq!(store.load(), settings);

        let json = fs::read_to_string(store.path()).expect("read");
        assert!(json.contains("\"D&D 5e\""));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write");
        let settings = SettingsStore::at(&path).load();
        assert_eq!(settings.default_system, RuleSystem::Pathfinder1e);
    }

    #[test]
    fn missing_system_defaults_to_pathfinder() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"default_directory": "/tmp"}"#).expect("write");
        let settings = SettingsStore::at(&path).load();
        assert_eq!(settings.default_directory, PathBuf::from("/tmp"));
        assert_eq!(settings.default_system, RuleSystem::Pathfinder1e);
    }

    #[test]
    fn finds_pcgen_data_dir() {
        let home = tempfile::tempdir().expect("temp dir");
        let pcgen = home.path().join("AppData").join("Local").join("PCGen");
        fs::create_dir_all(pcgen.join("6.08.00RC7 Save")).expect("mkdir");
        fs::create_dir_all(pcgen.join("6.08.00RC7")).expect("mkdir");
        fs::create_dir_all(pcgen.join("5.16")).expect("mkdir");

        assert_eq!(
            find_pcgen_data_dir(home.path()),
            Some(pcgen.join("6.08.00RC7").join("data"))
        );
    }

    #[test]
    fn no_pcgen_install() {
        let home = tempfile::tempdir().expect("temp dir");
        assert_eq!(find_pcgen_data_dir(home.path()), None);
    }
}
