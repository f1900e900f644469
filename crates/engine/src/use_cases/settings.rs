//! Settings use cases.
//!
//! Remembers where files were last written and which rule system was used,
//! so later runs can default to them.

use std::path::Path;

use spellgen_domain::RuleSystem;

use crate::infrastructure::settings::{AppSettings, SettingsError, SettingsStore};

/// Settings operations backed by a [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct SettingsOps {
    store: SettingsStore,
}

impl SettingsOps {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Current settings, defaults if none have been saved.
    pub fn current(&self) -> AppSettings {
        self.store.load()
    }

    /// Directory to resolve relative output paths against.
    pub fn default_directory(&self) -> std::path::PathBuf {
        self.current().default_directory
    }

    /// Record the directory of a written file and the system used.
    pub fn remember(
        &self,
        written: &Path,
        system: RuleSystem,
    ) -> Result<AppSettings, SettingsError> {
        let mut settings = self.current();
        if let Some(dir) = written.parent().filter(|p| !p.as_os_str().is_empty()) {
            settings.default_directory = dir.to_path_buf();
        }
        settings.default_system = system;
        self.store.save(&settings)?;
        Ok(settings)
    }

    pub fn set_directory(&self, directory: &Path) -> Result<AppSettings, SettingsError> {
        let mut settings = self.current();
        settings.default_directory = directory.to_path_buf();
        self.store.save(&settings)?;
        Ok(settings)
    }

    pub fn set_system(&self, system: RuleSystem) -> Result<AppSettings, SettingsError> {
        let mut settings = self.current();
        settings.default_system = system;
        self.store.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ops(dir: &Path) -> SettingsOps {
        SettingsOps::new(SettingsStore::at(dir.join("settings.json")))
    }

    #[test]
    fn remember_saves_parent_directory_and_system() {
        let dir = tempfile::tempdir().expect("temp dir");
        let ops = ops(dir.path());
        let written = dir.path().join("out").join("spells.lst");

        ops.remember(&written, RuleSystem::Dnd5e).expect("save");

        let settings = ops.current();
        assert_eq!(settings.default_directory, dir.path().join("out"));
        assert_eq!(settings.default_system, RuleSystem::Dnd5e);
    }

    #[test]
    fn remember_keeps_directory_for_bare_file_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let ops = ops(dir.path());
        ops.set_directory(Path::new("/data")).expect("save");

        let bare = Path::new("spells.lst");
        ops.remember(bare, RuleSystem::Dnd35e).expect("save");

        assert_eq!(ops.default_directory(), PathBuf::from("/data"));
        assert_eq!(ops.current().default_system, RuleSystem::Dnd35e);
    }

    #[test]
    fn setters_update_one_field() {
        let dir = tempfile::tempdir().expect("temp dir");
        let ops = ops(dir.path());
        ops.set_directory(Path::new("/homebrew")).expect("save");
        let settings = ops.set_system(RuleSystem::Dnd5e).expect("save");
        assert_eq!(settings.default_directory, PathBuf::from("/homebrew"));
        assert_eq!(settings.default_system, RuleSystem::Dnd5e);
    }
}
