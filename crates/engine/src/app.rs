//! Application state and composition.

use spellgen_domain::RuleSystem;

use crate::infrastructure::settings::SettingsStore;
use crate::use_cases::{SettingsOps, SpellOps};

/// Main application state.
///
/// Holds the settings store and hands out per-system spell operations.
pub struct App {
    pub settings: SettingsOps,
}

impl App {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            settings: SettingsOps::new(store),
        }
    }

    /// Rule system to use when none is given explicitly.
    pub fn resolve_system(&self, requested: Option<RuleSystem>) -> RuleSystem {
        requested.unwrap_or_else(|| self.settings.current().default_system)
    }

    pub fn spells(&self, system: RuleSystem) -> SpellOps {
        SpellOps::new(system)
    }
}
