//! Supported rule systems.
//!
//! Each variant selects one constraint table and one column layout (see
//! [`crate::game_systems`]). PCGen identifies the same systems by a
//! `GAMEMODE` name, which is also carried here for `.pcc` generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The tabletop rule system a spell is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RuleSystem {
    #[default]
    #[serde(rename = "Pathfinder 1e", alias = "pf1e")]
    Pathfinder1e,
    #[serde(rename = "D&D 3.5e", alias = "35e")]
    Dnd35e,
    #[serde(rename = "D&D 5e", alias = "5e")]
    Dnd5e,
}

impl RuleSystem {
    /// All supported systems, in menu order.
    pub const ALL: [RuleSystem; 3] = [Self::Pathfinder1e, Self::Dnd35e, Self::Dnd5e];

    /// Get the display name for this system
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pathfinder1e => "Pathfinder 1e",
            Self::Dnd35e => "D&D 3.5e",
            Self::Dnd5e => "D&D 5e",
        }
    }

    /// Short identifier used on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Pathfinder1e => "pf1e",
            Self::Dnd35e => "35e",
            Self::Dnd5e => "5e",
        }
    }

    /// PCGen `GAMEMODE:` value for campaign files.
    pub fn game_mode(&self) -> &'static str {
        match self {
            Self::Pathfinder1e => "Pathfinder",
            Self::Dnd35e => "35e",
            Self::Dnd5e => "5e",
        }
    }

    /// PCGen campaign `TYPE:` value for homebrew sources.
    pub fn pcc_type(&self) -> &'static str {
        match self {
            Self::Pathfinder1e => "Homebrew.PathfinderHomebrew",
            Self::Dnd35e => "Homebrew.35Homebrew",
            Self::Dnd5e => "Homebrew.5eHomebrew",
        }
    }
}

impl fmt::Display for RuleSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RuleSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|system| {
                wanted.eq_ignore_ascii_case(system.id())
                    || wanted.eq_ignore_ascii_case(system.display_name())
                    || wanted.eq_ignore_ascii_case(&format!("{system:?}"))
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown rule system: {}", wanted)))
    }
}
