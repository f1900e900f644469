//! In-memory list of formatted spells for one output file.

use serde::{Deserialize, Serialize};

use crate::common::spell_key;
use crate::error::DomainError;
use crate::format::OutputLine;
use crate::types::RuleSystem;

/// What to do when a spell with the same key is already in the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Overwrite the existing line in place
    #[default]
    Replace,
    /// Leave the existing line untouched
    Keep,
}

/// Result of [`SpellSession::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Replaced,
    KeptExisting,
}

/// Spells collected for one `.lst` file, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellSession {
    system: RuleSystem,
    entries: Vec<OutputLine>,
}

impl SpellSession {
    pub fn new(system: RuleSystem) -> Self {
        Self {
            system,
            entries: Vec::new(),
        }
    }

    pub fn system(&self) -> RuleSystem {
        self.system
    }

    /// Add a formatted line, resolving duplicate names with `policy`.
    pub fn add(
        &mut self,
        line: OutputLine,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome, DomainError> {
        if line.system() != self.system {
            return Err(DomainError::constraint(format!(
                "Cannot add a {} spell to a {} session",
                line.system(),
                self.system
            )));
        }

        let key = line.key();
        match self.entries.iter().position(|entry| entry.key() == key) {
            Some(index) => match policy {
                DuplicatePolicy::Replace => {
                    self.entries[index] = line;
                    Ok(AddOutcome::Replaced)
                }
                DuplicatePolicy::Keep => Ok(AddOutcome::KeptExisting),
            },
            None => {
                self.entries.push(line);
                Ok(AddOutcome::Added)
            }
        }
    }

    /// Remove the spell named `name`, matched by spell key.
    pub fn remove(&mut self, name: &str) -> Option<OutputLine> {
        let key = spell_key(name);
        let index = self.entries.iter().position(|entry| entry.key() == key)?;
        Some(self.entries.remove(index))
    }

    pub fn find(&self, name: &str) -> Option<&OutputLine> {
        let key = spell_key(name);
        self.entries.iter().find(|entry| entry.key() == key)
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
