//! Spell validation and PCGen line formatting.
//!
//! The domain crate is pure: no I/O, no logging, no global mutable state.
//! A raw attribute map goes through [`validate`] and, when accepted,
//! through [`format`] to become one `.lst` line.
//!
//! ## Structure
//!
//! - `types/` - Rule system selector
//! - `entities/` - Attribute sets and spell components
//! - `game_systems/` - Per-system constraint tables and column layouts
//! - `validation` - The attribute validator
//! - `format` - The line formatter
//! - `session` - Spells collected for one output file

pub mod common;
pub mod entities;
pub mod error;
pub mod format;
pub mod game_systems;
pub mod session;
pub mod types;
pub mod validation;

pub use entities::{NormalizedSpell, SpellAttributeSet, SpellComponents};
pub use error::{DomainError, FormatError, Problem, ProblemKind};
pub use format::{format, OutputLine};
pub use game_systems::{rules_for, CasterType, SpellClass, SystemRules};
pub use session::{AddOutcome, DuplicatePolicy, SpellSession};
pub use types::RuleSystem;
pub use validation::{ignored_keys, validate, ValidationResult};
