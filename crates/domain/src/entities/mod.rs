//! Domain entities.

pub mod spell;

pub use spell::{NormalizedSpell, SpellAttributeSet, SpellComponents};
