//! Use cases - User story orchestration.
//!
//! Each module contains use cases for one area. Use cases orchestrate the
//! domain validator and formatter with the file readers and writers.

pub mod settings;
pub mod spells;

pub use settings::SettingsOps;
pub use spells::{
    GenerateReport, GenerateRequest, LoadedLst, RejectedSpell, SpellCheck, SpellError, SpellOps,
};
