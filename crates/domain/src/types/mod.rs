//! Shared value types used by every other domain module.

mod rule_system;

pub use rule_system::RuleSystem;
