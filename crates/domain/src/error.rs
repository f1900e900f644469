//! Error types for the domain layer
//!
//! Three families live here:
//!
//! - [`ProblemKind`] / [`Problem`]: user-input problems reported by the
//!   validator. They are data, not `Err` values, because the validator
//!   collects all of them in one pass.
//! - [`FormatError`]: a broken caller contract when formatting.
//! - [`DomainError`]: parse and constraint errors for value objects and the
//!   spell session.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RuleSystem;

/// Kind of problem found in a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    MissingRequiredField,
    InvalidEnumerationValue,
    OutOfRangeValue,
    UnsupportedMultiSubschool,
    UnsupportedPsionics,
}

impl ProblemKind {
    /// Short description shown next to the offending form field.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing",
            Self::InvalidEnumerationValue => "invalid value",
            Self::OutOfRangeValue => "out of range",
            Self::UnsupportedMultiSubschool => "multiple subschools unsupported",
            Self::UnsupportedPsionics => "psionics unsupported",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A problem attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    /// Input key the problem belongs to (e.g. `school`, `level-wizard`)
    pub field: String,
    pub kind: ProblemKind,
}

impl Problem {
    pub fn new(field: impl Into<String>, kind: ProblemKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ProblemKind::MissingRequiredField)
    }

    pub fn invalid(field: impl Into<String>) -> Self {
        Self::new(field, ProblemKind::InvalidEnumerationValue)
    }

    pub fn out_of_range(field: impl Into<String>) -> Self {
        Self::new(field, ProblemKind::OutOfRangeValue)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProblemKind::MissingRequiredField => write!(f, "missing {}", self.field),
            ProblemKind::InvalidEnumerationValue => write!(f, "invalid value for {}", self.field),
            ProblemKind::OutOfRangeValue => write!(f, "out of range {}", self.field),
            ProblemKind::UnsupportedMultiSubschool => {
                write!(f, "multiple subschools unsupported in {}", self.field)
            }
            ProblemKind::UnsupportedPsionics => write!(f, "psionics unsupported: {}", self.field),
        }
    }
}

/// The formatter was handed a spell it must never see.
///
/// This is a programming error in the caller, not a user input problem.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("Spell validated for {validated} cannot be formatted for {requested}")]
    RuleSystemMismatch {
        validated: RuleSystem,
        requested: RuleSystem,
    },
}

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for RuleSystem {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "pf1e" => Ok(Self::Pathfinder1e),
    ///             _ => Err(DomainError::parse(format!("Unknown rule system: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_display() {
        assert_eq!(Problem::missing("name").to_string(), "missing name");
        assert_eq!(
            Problem::invalid("school").to_string(),
            "invalid value for school"
        );
        assert_eq!(
            Problem::out_of_range("level-wizard").to_string(),
            "out of range level-wizard"
        );
    }

    #[test]
    fn test_problem_kind_description() {
        assert_eq!(ProblemKind::OutOfRangeValue.to_string(), "out of range");
        assert_eq!(
            ProblemKind::UnsupportedPsionics.description(),
            "psionics unsupported"
        );
    }

    #[test]
    fn test_format_error() {
        let err = FormatError::RuleSystemMismatch {
            validated: RuleSystem::Dnd5e,
            requested: RuleSystem::Pathfinder1e,
        };
        assert_eq!(
            err.to_string(),
            "Spell validated for D&D 5e cannot be formatted for Pathfinder 1e"
        );
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("wrong rule system");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(err.to_string(), "Constraint violation: wrong rule system");
    }
}
