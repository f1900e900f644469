//! Declarative field constraints.
//!
//! A constraint table is an ordered list of [`FieldConstraint`]s. The order
//! is the order in which the validator reports problems.

use crate::entities::spell::SCHOOL;
use crate::entities::SpellAttributeSet;

use super::SystemRules;

/// How a text value is cased after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// Keep exactly as entered
    Verbatim,
    /// Upper-case only the first character
    CapitalizeFirst,
}

/// A predicate over fields that were already processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The normalized school has at least one subschool in this system.
    SchoolHasSubschools,
}

impl Condition {
    /// Evaluate against the partially normalized set.
    ///
    /// Returns `None` when the controlling field was missing or rejected, in
    /// which case the dependent field is skipped.
    pub fn evaluate(&self, normalized: &SpellAttributeSet, rules: &SystemRules) -> Option<bool> {
        match self {
            Self::SchoolHasSubschools => normalized
                .value_of(SCHOOL)
                .map(|school| !rules.subschools_of(school).is_empty()),
        }
    }
}

/// Whether a field must, may or may not be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    /// Required when the condition holds, optional otherwise.
    RequiredIf(Condition),
    /// Optional when the condition holds; any value is invalid otherwise.
    ApplicableIf(Condition),
}

/// The rule a field's value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Free text up to `max_len` characters. Whole-value synonyms are
    /// replaced before casing is applied.
    FreeText {
        max_len: usize,
        casing: Casing,
        synonyms: &'static [(&'static str, &'static str)],
    },
    /// One of a fixed list, matched case-insensitively.
    Enumeration {
        values: &'static [&'static str],
        synonyms: &'static [(&'static str, &'static str)],
    },
    /// Any number of values from a fixed list, `,` or `|` separated.
    MultiEnumeration { values: &'static [&'static str] },
    /// A single subschool legal for the already-normalized school.
    Subschool,
    /// Component letters; `allow_focus` admits F and DF.
    Components { allow_focus: bool },
    /// Spell level for one class.
    Level { min: u8, max: u8 },
    /// At least one `level-*` key must be filled in.
    ClassList,
    /// Extra tab or newline separated PCGen tokens.
    TokenList,
}

/// One row of a constraint table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    pub key: String,
    pub kind: ConstraintKind,
    pub requirement: Requirement,
}

impl FieldConstraint {
    pub fn new(key: impl Into<String>, kind: ConstraintKind, requirement: Requirement) -> Self {
        Self {
            key: key.into(),
            kind,
            requirement,
        }
    }

    pub fn required(key: impl Into<String>, kind: ConstraintKind) -> Self {
        Self::new(key, kind, Requirement::Required)
    }

    pub fn optional(key: impl Into<String>, kind: ConstraintKind) -> Self {
        Self::new(key, kind, Requirement::Optional)
    }

    /// Free text field with verbatim casing and no synonyms.
    pub fn text(max_len: usize) -> ConstraintKind {
        ConstraintKind::FreeText {
            max_len,
            casing: Casing::Verbatim,
            synonyms: &[],
        }
    }
}
