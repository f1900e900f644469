//! Per-system spell rules.
//!
//! Every supported [`RuleSystem`] has one [`SystemRules`] table holding its
//! constraint list, class table, school and descriptor vocabularies and
//! output column layout. Tables are built once on first use and are
//! read-only afterwards, so they can be shared freely between threads.
//!
//! # Supported Systems
//!
//! - Pathfinder 1st Edition (`pf1e`)
//! - D&D 3.5 Edition (`dnd35e`)
//! - D&D 5th Edition (`dnd5e`)

mod constraint;
mod dnd35e;
mod dnd5e;
mod layout;
mod pf1e;

pub use constraint::{Casing, Condition, ConstraintKind, FieldConstraint, Requirement};
pub use layout::{Column, ColumnLayout, D20_COLUMNS, DND5E_COLUMNS, TAB_WIDTH};

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::common::slug;
use crate::entities::spell::{
    CASTING_TIME, CLASSES, COMPONENTS, DESCRIPTION, DESCRIPTORS, DURATION, LEVEL_PREFIX, NAME,
    OTHER, RANGE, SAVE, SCHOOL, SPELL_RESISTANCE, SUBSCHOOL, TARGET,
};
use crate::types::RuleSystem;

/// Spellcasting tradition of a class, used to derive the `TYPE:` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CasterType {
    Arcane,
    Divine,
    Psychic,
}

impl CasterType {
    /// Fixed order used when joining caster types.
    pub const ALL: [CasterType; 3] = [Self::Arcane, Self::Divine, Self::Psychic];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Arcane => "Arcane",
            Self::Divine => "Divine",
            Self::Psychic => "Psychic",
        }
    }
}

impl fmt::Display for CasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A class that has its own spell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellClass {
    /// Name as shown to the user, e.g. `Sorcerer/Wizard`
    pub name: &'static str,
    /// Class names written to `CLASSES:` for this list
    pub emits: &'static [&'static str],
    pub caster: CasterType,
}

impl SpellClass {
    pub const fn new(
        name: &'static str,
        emits: &'static [&'static str],
        caster: CasterType,
    ) -> Self {
        Self {
            name,
            emits,
            caster,
        }
    }

    /// Input key carrying this class's spell level (`level-sorcerer/wizard`).
    pub fn level_key(&self) -> String {
        format!("{LEVEL_PREFIX}{}", slug(self.name))
    }
}

/// Everything the validator and formatter need to know about one system.
#[derive(Debug, Clone)]
pub struct SystemRules {
    pub system: RuleSystem,
    pub schools: &'static [&'static str],
    /// School name to its legal subschools
    pub subschools: &'static [(&'static str, &'static [&'static str])],
    pub descriptors: &'static [&'static str],
    pub classes: &'static [SpellClass],
    /// Keys belonging to unsupported psionics rules
    pub psionic_keys: &'static [&'static str],
    /// Ordered constraint table; problems are reported in this order
    pub constraints: Vec<FieldConstraint>,
    pub layout: ColumnLayout,
}

impl SystemRules {
    /// Subschools legal for `school`, matched case-insensitively.
    pub fn subschools_of(&self, school: &str) -> &'static [&'static str] {
        self.subschools
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(school))
            .map(|(_, subschools)| *subschools)
            .unwrap_or_default()
    }

    /// The class whose spell level is stored under `key`.
    pub fn class_for_key(&self, key: &str) -> Option<&'static SpellClass> {
        self.classes.iter().find(|class| class.level_key() == key)
    }

    /// Level key for a class name as it appears in `CLASSES:`.
    ///
    /// Names emitted by a shared list (Pathfinder `Wizard`) map back to the
    /// shared key. Unknown names fall back to their slug so the validator
    /// can report them.
    pub fn level_key_for_class(&self, class_name: &str) -> String {
        let class_name = class_name.trim();
        let matches = |name: &str| name.eq_ignore_ascii_case(class_name);
        self.classes
            .iter()
            .find(|class| matches(class.name) || class.emits.iter().any(|e| matches(e)))
            .map(SpellClass::level_key)
            .unwrap_or_else(|| format!("{LEVEL_PREFIX}{}", slug(class_name)))
    }

    pub fn constraint(&self, key: &str) -> Option<&FieldConstraint> {
        self.constraints.iter().find(|c| c.key == key)
    }

    /// Whether `key` is an input key of this system.
    pub fn is_known_key(&self, key: &str) -> bool {
        key != CLASSES && self.constraint(key).is_some()
    }

    pub fn is_psionic_key(&self, key: &str) -> bool {
        self.psionic_keys.contains(&key)
    }
}

static PF1E_RULES: OnceLock<SystemRules> = OnceLock::new();
static DND35E_RULES: OnceLock<SystemRules> = OnceLock::new();
static DND5E_RULES: OnceLock<SystemRules> = OnceLock::new();

/// Rules table for `system`.
pub fn rules_for(system: RuleSystem) -> &'static SystemRules {
    match system {
        RuleSystem::Pathfinder1e => PF1E_RULES.get_or_init(pf1e::rules),
        RuleSystem::Dnd35e => DND35E_RULES.get_or_init(dnd35e::rules),
        RuleSystem::Dnd5e => DND5E_RULES.get_or_init(dnd5e::rules),
    }
}

pub(crate) const MAX_NAME_LEN: usize = 100;
pub(crate) const MAX_CASTING_TIME_LEN: usize = 60;
pub(crate) const MAX_RANGE_LEN: usize = 100;
pub(crate) const MAX_DURATION_LEN: usize = 100;
pub(crate) const MAX_TARGET_LEN: usize = 200;
pub(crate) const MAX_SAVE_LEN: usize = 100;
pub(crate) const MAX_DESCRIPTION_LEN: usize = 10_000;

pub(crate) const MIN_SPELL_LEVEL: u8 = 0;
pub(crate) const MAX_SPELL_LEVEL: u8 = 9;

/// Schools shared by every system; 5e drops `Universal`.
pub(crate) const D20_SCHOOLS: &[&str] = &[
    "Abjuration",
    "Conjuration",
    "Divination",
    "Enchantment",
    "Evocation",
    "Illusion",
    "Necromancy",
    "Transmutation",
    "Universal",
];

pub(crate) const SPELL_RESISTANCE_VALUES: &[&str] = &["Yes", "Yes (Harmless)", "No", "None"];

pub(crate) const SPELL_RESISTANCE_SYNONYMS: &[(&str, &str)] = &[
    ("harmless", "Yes (Harmless)"),
    ("yes, harmless", "Yes (Harmless)"),
    ("yes harmless", "Yes (Harmless)"),
    ("n/a", "None"),
];

pub(crate) const D20_CASTING_TIME_SYNONYMS: &[(&str, &str)] = &[
    ("standard", "1 standard action"),
    ("standard action", "1 standard action"),
    ("swift action", "1 swift action"),
    ("immediate action", "1 immediate action"),
    ("move action", "1 move action"),
    ("full-round", "1 full-round action"),
    ("full-round action", "1 full-round action"),
    ("full round action", "1 full-round action"),
    ("round", "1 round"),
];

/// Level constraints for every class, in class table order.
fn level_constraints(classes: &[SpellClass]) -> impl Iterator<Item = FieldConstraint> + '_ {
    classes.iter().map(|class| {
        FieldConstraint::optional(
            class.level_key(),
            ConstraintKind::Level {
                min: MIN_SPELL_LEVEL,
                max: MAX_SPELL_LEVEL,
            },
        )
    })
}

/// Constraint table shared by Pathfinder 1e and D&D 3.5e.
pub(crate) fn d20_constraints(
    schools: &'static [&'static str],
    descriptors: &'static [&'static str],
    classes: &'static [SpellClass],
) -> Vec<FieldConstraint> {
    let mut constraints = vec![
        FieldConstraint::required(NAME, FieldConstraint::text(MAX_NAME_LEN)),
        FieldConstraint::required(
            SCHOOL,
            ConstraintKind::Enumeration {
                values: schools,
                synonyms: &[],
            },
        ),
        FieldConstraint::new(
            SUBSCHOOL,
            ConstraintKind::Subschool,
            Requirement::ApplicableIf(Condition::SchoolHasSubschools),
        ),
        FieldConstraint::optional(
            DESCRIPTORS,
            ConstraintKind::MultiEnumeration {
                values: descriptors,
            },
        ),
    ];
    constraints.extend(level_constraints(classes));
    constraints.extend([
        FieldConstraint::required(CLASSES, ConstraintKind::ClassList),
        FieldConstraint::required(
            CASTING_TIME,
            ConstraintKind::FreeText {
                max_len: MAX_CASTING_TIME_LEN,
                casing: Casing::Verbatim,
                synonyms: D20_CASTING_TIME_SYNONYMS,
            },
        ),
        FieldConstraint::optional(COMPONENTS, ConstraintKind::Components { allow_focus: true }),
        FieldConstraint::required(
            RANGE,
            ConstraintKind::FreeText {
                max_len: MAX_RANGE_LEN,
                casing: Casing::CapitalizeFirst,
                synonyms: &[],
            },
        ),
        FieldConstraint::required(DURATION, FieldConstraint::text(MAX_DURATION_LEN)),
        FieldConstraint::optional(TARGET, FieldConstraint::text(MAX_TARGET_LEN)),
        FieldConstraint::optional(
            SAVE,
            ConstraintKind::FreeText {
                max_len: MAX_SAVE_LEN,
                casing: Casing::CapitalizeFirst,
                synonyms: &[],
            },
        ),
        FieldConstraint::required(
            SPELL_RESISTANCE,
            ConstraintKind::Enumeration {
                values: SPELL_RESISTANCE_VALUES,
                synonyms: SPELL_RESISTANCE_SYNONYMS,
            },
        ),
        FieldConstraint::optional(DESCRIPTION, FieldConstraint::text(MAX_DESCRIPTION_LEN)),
        FieldConstraint::optional(OTHER, ConstraintKind::TokenList),
    ]);
    constraints
}

/// 5e table: no descriptors, targets or spell resistance.
pub(crate) fn dnd5e_constraints(
    schools: &'static [&'static str],
    casting_time_synonyms: &'static [(&'static str, &'static str)],
    classes: &'static [SpellClass],
) -> Vec<FieldConstraint> {
    let mut constraints = vec![
        FieldConstraint::required(NAME, FieldConstraint::text(MAX_NAME_LEN)),
        FieldConstraint::required(
            SCHOOL,
            ConstraintKind::Enumeration {
                values: schools,
                synonyms: &[],
            },
        ),
        FieldConstraint::new(
            SUBSCHOOL,
            ConstraintKind::Subschool,
            Requirement::ApplicableIf(Condition::SchoolHasSubschools),
        ),
    ];
    constraints.extend(level_constraints(classes));
    constraints.extend([
        FieldConstraint::required(CLASSES, ConstraintKind::ClassList),
        FieldConstraint::required(
            CASTING_TIME,
            ConstraintKind::FreeText {
                max_len: MAX_CASTING_TIME_LEN,
                casing: Casing::Verbatim,
                synonyms: casting_time_synonyms,
            },
        ),
        FieldConstraint::optional(
            COMPONENTS,
            ConstraintKind::Components { allow_focus: false },
        ),
        FieldConstraint::required(
            RANGE,
            ConstraintKind::FreeText {
                max_len: MAX_RANGE_LEN,
                casing: Casing::CapitalizeFirst,
                synonyms: &[],
            },
        ),
        FieldConstraint::required(
            DURATION,
            ConstraintKind::FreeText {
                max_len: MAX_DURATION_LEN,
                casing: Casing::CapitalizeFirst,
                synonyms: &[],
            },
        ),
        FieldConstraint::optional(
            SAVE,
            ConstraintKind::FreeText {
                max_len: MAX_SAVE_LEN,
                casing: Casing::CapitalizeFirst,
                synonyms: &[],
            },
        ),
        FieldConstraint::optional(DESCRIPTION, FieldConstraint::text(MAX_DESCRIPTION_LEN)),
        FieldConstraint::optional(OTHER, ConstraintKind::TokenList),
    ]);
    constraints
}
