//! D&D 5th Edition spell rules.

use super::{dnd5e_constraints, CasterType, ColumnLayout, SpellClass, SystemRules, DND5E_COLUMNS};
use crate::types::RuleSystem;

const SCHOOLS: &[&str] = &[
    "Abjuration",
    "Conjuration",
    "Divination",
    "Enchantment",
    "Evocation",
    "Illusion",
    "Necromancy",
    "Transmutation",
];

/// Rituals are modelled as the only subschool of every school.
const RITUAL: &[&str] = &["Ritual"];

const SUBSCHOOLS: &[(&str, &[&str])] = &[
    ("Abjuration", RITUAL),
    ("Conjuration", RITUAL),
    ("Divination", RITUAL),
    ("Enchantment", RITUAL),
    ("Evocation", RITUAL),
    ("Illusion", RITUAL),
    ("Necromancy", RITUAL),
    ("Transmutation", RITUAL),
];

const CASTING_TIME_SYNONYMS: &[(&str, &str)] = &[
    ("action", "1 action"),
    ("bonus action", "1 bonus action"),
    ("reaction", "1 reaction"),
];

const CLASSES: &[SpellClass] = &[
    SpellClass::new("Artificer", &["Artificer"], CasterType::Arcane),
    SpellClass::new("Bard", &["Bard"], CasterType::Arcane),
    SpellClass::new("Sorcerer", &["Sorcerer"], CasterType::Arcane),
    SpellClass::new("Warlock", &["Warlock"], CasterType::Arcane),
    SpellClass::new(
        "Warlock Book of Shadows",
        &["Warlock Book of Shadows"],
        CasterType::Arcane,
    ),
    SpellClass::new("Wizard", &["Wizard"], CasterType::Arcane),
    SpellClass::new("Cleric", &["Cleric"], CasterType::Divine),
    SpellClass::new("Druid", &["Druid"], CasterType::Divine),
    SpellClass::new("Paladin", &["Paladin"], CasterType::Divine),
    SpellClass::new("Ranger", &["Ranger"], CasterType::Divine),
];

pub(super) fn rules() -> SystemRules {
    SystemRules {
        system: RuleSystem::Dnd5e,
        schools: SCHOOLS,
        subschools: SUBSCHOOLS,
        descriptors: &[],
        classes: CLASSES,
        psionic_keys: &[],
        constraints: dnd5e_constraints(SCHOOLS, CASTING_TIME_SYNONYMS, CLASSES),
        layout: ColumnLayout {
            columns: DND5E_COLUMNS,
            type_suffix: Some("Spell"),
            name_tab_stops: 6,
            type_tab_stops: 4,
        },
    }
}
