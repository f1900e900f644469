//! D&D 3.5 Edition spell rules.
//!
//! Psionics (powers, power points, disciplines) are not supported. Their
//! keys are recognized only so they can be rejected explicitly.

use super::{
    d20_constraints, CasterType, ColumnLayout, SpellClass, SystemRules, D20_COLUMNS, D20_SCHOOLS,
};
use crate::types::RuleSystem;

const SUBSCHOOLS: &[(&str, &[&str])] = &[
    ("Abjuration", &[]),
    (
        "Conjuration",
        &["Calling", "Creation", "Healing", "Summoning"],
    ),
    ("Divination", &["Scrying"]),
    ("Enchantment", &["Charm", "Compulsion"]),
    ("Evocation", &[]),
    (
        "Illusion",
        &["Figment", "Glamer", "Pattern", "Phantasm", "Shadow"],
    ),
    ("Necromancy", &[]),
    ("Transmutation", &[]),
    ("Universal", &[]),
];

const DESCRIPTORS: &[&str] = &[
    "Acid",
    "Air",
    "Chaos",
    "Chaotic",
    "Cold",
    "Compulsion",
    "Creation",
    "Darkness",
    "Death",
    "Earth",
    "Ectomancy",
    "Electricity",
    "Evil",
    "Fear",
    "Fire",
    "Fire or Cold",
    "Force",
    "Glamer",
    "Good",
    "Good or Evil",
    "Ice",
    "Incarnum",
    "Investiture",
    "Language-Dependent",
    "Law",
    "Lawful",
    "Light",
    "Mind-Affecting",
    "Mindset",
    "Pattern",
    "Shadow",
    "Summoning",
    "Teleportation",
    "Water",
];

const CLASSES: &[SpellClass] = &[
    SpellClass::new("Bard", &["Bard"], CasterType::Arcane),
    SpellClass::new("Wizard", &["Wizard"], CasterType::Arcane),
    SpellClass::new("Blackguard", &["Blackguard"], CasterType::Divine),
    SpellClass::new("Cleric", &["Cleric"], CasterType::Divine),
    SpellClass::new("Druid", &["Druid"], CasterType::Divine),
    SpellClass::new("Paladin", &["Paladin"], CasterType::Divine),
];

const PSIONIC_KEYS: &[&str] = &[
    "level-psion",
    "level-wilder",
    "level-psychic-warrior",
    "power-points",
    "discipline",
];

pub(super) fn rules() -> SystemRules {
    SystemRules {
        system: RuleSystem::Dnd35e,
        schools: D20_SCHOOLS,
        subschools: SUBSCHOOLS,
        descriptors: DESCRIPTORS,
        classes: CLASSES,
        psionic_keys: PSIONIC_KEYS,
        constraints: d20_constraints(D20_SCHOOLS, DESCRIPTORS, CLASSES),
        layout: ColumnLayout {
            columns: D20_COLUMNS,
            type_suffix: None,
            name_tab_stops: 6,
            type_tab_stops: 4,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_psychic_casters() {
        assert!(CLASSES.iter().all(|c| c.caster != CasterType::Psychic));
    }

    #[test]
    fn psionic_keys_are_not_input_keys() {
        let rules = rules();
        for key in PSIONIC_KEYS {
            assert!(rules.is_psionic_key(key));
            assert!(!rules.is_known_key(key));
        }
    }

    #[test]
    fn transmutation_has_no_subschools() {
        assert!(rules().subschools_of("Transmutation").is_empty());
    }
}
