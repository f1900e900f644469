//! Pathfinder 1st Edition spell rules.

use super::{
    d20_constraints, CasterType, ColumnLayout, SpellClass, SystemRules, D20_COLUMNS, D20_SCHOOLS,
};
use crate::types::RuleSystem;

const SUBSCHOOLS: &[(&str, &[&str])] = &[
    ("Abjuration", &[]),
    (
        "Conjuration",
        &[
            "Calling",
            "Creation",
            "Healing",
            "Summoning",
            "Teleportation",
        ],
    ),
    ("Divination", &["Scrying"]),
    ("Enchantment", &["Charm", "Compulsion"]),
    ("Evocation", &[]),
    (
        "Illusion",
        &["Figment", "Glamer", "Pattern", "Phantasm", "Shadow"],
    ),
    ("Necromancy", &[]),
    ("Transmutation", &["Polymorph"]),
    ("Universal", &[]),
];

const DESCRIPTORS: &[&str] = &[
    "Acid",
    "Air",
    "Chaotic",
    "Cold",
    "Curse",
    "Darkness",
    "Death",
    "Disease",
    "Draconic",
    "Earth",
    "Electricity",
    "Emotion",
    "Evil",
    "Fear",
    "Fire",
    "Force",
    "Good",
    "Language-Dependent",
    "Lawful",
    "Light",
    "Meditative",
    "Mind-Affecting",
    "Pain",
    "Poison",
    "Shadow",
    "Sonic",
    "Water",
];

const CLASSES: &[SpellClass] = &[
    SpellClass::new("Alchemist", &["Alchemist"], CasterType::Arcane),
    SpellClass::new("Bard", &["Bard"], CasterType::Arcane),
    SpellClass::new("Bloodrager", &["Bloodrager"], CasterType::Arcane),
    SpellClass::new("Magus", &["Magus"], CasterType::Arcane),
    SpellClass::new(
        "Sorcerer/Wizard",
        &["Sorcerer", "Wizard"],
        CasterType::Arcane,
    ),
    SpellClass::new("Summoner", &["Summoner"], CasterType::Arcane),
    SpellClass::new("Witch", &["Witch"], CasterType::Arcane),
    SpellClass::new("Antipaladin", &["Antipaladin"], CasterType::Divine),
    SpellClass::new("Cleric", &["Cleric"], CasterType::Divine),
    SpellClass::new("Druid", &["Druid"], CasterType::Divine),
    SpellClass::new("Hunter", &["Hunter"], CasterType::Divine),
    SpellClass::new("Inquisitor", &["Inquisitor"], CasterType::Divine),
    SpellClass::new("Paladin", &["Paladin"], CasterType::Divine),
    SpellClass::new("Ranger", &["Ranger"], CasterType::Divine),
    SpellClass::new("Shaman", &["Shaman"], CasterType::Divine),
    SpellClass::new("Medium", &["Medium"], CasterType::Psychic),
    SpellClass::new("Mesmerist", &["Mesmerist"], CasterType::Psychic),
    SpellClass::new("Occultist", &["Occultist"], CasterType::Psychic),
    SpellClass::new("Psychic", &["Psychic"], CasterType::Psychic),
    SpellClass::new("Spiritualist", &["Spiritualist"], CasterType::Psychic),
];

pub(super) fn rules() -> SystemRules {
    SystemRules {
        system: RuleSystem::Pathfinder1e,
        schools: D20_SCHOOLS,
        subschools: SUBSCHOOLS,
        descriptors: DESCRIPTORS,
        classes: CLASSES,
        psionic_keys: &[],
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
    fn every_school_has_a_subschool_entry() {
        for school in D20_SCHOOLS {
            let listed = SUBSCHOOLS.iter().any(|(name, _)| name == school);
            assert!(listed, "{school}");
        }
    }

    #[test]
    fn shared_list_emits_both_classes() {
        let rules = rules();
        let class = rules
            .class_for_key("level-sorcerer/wizard")
            .expect("shared list");
        assert_eq!(class.emits, &["Sorcerer", "Wizard"]);
        assert!(rules.class_for_key("level-wizard").is_none());
    }

    #[test]
    fn psychic_classes_are_present() {
        let psychic = CLASSES
            .iter()
            .filter(|c| c.caster == CasterType::Psychic)
            .count();
        assert_eq!(psychic, 5);
    }
}
