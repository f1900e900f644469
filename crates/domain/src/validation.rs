//! Attribute validation.
//!
//! [`validate`] walks the constraint table of a rule system in order,
//! collecting every problem in one pass. Values that pass are written to the
//! normalized set in canonical form; blank values are dropped, so a
//! normalized set re-validates to itself.

use crate::common::capitalize_first;
use crate::entities::spell::{CLASSES, LEVEL_PREFIX, SCHOOL};
use crate::entities::{NormalizedSpell, SpellAttributeSet, SpellComponents};
use crate::error::{Problem, ProblemKind};
use crate::game_systems::{
    rules_for, Casing, ConstraintKind, FieldConstraint, Requirement, SystemRules,
};
use crate::types::RuleSystem;

/// Outcome of validating one raw attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Normalized(NormalizedSpell),
    /// Every problem found, in constraint table order
    Rejected(Vec<Problem>),
}

impl ValidationResult {
    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized(_))
    }

    /// Problems found, empty when the spell was accepted.
    pub fn problems(&self) -> &[Problem] {
        match self {
            Self::Normalized(_) => &[],
            Self::Rejected(problems) => problems,
        }
    }

    pub fn into_result(self) -> Result<NormalizedSpell, Vec<Problem>> {
        match self {
            Self::Normalized(spell) => Ok(spell),
            Self::Rejected(problems) => Err(problems),
        }
    }
}

/// Validate and normalize a raw attribute set for `system`.
///
/// Keys the system does not know are ignored, except `level-*` keys naming
/// an unknown class and psionics keys, which are reported.
pub fn validate(raw: &SpellAttributeSet, system: RuleSystem) -> ValidationResult {
    validate_with(raw, rules_for(system))
}

fn validate_with(raw: &SpellAttributeSet, rules: &SystemRules) -> ValidationResult {
    let mut normalized = SpellAttributeSet::new();
    let mut problems = Vec::new();

    for constraint in &rules.constraints {
        check_field(constraint, raw, rules, &mut normalized, &mut problems);
    }

    if problems.is_empty() {
        ValidationResult::Normalized(NormalizedSpell::new(rules.system, normalized))
    } else {
        ValidationResult::Rejected(problems)
    }
}

/// Input keys present in `raw` that `system` ignores.
pub fn ignored_keys(raw: &SpellAttributeSet, system: RuleSystem) -> Vec<String> {
    let rules = rules_for(system);
    raw.keys()
        .filter(|key| {
            !rules.is_known_key(key) && !rules.is_psionic_key(key) && !key.starts_with(LEVEL_PREFIX)
        })
        .map(str::to_string)
        .collect()
}

fn check_field(
    constraint: &FieldConstraint,
    raw: &SpellAttributeSet,
    rules: &SystemRules,
    normalized: &mut SpellAttributeSet,
    problems: &mut Vec<Problem>,
) {
    let key = constraint.key.as_str();

    if constraint.kind == ConstraintKind::ClassList {
        check_class_list(raw, rules, problems);
        return;
    }

    let value = raw.value_of(key);
    let required = match constraint.requirement {
        Requirement::Required => true,
        Requirement::Optional => false,
        Requirement::RequiredIf(condition) => match condition.evaluate(normalized, rules) {
            Some(holds) => holds,
            None => return,
        },
        Requirement::ApplicableIf(condition) => match condition.evaluate(normalized, rules) {
            Some(true) => false,
            Some(false) => {
                if value.is_some() {
                    problems.push(Problem::invalid(key));
                }
                return;
            }
            None => return,
        },
    };

    let Some(value) = value else {
        if required {
            problems.push(Problem::missing(key));
        }
        return;
    };

    match normalize_value(&constraint.kind, value, rules, normalized) {
        Ok(Some(canonical)) => {
            normalized.insert(key, canonical);
        }
        Ok(None) if required => problems.push(Problem::missing(key)),
        Ok(None) => {}
        Err(kind) => problems.push(Problem::new(key, kind)),
    }
}

/// Canonical form of a non-blank value.
///
/// `Ok(None)` means the value normalized to nothing (only separators).
fn normalize_value(
    kind: &ConstraintKind,
    value: &str,
    rules: &SystemRules,
    normalized: &SpellAttributeSet,
) -> Result<Option<String>, ProblemKind> {
    match *kind {
        ConstraintKind::FreeText {
            max_len,
            casing,
            synonyms,
        } => {
            if value.chars().count() > max_len {
                return Err(ProblemKind::OutOfRangeValue);
            }
            let value = lookup_synonym(synonyms, value).unwrap_or(value);
            Ok(Some(match casing {
                Casing::Verbatim => value.to_string(),
                Casing::CapitalizeFirst => capitalize_first(value),
            }))
        }
        ConstraintKind::Enumeration { values, synonyms } => lookup_synonym(synonyms, value)
            .or_else(|| lookup(values, value))
            .map(|canonical| Some(canonical.to_string()))
            .ok_or(ProblemKind::InvalidEnumerationValue),
        ConstraintKind::MultiEnumeration { values } => {
            let mut selected: Vec<&str> = Vec::new();
            let parts = value.split([',', '|']).map(str::trim);
            for part in parts.filter(|p| !p.is_empty()) {
                let canonical = lookup(values, part).ok_or(ProblemKind::InvalidEnumerationValue)?;
                if !selected.contains(&canonical) {
                    selected.push(canonical);
                }
            }
            Ok((!selected.is_empty()).then(|| selected.join("|")))
        }
        ConstraintKind::Subschool => {
            if is_multi_subschool(value) {
                return Err(ProblemKind::UnsupportedMultiSubschool);
            }
            let school = normalized.value_of(SCHOOL).unwrap_or_default();
            lookup(rules.subschools_of(school), value)
                .map(|canonical| Some(canonical.to_string()))
                .ok_or(ProblemKind::InvalidEnumerationValue)
        }
        ConstraintKind::Components { allow_focus } => {
            let components =
                SpellComponents::parse(value).map_err(|_| ProblemKind::InvalidEnumerationValue)?;
            if components.uses_focus() && !allow_focus {
                return Err(ProblemKind::InvalidEnumerationValue);
            }
            Ok((!components.is_empty()).then(|| components.to_canonical()))
        }
        ConstraintKind::Level { min, max } => match value.parse::<i64>() {
            Ok(level) if (i64::from(min)..=i64::from(max)).contains(&level) => {
                Ok(Some(level.to_string()))
            }
            _ => Err(ProblemKind::OutOfRangeValue),
        },
        ConstraintKind::TokenList => {
            let tokens: Vec<&str> = value
                .split(['\t', '\r', '\n'])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            Ok((!tokens.is_empty()).then(|| tokens.join("\t")))
        }
        // Handled before value lookup; it spans many keys.
        ConstraintKind::ClassList => Ok(None),
    }
}

/// Reports unknown class levels and psionics keys, and a missing class
/// list when no `level-*` key has a value.
fn check_class_list(raw: &SpellAttributeSet, rules: &SystemRules, problems: &mut Vec<Problem>) {
    let mut any_level = false;
    for (key, value) in raw.iter() {
        if value.trim().is_empty() {
            continue;
        }
        let is_level = key.starts_with(LEVEL_PREFIX);
        any_level |= is_level;
        if rules.is_psionic_key(key) {
            problems.push(Problem::new(key, ProblemKind::UnsupportedPsionics));
        } else if is_level && rules.class_for_key(key).is_none() {
            problems.push(Problem::invalid(key));
        }
    }
    if !any_level {
        problems.push(Problem::missing(CLASSES));
    }
}

fn lookup(values: &[&'static str], value: &str) -> Option<&'static str> {
    values
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(value))
        .copied()
}

fn lookup_synonym(synonyms: &[(&'static str, &'static str)], value: &str) -> Option<&'static str> {
    synonyms
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(value))
        .map(|(_, canonical)| *canonical)
}

fn is_multi_subschool(value: &str) -> bool {
    value.contains([',', '|', '/']) || value.to_lowercase().contains(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::spell::{
        CASTING_TIME, COMPONENTS, DESCRIPTION, DESCRIPTORS, DURATION, NAME, OTHER, RANGE, SAVE,
        SPELL_RESISTANCE, SUBSCHOOL, TARGET,
    };

    const PF: RuleSystem = RuleSystem::Pathfinder1e;

    fn test_bolt() -> SpellAttributeSet {
        SpellAttributeSet::new()
            .with(NAME, "Test Bolt")
            .with(SCHOOL, "evocation")
            .with("level-sorcerer/wizard", "3")
            .with(CASTING_TIME, "1 standard action")
            .with(COMPONENTS, "v, s")
            .with(RANGE, "medium")
            .with(DURATION, "instantaneous")
            .with(SAVE, "none")
            .with(SPELL_RESISTANCE, "no")
            .with(DESCRIPTION, "Deals damage.")
    }

    /// Pathfinder rules cut down to a school and a conditionally required
    /// subschool.
    fn subschool_required_rules() -> SystemRules {
        use crate::game_systems::Condition;

        let mut rules = rules_for(PF).clone();
        rules.constraints = vec![
            rules
                .constraint(SCHOOL)
                .cloned()
                .expect("school constraint"),
            FieldConstraint::new(
                SUBSCHOOL,
                ConstraintKind::Subschool,
                Requirement::RequiredIf(Condition::SchoolHasSubschools),
            ),
        ];
        rules
    }

    #[test]
    fn required_if_demands_field_when_condition_holds() {
        let rules = subschool_required_rules();
        let raw = SpellAttributeSet::new().with(SCHOOL, "enchantment");
        assert_eq!(
            validate_with(&raw, &rules).problems(),
            &[Problem::missing(SUBSCHOOL)]
        );

        let raw = raw.with(SUBSCHOOL, "charm");
        let result = validate_with(&raw, &rules);
        let spell = result.into_result().expect("normalized");
        assert_eq!(spell.get(SUBSCHOOL), Some("Charm"));
    }

    #[test]
    fn required_if_is_optional_when_condition_fails() {
        let rules = subschool_required_rules();
        let raw = SpellAttributeSet::new().with(SCHOOL, "evocation");
        let result = validate_with(&raw, &rules);
        let spell = result.into_result().expect("normalized");
        assert_eq!(spell.get(SCHOOL), Some("Evocation"));
        assert_eq!(spell.get(SUBSCHOOL), None);
    }

    #[test]
    fn required_if_skipped_when_controlling_field_rejected() {
        let rules = subschool_required_rules();
        let raw = SpellAttributeSet::new().with(SCHOOL, "pyromancy");
        assert_eq!(
            validate_with(&raw, &rules).problems(),
            &[Problem::invalid(SCHOOL)]
        );

        let missing = SpellAttributeSet::new();
        assert_eq!(
            validate_with(&missing, &rules).problems(),
            &[Problem::missing(SCHOOL)]
        );
    }

    fn fire_ray_5e() -> SpellAttributeSet {
        SpellAttributeSet::new()
            .with(NAME, "Fire Ray")
            .with(SCHOOL, "Evocation")
            .with("level-wizard", "1")
            .with("level-sorcerer", "1")
            .with(CASTING_TIME, "action")
            .with(COMPONENTS, "V, S, M")
            .with(RANGE, "120 feet")
            .with(DURATION, "instantaneous")
            .with(DESCRIPTION, "A ray of fire.")
    }

    fn normalized(raw: &SpellAttributeSet, system: RuleSystem) -> NormalizedSpell {
        match validate(raw, system) {
            ValidationResult::Normalized(spell) => spell,
            ValidationResult::Rejected(problems) => panic!("rejected: {problems:?}"),
        }
    }

    fn problems(raw: &SpellAttributeSet, system: RuleSystem) -> Vec<Problem> {
        validate(raw, system).problems().to_vec()
    }

    #[test]
    fn pathfinder_scenario_normalizes() {
        let spell = normalized(&test_bolt(), PF);
        assert_eq!(spell.system(), PF);
        assert_eq!(spell.get(SCHOOL), Some("Evocation"));
        assert_eq!(spell.get(COMPONENTS), Some("VS"));
        assert_eq!(spell.get(RANGE), Some("Medium"));
        assert_eq!(spell.get(DURATION), Some("instantaneous"));
        assert_eq!(spell.get(SAVE), Some("None"));
        assert_eq!(spell.get(SPELL_RESISTANCE), Some("No"));
        assert_eq!(spell.get("level-sorcerer/wizard"), Some("3"));
        assert_eq!(spell.get(SUBSCHOOL), None);
    }

    #[test]
    fn level_ten_is_the_only_problem() {
        let raw = test_bolt().with("level-sorcerer/wizard", "10");
        assert_eq!(
            problems(&raw, PF),
            vec![Problem::out_of_range("level-sorcerer/wizard")]
        );
    }

    #[test]
    fn level_bounds() {
        for level in ["0", "9"] {
            let raw = test_bolt().with("level-sorcerer/wizard", level);
            assert!(validate(&raw, PF).is_normalized(), "{level}");
        }
        for level in ["-1", "10", "three"] {
            let raw = test_bolt().with("level-sorcerer/wizard", level);
            assert!(!validate(&raw, PF).is_normalized(), "{level}");
        }
    }

    #[test]
    fn each_missing_required_field_is_reported_alone() {
        let mut dnd35e = test_bolt().with("level-wizard", "3");
        dnd35e.remove("level-sorcerer/wizard");
        let cases = [
            (PF, test_bolt()),
            (RuleSystem::Dnd35e, dnd35e),
            (RuleSystem::Dnd5e, fire_ray_5e()),
        ];
        for (system, base) in cases {
            let rules = rules_for(system);
            for constraint in &rules.constraints {
                if constraint.requirement != Requirement::Required || constraint.key == CLASSES {
                    continue;
                }
                let mut raw = base.clone();
                raw.remove(&constraint.key);
                assert_eq!(
                    problems(&raw, system),
                    vec![Problem::missing(constraint.key.clone())],
                    "{system} without {}",
                    constraint.key
                );
            }
        }
    }

    #[test]
    fn missing_class_list() {
        let mut raw = test_bolt();
        raw.remove("level-sorcerer/wizard");
        assert_eq!(problems(&raw, PF), vec![Problem::missing("classes")]);
    }

    #[test]
    fn blank_required_field_is_missing() {
        let raw = test_bolt().with(NAME, "   ");
        assert_eq!(problems(&raw, PF), vec![Problem::missing(NAME)]);
    }

    #[test]
    fn normalized_output_revalidates_to_itself() {
        let cases = [
            (PF, test_bolt().with(DESCRIPTORS, "fire, Fire|acid")),
            (
                RuleSystem::Dnd35e,
                SpellAttributeSet::new()
                    .with(NAME, "Quiet Charm")
                    .with(SCHOOL, "enchantment")
                    .with(SUBSCHOOL, "charm")
                    .with(DESCRIPTORS, "mind-affecting")
                    .with("level-bard", "1")
                    .with("level-wizard", "2")
                    .with(CASTING_TIME, "standard action")
                    .with(COMPONENTS, "V,S,F/DF")
                    .with(RANGE, "close (25 ft. + 5 ft./2 levels)")
                    .with(DURATION, "1 hour/level")
                    .with(TARGET, "one humanoid")
                    .with(SAVE, "will negates")
                    .with(SPELL_RESISTANCE, "yes")
                    .with(DESCRIPTION, "Charms.")
                    .with(OTHER, "SOURCEPAGE:p.1\n\tPRESPELLTYPE:Arcane"),
            ),
            (RuleSystem::Dnd5e, fire_ray_5e().with(SUBSCHOOL, "ritual")),
        ];
        for (system, raw) in cases {
            let first = normalized(&raw, system);
            let second = normalized(first.attributes(), system);
            assert_eq!(first, second, "{system}");
        }
    }

    #[test]
    fn enumeration_case_does_not_matter() {
        let upper = normalized(&test_bolt().with(SCHOOL, "EVOCATION"), PF);
        let lower = normalized(&test_bolt(), PF);
        assert_eq!(upper, lower);
    }

    #[test]
    fn synonyms_are_canonicalized() {
        let raw = test_bolt()
            .with(SPELL_RESISTANCE, "harmless")
            .with(CASTING_TIME, "Standard Action");
        let spell = normalized(&raw, PF);
        assert_eq!(spell.get(SPELL_RESISTANCE), Some("Yes (Harmless)"));
        assert_eq!(spell.get(CASTING_TIME), Some("1 standard action"));

        let spell = normalized(&fire_ray_5e(), RuleSystem::Dnd5e);
        assert_eq!(spell.get(CASTING_TIME), Some("1 action"));
        assert_eq!(spell.get(DURATION), Some("Instantaneous"));
    }

    #[test]
    fn descriptors_are_deduplicated_and_joined() {
        let raw = test_bolt().with(DESCRIPTORS, "fire, FIRE | mind-affecting");
        let spell = normalized(&raw, PF);
        assert_eq!(spell.get(DESCRIPTORS), Some("Fire|Mind-Affecting"));

        let raw = test_bolt().with(DESCRIPTORS, "fire, plasma");
        assert_eq!(problems(&raw, PF), vec![Problem::invalid(DESCRIPTORS)]);
    }

    #[test]
    fn subschool_rules() {
        let enchantment = test_bolt().with(SCHOOL, "Enchantment");

        let spell = normalized(&enchantment.clone().with(SUBSCHOOL, "CHARM"), PF);
        assert_eq!(spell.get(SUBSCHOOL), Some("Charm"));

        let multi = Problem::new(SUBSCHOOL, ProblemKind::UnsupportedMultiSubschool);
        let raw = enchantment.clone().with(SUBSCHOOL, "Charm, Compulsion");
        assert_eq!(problems(&raw, PF), vec![multi.clone()]);
        let raw = enchantment.with(SUBSCHOOL, "Charm and Compulsion");
        assert_eq!(problems(&raw, PF), vec![multi]);
        assert_eq!(
            problems(&test_bolt().with(SUBSCHOOL, "Charm"), PF),
            vec![Problem::invalid(SUBSCHOOL)]
        );
    }

    #[test]
    fn subschool_is_skipped_when_school_is_rejected() {
        let raw = test_bolt()
            .with(SCHOOL, "Pyromancy")
            .with(SUBSCHOOL, "Charm");
        assert_eq!(problems(&raw, PF), vec![Problem::invalid(SCHOOL)]);
    }

    #[test]
    fn every_problem_is_reported_in_table_order() {
        let raw = SpellAttributeSet::new()
            .with(SCHOOL, "Pyromancy")
            .with("level-wizard", "12")
            .with(COMPONENTS, "V, Q")
            .with(RANGE, "x".repeat(101))
            .with(SPELL_RESISTANCE, "maybe");
        assert_eq!(
            problems(&raw, RuleSystem::Dnd35e),
            vec![
                Problem::missing(NAME),
                Problem::invalid(SCHOOL),
                Problem::out_of_range("level-wizard"),
                Problem::missing(CASTING_TIME),
                Problem::invalid(COMPONENTS),
                Problem::out_of_range(RANGE),
                Problem::missing(DURATION),
                Problem::invalid(SPELL_RESISTANCE),
            ]
        );
    }

    #[test]
    fn unknown_class_level_is_invalid() {
        let raw = test_bolt().with("level-gunslinger", "1");
        assert_eq!(
            problems(&raw, PF),
            vec![Problem::invalid("level-gunslinger")]
        );
    }

    #[test]
    fn psionics_are_rejected_in_35e() {
        let mut raw = test_bolt()
            .with("level-psion", "2")
            .with("power-points", "3");
        raw.remove("level-sorcerer/wizard");
        assert_eq!(
            problems(&raw, RuleSystem::Dnd35e),
            vec![
                Problem::new("level-psion", ProblemKind::UnsupportedPsionics),
                Problem::new("power-points", ProblemKind::UnsupportedPsionics),
            ]
        );
    }

    #[test]
    fn dnd5e_rejects_focus_and_universal() {
        assert_eq!(
            problems(&fire_ray_5e().with(COMPONENTS, "V, F"), RuleSystem::Dnd5e),
            vec![Problem::invalid(COMPONENTS)]
        );
        assert_eq!(
            problems(&fire_ray_5e().with(SCHOOL, "Universal"), RuleSystem::Dnd5e),
            vec![Problem::invalid(SCHOOL)]
        );
    }

    #[test]
    fn dnd5e_ignores_d20_only_keys() {
        let raw = fire_ray_5e()
            .with(SPELL_RESISTANCE, "Yes")
            .with(TARGET, "one creature")
            .with(DESCRIPTORS, "Fire");
        let spell = normalized(&raw, RuleSystem::Dnd5e);
        assert_eq!(spell.get(SPELL_RESISTANCE), None);
        assert_eq!(spell.get(TARGET), None);
        let expected = [DESCRIPTORS, SPELL_RESISTANCE, TARGET].map(String::from);
        assert_eq!(ignored_keys(&raw, RuleSystem::Dnd5e), expected);
    }

    #[test]
    fn description_length_limit() {
        let raw = test_bolt().with(DESCRIPTION, "a".repeat(10_000));
        assert!(validate(&raw, PF).is_normalized());
        let raw = test_bolt().with(DESCRIPTION, "a".repeat(10_001));
        assert_eq!(problems(&raw, PF), vec![Problem::out_of_range(DESCRIPTION)]);
    }
}
