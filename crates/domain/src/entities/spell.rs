//! Spell attribute sets.
//!
//! A spell travels through the core as a flat map of attribute key to
//! string value: raw as entered by the form, then normalized by the
//! validator. Only [`crate::validation::validate`] can produce a
//! [`NormalizedSpell`], which is what the formatter accepts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::RuleSystem;

/// Input key for the spell name.
pub const NAME: &str = "name";
pub const SCHOOL: &str = "school";
pub const SUBSCHOOL: &str = "subschool";
pub const DESCRIPTORS: &str = "descriptors";
/// Pseudo key used to report that no class list was given.
pub const CLASSES: &str = "classes";
pub const CASTING_TIME: &str = "casting-time";
pub const COMPONENTS: &str = "components";
pub const RANGE: &str = "range";
pub const DURATION: &str = "duration";
pub const TARGET: &str = "target";
pub const SAVE: &str = "save";
pub const SPELL_RESISTANCE: &str = "sr";
pub const DESCRIPTION: &str = "description";
/// Extra PCGen tokens passed through untouched.
pub const OTHER: &str = "other";
/// Prefix of per-class spell level keys (`level-wizard`).
pub const LEVEL_PREFIX: &str = "level-";

/// A mapping from attribute key to value.
///
/// Ordered so that iteration, and therefore every derived output, is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellAttributeSet(BTreeMap<String, String>);

impl SpellAttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Raw value as stored.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Trimmed value, or `None` when missing or blank.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for SpellAttributeSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SpellAttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A spell accepted by the validator for one rule system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSpell {
    system: RuleSystem,
    attributes: SpellAttributeSet,
}

impl NormalizedSpell {
    pub(crate) fn new(system: RuleSystem, attributes: SpellAttributeSet) -> Self {
        Self { system, attributes }
    }

    /// The rule system whose constraint table accepted this spell.
    pub fn system(&self) -> RuleSystem {
        self.system
    }

    pub fn attributes(&self) -> &SpellAttributeSet {
        &self.attributes
    }

    pub fn into_attributes(self) -> SpellAttributeSet {
        self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn name(&self) -> &str {
        self.attributes.get(NAME).unwrap_or_default()
    }
}

/// Spell components (what's required to cast).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpellComponents {
    pub verbal: bool,
    pub somatic: bool,
    pub material: bool,
    pub focus: bool,
    pub divine_focus: bool,
}

impl SpellComponents {
    /// Parse component letters such as `"v, s"`, `"VSM"` or `"V,S,F/DF"`.
    ///
    /// Commas, spaces, slashes, semicolons and `+` separate letters but are
    /// optional. Returns the offending fragment on failure.
    pub fn parse(value: &str) -> Result<Self, String> {
        let upper = value.to_ascii_uppercase();
        let mut components = Self::default();
        let mut rest = upper.as_str();
        while let Some(c) = rest.chars().next() {
            if rest.starts_with("DF") {
                components.divine_focus = true;
                rest = &rest[2..];
                continue;
            }
            match c {
                'V' => components.verbal = true,
                'S' => components.somatic = true,
                'M' => components.material = true,
                'F' => components.focus = true,
                ',' | ' ' | '/' | ';' | '+' => {}
                _ => return Err(rest.to_string()),
            }
            rest = &rest[c.len_utf8()..];
        }
        Ok(components)
    }

    /// Whether focus or divine focus is used.
    pub fn uses_focus(&self) -> bool {
        self.focus || self.divine_focus
    }

    pub fn is_empty(&self) -> bool {
        !(self.verbal || self.somatic || self.material || self.uses_focus())
    }

    /// Canonical letters concatenated without separators (`VSMF/DF`).
    pub fn to_canonical(&self) -> String {
        let mut out = String::new();
        if self.verbal {
            out.push('V');
        }
        if self.somatic {
            out.push('S');
        }
        if self.material {
            out.push('M');
        }
        match (self.focus, self.divine_focus) {
            (true, true) => out.push_str("F/DF"),
            (true, false) => out.push('F'),
            (false, true) => out.push_str("DF"),
            (false, false) => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_of_trims_and_skips_blank() {
        let attrs = SpellAttributeSet::new()
            .with(NAME, "  Test Bolt ")
            .with(SAVE, "   ");
        assert_eq!(attrs.value_of(NAME), Some("Test Bolt"));
        assert_eq!(attrs.value_of(SAVE), None);
        assert_eq!(attrs.value_of(RANGE), None);
        assert_eq!(attrs.get(SAVE), Some("   "));
    }

    #[test]
    fn attribute_set_iterates_in_key_order() {
        let attrs: SpellAttributeSet = [("school", "Evocation"), ("name", "Bolt")]
            .into_iter()
            .collect();
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["name", "school"]);
    }

    #[test]
    fn attribute_set_serializes_as_plain_map() {
        let attrs = SpellAttributeSet::new().with(NAME, "Bolt");
        let json = serde_json::to_string(&attrs).expect("serialize");
        assert_eq!(json, r#"{"name":"Bolt"}"#);
        let back: SpellAttributeSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, attrs);
    }

    fn canonical(value: &str) -> Result<String, String> {
        SpellComponents::parse(value).map(|c| c.to_canonical())
    }

    #[test]
    fn components_parse_common_spellings() {
        assert_eq!(canonical("v, s"), Ok("VS".into()));
        assert_eq!(canonical("VSM"), Ok("VSM".into()));
        assert_eq!(canonical("V, S, F/DF"), Ok("VSF/DF".into()));
        assert_eq!(canonical("df"), Ok("DF".into()));
    }

    #[test]
    fn components_canonical_form_is_stable() {
        let first = canonical("m, f, df, v").expect("valid letters");
        assert_eq!(first, "VMF/DF");
        assert_eq!(canonical(&first), Ok(first.clone()));
    }

    #[test]
    fn components_reject_unknown_letters() {
        assert_eq!(SpellComponents::parse("V, X"), Err("X".to_string()));
        assert_eq!(SpellComponents::parse("ß"), Err("ß".to_string()));
        assert!(SpellComponents::parse("v, ſ").is_err());
        assert!(SpellComponents::parse("D").is_err());
    }

    #[test]
    fn empty_components() {
        let components = SpellComponents::parse(" , ").expect("separators only");
        assert!(components.is_empty());
        assert_eq!(components.to_canonical(), "");
    }
}
