//! String helpers shared by the validator and the formatter.

use std::sync::OnceLock;

// Tab, CR and LF are PCGen field separators and must never appear in a value.
static SEPARATOR_RUN_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

/// Characters PCGen treats as delimiters inside keys and class lists.
pub const RESERVED_KEY_CHARS: [char; 4] = ['|', ',', '=', ':'];

/// Replaces every run of tabs and line breaks with a single space.
///
/// # Examples
///
/// ```
/// use spellgen_domain::common::flatten_separators;
///
/// assert_eq!(flatten_separators("Deals\r\n\tdamage."), "Deals damage.");
/// assert_eq!(flatten_separators("plain"), "plain");
/// ```
pub fn flatten_separators(value: &str) -> String {
    let re = SEPARATOR_RUN_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"[\t\r\n]+").expect("SEPARATOR_RUN_REGEX pattern is invalid")
    });
    re.replace_all(value, " ").into_owned()
}

/// Upper-cases the first character and leaves the rest untouched.
///
/// PCGen formulas such as `(CASTERLEVEL*10) ft.` survive unchanged.
///
/// # Examples
///
/// ```
/// use spellgen_domain::common::capitalize_first;
///
/// assert_eq!(capitalize_first("medium"), "Medium");
/// assert_eq!(capitalize_first("(CASTERLEVEL) rounds"), "(CASTERLEVEL) rounds");
/// ```
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the unique lookup key for a spell name.
///
/// Separators collapse to single spaces, PCGen delimiter characters are
/// dropped and the result is lower-cased.
///
/// # Examples
///
/// ```
/// use spellgen_domain::common::spell_key;
///
/// assert_eq!(spell_key("Test  Bolt"), "test bolt");
/// assert_eq!(spell_key("Bolt|Fire, Greater"), "boltfire greater");
/// ```
pub fn spell_key(name: &str) -> String {
    flatten_separators(name)
        .chars()
        .filter(|c| !RESERVED_KEY_CHARS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lower-case slug used in `level-<class>` input keys.
///
/// # Examples
///
/// ```
/// use spellgen_domain::common::slug;
///
/// assert_eq!(slug("Warlock Book of Shadows"), "warlock-book-of-shadows");
/// assert_eq!(slug("Sorcerer/Wizard"), "sorcerer/wizard");
/// ```
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_separators_collapses_runs() {
        assert_eq!(flatten_separators("a\t\tb"), "a b");
        assert_eq!(flatten_separators("a\nb\r\nc"), "a b c");
        assert_eq!(flatten_separators(""), "");
    }

    #[test]
    fn test_flatten_separators_keeps_other_whitespace() {
        assert_eq!(flatten_separators("a  b"), "a  b");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("none"), "None");
        assert_eq!(capitalize_first("Will negates"), "Will negates");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }

    #[test]
    fn test_spell_key_ignores_case_and_spacing() {
        assert_eq!(spell_key("Fire Bolt"), spell_key("  fire\tbolt "));
        assert_ne!(spell_key("Fire Bolt"), spell_key("Firebolt"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Wizard"), "wizard");
        assert_eq!(slug("Psychic Warrior"), "psychic-warrior");
    }
}
