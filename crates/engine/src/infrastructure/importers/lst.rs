//! PCGen spell `.lst` reader.
//!
//! Spell lines are mapped back to raw attribute sets so they can be
//! re-validated and edited. `.MOD` lines are preserved verbatim except for
//! `CLASSES:` tokens, which are merged into the spell they modify.

use std::collections::BTreeMap;
use std::path::Path;

use spellgen_domain::entities::spell::{NAME, OTHER};
use spellgen_domain::game_systems::{Column, SpellClass, SystemRules};
use spellgen_domain::{rules_for, RuleSystem, SpellAttributeSet};
use thiserror::Error;

/// Marker PCGen uses for lines that modify an existing object.
pub const MOD_MARKER: &str = ".MOD";
const HEADER_MARKER: &str = "SOURCELONG";
const CLASSES_TOKEN: &str = "CLASSES:";

/// Errors that can occur while reading a `.lst` file.
#[derive(Debug, Error)]
pub enum LstError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Refusing to overwrite {0}: it does not look like a homebrew file (use --force)")]
    ForeignFile(std::path::PathBuf),
}

/// Contents of a parsed `.lst` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LstDocument {
    /// The `SOURCELONG:` line, if any
    pub header: Option<String>,
    pub spells: Vec<SpellAttributeSet>,
    /// Preserved `.MOD` lines
    pub mods: Vec<String>,
}

/// Parse `.lst` text for `system`.
///
/// Classes sharing one spell list (Pathfinder `Sorcerer` and `Wizard`) must
/// all be listed at the same level across the spell line and its `.MOD`
/// lines; anything else is a parse error rather than a silent rewrite.
pub fn parse_lst(text: &str, system: RuleSystem) -> Result<LstDocument, LstError> {
    let rules = rules_for(system);
    let mut document = LstDocument::default();
    let mut shared: Vec<SharedLevels> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.contains(HEADER_MARKER) {
            document.header = Some(line.to_string());
        } else if line.contains(MOD_MARKER) {
            parse_mod_line(line, line_number, rules, &mut document, &mut shared)?;
        } else {
            let mut levels = SharedLevels::default();
            let spell = parse_spell_line(line, line_number, rules, &mut levels)?;
            document.spells.push(spell);
            shared.push(levels);
        }
    }

    for (spell, levels) in document.spells.iter_mut().zip(shared) {
        levels.resolve(spell)?;
    }

    tracing::debug!(
        spells = document.spells.len(),
        mods = document.mods.len(),
        "Parsed .lst text"
    );
    Ok(document)
}

/// Read and parse a `.lst` file.
pub fn read_lst(path: &Path, system: RuleSystem) -> Result<LstDocument, LstError> {
    let text = std::fs::read_to_string(path)?;
    parse_lst(&text, system)
}

fn tokens(line: &str) -> Vec<&str> {
    line.split('\t')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_spell_line(
    line: &str,
    line_number: usize,
    rules: &SystemRules,
    shared: &mut SharedLevels,
) -> Result<SpellAttributeSet, LstError> {
    let mut tokens = tokens(line).into_iter();
    let mut spell = SpellAttributeSet::new();
    if let Some(name) = tokens.next() {
        spell.insert(NAME, name);
    }

    let mut other = Vec::new();
    for token in tokens {
        if let Some(classes) = token.strip_prefix(CLASSES_TOKEN) {
            merge_class_levels(classes, line_number, rules, &mut spell, shared)?;
            continue;
        }
        match Column::from_token(token) {
            Some(column) => {
                let (Some(prefix), Some(key)) = (column.token(), column.attribute()) else {
                    // Derived column, rebuilt on output.
                    continue;
                };
                spell.insert(key, &token[prefix.len()..]);
            }
            None => other.push(token),
        }
    }
    if !other.is_empty() {
        spell.insert(OTHER, other.join("\t"));
    }
    Ok(spell)
}

fn parse_mod_line(
    line: &str,
    line_number: usize,
    rules: &SystemRules,
    document: &mut LstDocument,
    shared: &mut [SharedLevels],
) -> Result<(), LstError> {
    let mut tokens = tokens(line);
    let Some(first) = tokens.first() else {
        return Ok(());
    };
    let name = first.replace(MOD_MARKER, "");

    let target = document
        .spells
        .iter_mut()
        .zip(shared.iter_mut())
        .find(|(spell, _)| spell.get(NAME) == Some(name.as_str()));
    if let Some((spell, levels)) = target {
        for token in &tokens {
            if let Some(classes) = token.strip_prefix(CLASSES_TOKEN) {
                merge_class_levels(classes, line_number, rules, spell, levels)?;
            }
        }
        tokens.retain(|token| !token.starts_with(CLASSES_TOKEN));
    }

    if tokens.len() > 1 {
        document.mods.push(tokens.join("\t"));
    }
    Ok(())
}

/// Merge a `Bard=2|Cleric,Wizard=3` list into `level-*` attributes.
///
/// Levels of classes on a shared list are collected in `shared` and only
/// written once the whole spell has been read.
fn merge_class_levels(
    classes: &str,
    line_number: usize,
    rules: &SystemRules,
    spell: &mut SpellAttributeSet,
    shared: &mut SharedLevels,
) -> Result<(), LstError> {
    for group in classes.split('|').filter(|g| !g.trim().is_empty()) {
        let (names, level) = group.split_once('=').ok_or_else(|| LstError::Parse {
            line: line_number,
            message: format!("class group `{group}` has no level"),
        })?;
        let level: u8 = level.trim().parse().map_err(|_| LstError::Parse {
            line: line_number,
            message: format!("invalid spell level `{level}` in `{group}`"),
        })?;
        for class_name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let key = rules.level_key_for_class(class_name);
            match rules.class_for_key(&key) {
                Some(class) if class.emits.len() > 1 => {
                    shared.record(class, class_name, level, line_number);
                }
                _ => {
                    spell.insert(key, level.to_string());
                }
            }
        }
    }
    Ok(())
}

/// Levels read for classes that share one spell list.
#[derive(Debug, Default)]
struct SharedLevels {
    lists: BTreeMap<String, SharedList>,
}

#[derive(Debug)]
struct SharedList {
    class: &'static SpellClass,
    /// Emitted class name to level
    levels: BTreeMap<&'static str, u8>,
    line: usize,
}

impl SharedLevels {
    fn record(&mut self, class: &'static SpellClass, class_name: &str, level: u8, line: usize) {
        let key = class.level_key();
        let list = self.lists.entry(key).or_insert_with(|| SharedList {
            class,
            levels: BTreeMap::new(),
            line,
        });
        list.line = line;
        let named = |name: &str| name.eq_ignore_ascii_case(class_name);
        if named(class.name) {
            for emitted in class.emits {
                list.levels.insert(*emitted, level);
            }
        } else if let Some(emitted) = class.emits.iter().find(|e| named(e)) {
            list.levels.insert(*emitted, level);
        }
    }

    /// Write each shared level, or fail when the classes disagree.
    fn resolve(self, spell: &mut SpellAttributeSet) -> Result<(), LstError> {
        for (key, list) in self.lists {
            let mut levels = list.levels.values();
            let first = levels.next().copied();
            let consistent = levels.all(|level| Some(*level) == first);
            let complete = list.class.emits.iter().all(|e| list.levels.contains_key(e));
            match first {
                Some(level) if consistent && complete => {
                    spell.insert(key, level.to_string());
                }
                _ => {
                    let given: Vec<String> = list
                        .levels
                        .iter()
                        .map(|(name, level)| format!("{name}={level}"))
                        .collect();
                    let classes = list.class.emits.join(" and ");
                    let given = given.join("|");
                    return Err(LstError::Parse {
                        line: list.line,
                        message: format!(
                            "{classes} share a spell list and need one level, got `{given}`"
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
