//! Line formatting.
//!
//! Turns a [`NormalizedSpell`] into one PCGen `.lst` line using the column
//! layout of its rule system.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::common::{flatten_separators, spell_key};
use crate::entities::spell::OTHER;
use crate::entities::NormalizedSpell;
use crate::error::FormatError;
use crate::game_systems::{rules_for, CasterType, Column, ColumnLayout, SystemRules, TAB_WIDTH};
use crate::types::RuleSystem;

/// One formatted `.lst` line, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    text: String,
    system: RuleSystem,
}

impl OutputLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn system(&self) -> RuleSystem {
        self.system
    }

    /// Spell name, the text before the first tab.
    pub fn name(&self) -> &str {
        self.text.split('\t').next().unwrap_or_default()
    }

    /// Unique key used to detect duplicate spells.
    pub fn key(&self) -> String {
        spell_key(self.name())
    }

    /// The line with exactly one `\n` terminator.
    pub fn to_line(&self) -> String {
        format!("{}\n", self.text)
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Format `spell` in the column layout of `system`.
///
/// `spell` must have been accepted by the validator for the same system.
pub fn format(spell: &NormalizedSpell, system: RuleSystem) -> Result<OutputLine, FormatError> {
    if spell.system() != system {
        return Err(FormatError::RuleSystemMismatch {
            validated: spell.system(),
            requested: system,
        });
    }

    let rules = rules_for(system);
    let layout = &rules.layout;
    let mut cells: Vec<String> = Vec::with_capacity(layout.columns.len());

    for column in layout.columns {
        match column {
            Column::Name => {
                let name = flatten_separators(spell.name());
                cells.push(pad(name, layout.name_tab_stops));
            }
            Column::Type => {
                if let Some(types) = caster_types(spell, rules, layout) {
                    cells.push(pad(format!("TYPE:{types}"), layout.type_tab_stops));
                }
            }
            Column::Classes => cells.push(format!("CLASSES:{}", class_levels(spell, rules))),
            Column::Other => cells.extend(
                spell
                    .get(OTHER)
                    .unwrap_or_default()
                    .split('\t')
                    .map(flatten_separators)
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty()),
            ),
            column => {
                let value = column
                    .attribute()
                    .and_then(|key| spell.get(key))
                    .map(flatten_separators)
                    .unwrap_or_default();
                if value.is_empty() && !column.always_written() {
                    continue;
                }
                let token = column.token().unwrap_or_default();
                cells.push(format!("{token}{value}"));
            }
        }
    }

    Ok(OutputLine {
        text: cells.join("\t"),
        system,
    })
}

/// Appends the extra tabs PCGen data files use to align a column.
fn pad(cell: String, tab_stops: usize) -> String {
    let extra = tab_stops.saturating_sub(cell.chars().count() / TAB_WIDTH);
    cell + &"\t".repeat(extra)
}

/// `Arcane.Divine` style caster type list, `None` when no class is listed.
fn caster_types(
    spell: &NormalizedSpell,
    rules: &SystemRules,
    layout: &ColumnLayout,
) -> Option<String> {
    let mut types: Vec<&str> = CasterType::ALL
        .into_iter()
        .filter(|caster| {
            rules
                .classes
                .iter()
                .any(|class| class.caster == *caster && spell.get(&class.level_key()).is_some())
        })
        .map(|caster| caster.label())
        .collect();
    if types.is_empty() {
        return None;
    }
    types.extend(layout.type_suffix);
    Some(types.join("."))
}

/// `Bard=2|Cleric,Wizard=3` grouped by ascending level.
fn class_levels(spell: &NormalizedSpell, rules: &SystemRules) -> String {
    let mut by_level: BTreeMap<u8, Vec<&str>> = BTreeMap::new();
    for class in rules.classes {
        let Some(level) = spell
            .get(&class.level_key())
            .and_then(|level| level.parse::<u8>().ok())
        else {
            continue;
        };
        by_level.entry(level).or_default().extend(class.emits);
    }
    by_level
        .into_iter()
        .map(|(level, classes)| format!("{}={level}", classes.join(",")))
        .collect::<Vec<_>>()
        .join("|")
}
