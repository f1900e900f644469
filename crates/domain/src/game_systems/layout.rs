//! Output column layouts.
//!
//! PCGen spell `.lst` lines are tab separated. The first column is the bare
//! spell name; every other column is a `TOKEN:value` pair.

use crate::entities::spell::{
    CASTING_TIME, COMPONENTS, DESCRIPTION, DESCRIPTORS, DURATION, NAME, OTHER, RANGE, SAVE,
    SCHOOL, SPELL_RESISTANCE, SUBSCHOOL, TARGET,
};

/// One output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    /// Derived from the caster types of the listed classes
    Type,
    /// Derived from the `level-*` attributes
    Classes,
    School,
    Subschool,
    Descriptor,
    Components,
    CastingTime,
    Range,
    Duration,
    TargetArea,
    SaveInfo,
    SpellResistance,
    Description,
    /// Pass-through tokens, one column each
    Other,
}

impl Column {
    /// PCGen token prefix, `None` for the bare name and pass-through tokens.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::Name | Self::Other => None,
            Self::Type => Some("TYPE:"),
            Self::Classes => Some("CLASSES:"),
            Self::School => Some("SCHOOL:"),
            Self::Subschool => Some("SUBSCHOOL:"),
            Self::Descriptor => Some("DESCRIPTOR:"),
            Self::Components => Some("COMPS:"),
            Self::CastingTime => Some("CASTTIME:"),
            Self::Range => Some("RANGE:"),
            Self::Duration => Some("DURATION:"),
            Self::TargetArea => Some("TARGETAREA:"),
            Self::SaveInfo => Some("SAVEINFO:"),
            Self::SpellResistance => Some("SPELLRES:"),
            Self::Description => Some("DESC:"),
        }
    }

    /// The attribute key a column is read from, `None` for derived columns.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Self::Type | Self::Classes => None,
            Self::Name => Some(NAME),
            Self::School => Some(SCHOOL),
            Self::Subschool => Some(SUBSCHOOL),
            Self::Descriptor => Some(DESCRIPTORS),
            Self::Components => Some(COMPONENTS),
            Self::CastingTime => Some(CASTING_TIME),
            Self::Range => Some(RANGE),
            Self::Duration => Some(DURATION),
            Self::TargetArea => Some(TARGET),
            Self::SaveInfo => Some(SAVE),
            Self::SpellResistance => Some(SPELL_RESISTANCE),
            Self::Description => Some(DESCRIPTION),
            Self::Other => Some(OTHER),
        }
    }

    /// Whether the column is written even when its value is empty.
    pub fn always_written(&self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Classes
                | Self::School
                | Self::CastingTime
                | Self::Range
                | Self::Duration
                | Self::Description
        )
    }

    /// Find the column whose token starts `field` (e.g. `RANGE:Close`).
    pub fn from_token(field: &str) -> Option<Self> {
        Self::TOKENIZED
            .into_iter()
            .find(|column| column.token().is_some_and(|t| field.starts_with(t)))
    }

    const TOKENIZED: [Column; 13] = [
        Self::Type,
        Self::Classes,
        Self::School,
        Self::Subschool,
        Self::Descriptor,
        Self::Components,
        Self::CastingTime,
        Self::Range,
        Self::Duration,
        Self::TargetArea,
        Self::SaveInfo,
        Self::SpellResistance,
        Self::Description,
    ];
}

/// Column order and alignment for one rule system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub columns: &'static [Column],
    /// Appended to the derived `TYPE:` value (5e adds `.Spell`)
    pub type_suffix: Option<&'static str>,
    /// Tab stops (6 characters wide) reserved for the name column
    pub name_tab_stops: usize,
    /// Tab stops reserved for the type column
    pub type_tab_stops: usize,
}

/// Characters per tab stop when aligning columns.
pub const TAB_WIDTH: usize = 6;

/// Pathfinder 1e and D&D 3.5e share the full d20 layout.
pub const D20_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Type,
    Column::Classes,
    Column::School,
    Column::Subschool,
    Column::Descriptor,
    Column::Components,
    Column::CastingTime,
    Column::Range,
    Column::Duration,
    Column::TargetArea,
    Column::SaveInfo,
    Column::SpellResistance,
    Column::Description,
    Column::Other,
];

/// 5e has no descriptors, targets or spell resistance.
pub const DND5E_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Type,
    Column::Classes,
    Column::School,
    Column::Subschool,
    Column::Components,
    Column::CastingTime,
    Column::Range,
    Column::Duration,
    Column::SaveInfo,
    Column::Description,
    Column::Other,
];
