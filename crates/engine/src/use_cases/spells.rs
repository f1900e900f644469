//! Spell use cases: check input, load existing files, generate `.lst` and
//! `.pcc` output.

use std::fmt;
use std::path::{Path, PathBuf};

use spellgen_domain::entities::spell::NAME;
use spellgen_domain::{
    format, ignored_keys, validate, AddOutcome, DomainError, DuplicatePolicy, FormatError,
    NormalizedSpell, Problem, RuleSystem, SpellAttributeSet, SpellSession, ValidationResult,
};

use crate::infrastructure::export::{
    default_header_today, sync_pcc, write_lst, PccError, PccOutcome,
};
use crate::infrastructure::importers::{read_lst, InputError, LstError};

/// Errors from spell use cases.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("LST error: {0}")]
    Lst(#[from] LstError),
    #[error("PCC error: {0}")]
    Pcc(#[from] PccError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("{} spell(s) rejected", .0.len())]
    Rejected(Vec<RejectedSpell>),
}

/// A spell that failed validation, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSpell {
    pub label: String,
    pub problems: Vec<Problem>,
}

impl fmt::Display for RejectedSpell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems: Vec<String> = self.problems.iter().map(Problem::to_string).collect();
        write!(f, "{}: {}", self.label, problems.join(", "))
    }
}

/// Validation outcome for one input spell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellCheck {
    /// Spell name, or its position when unnamed
    pub label: String,
    pub result: ValidationResult,
}

impl SpellCheck {
    fn rejected(&self) -> Option<RejectedSpell> {
        match &self.result {
            ValidationResult::Normalized(_) => None,
            ValidationResult::Rejected(problems) => Some(RejectedSpell {
                label: self.label.clone(),
                problems: problems.clone(),
            }),
        }
    }
}

/// Spells read back from an existing `.lst` file.
#[derive(Debug, Clone)]
pub struct LoadedLst {
    pub header: Option<String>,
    pub mods: Vec<String>,
    pub checks: Vec<SpellCheck>,
}

/// Options for [`SpellOps::generate`].
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub inputs: Vec<SpellAttributeSet>,
    pub output: PathBuf,
    /// Existing `.lst` whose spells, header and mods are kept
    pub merge: Option<PathBuf>,
    pub duplicates: DuplicatePolicy,
    /// Overwrite files that do not look like homebrew
    pub force: bool,
    /// Create or update a `.pcc` next to the output
    pub pcc: bool,
    pub campaign: Option<PathBuf>,
}

/// What [`SpellOps::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub written: PathBuf,
    pub total: usize,
    pub added: usize,
    pub replaced: usize,
    pub kept_existing: usize,
    pub pcc: Option<PccOutcome>,
}

/// Spell operations for one rule system.
#[derive(Debug, Clone, Copy)]
pub struct SpellOps {
    system: RuleSystem,
}

impl SpellOps {
    pub fn new(system: RuleSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> RuleSystem {
        self.system
    }

    /// Validate every input, in order.
    pub fn check(&self, inputs: &[SpellAttributeSet]) -> Vec<SpellCheck> {
        inputs
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let label = spell_label(raw, index);
                let ignored = ignored_keys(raw, self.system);
                if !ignored.is_empty() {
                    tracing::debug!(
                        spell = %label,
                        keys = ?ignored,
                        system = %self.system,
                        "Ignoring unknown keys"
                    );
                }
                let result = validate(raw, self.system);
                if let ValidationResult::Rejected(problems) = &result {
                    tracing::debug!(spell = %label, problems = problems.len(), "Spell rejected");
                }
                SpellCheck { label, result }
            })
            .collect()
    }

    /// Read an existing `.lst` and re-validate its spells.
    pub fn load(&self, path: &Path) -> Result<LoadedLst, SpellError> {
        let document = read_lst(path, self.system)?;
        let checks = self.check(&document.spells);
        tracing::info!(path = %path.display(), spells = checks.len(), "Loaded .lst file");
        Ok(LoadedLst {
            header: document.header,
            mods: document.mods,
            checks,
        })
    }

    /// Validate inputs, merge with an existing file and write the `.lst`.
    ///
    /// Nothing is written when any spell, new or loaded, is rejected.
    pub fn generate(&self, request: GenerateRequest) -> Result<GenerateReport, SpellError> {
        let (header, mods, existing) = match &request.merge {
            Some(path) => {
                let loaded = self.load(path)?;
                (loaded.header, loaded.mods, loaded.checks)
            }
            None => (None, Vec::new(), Vec::new()),
        };
        let existing = normalized_or_rejected(existing)?;
        let incoming = normalized_or_rejected(self.check(&request.inputs))?;

        let mut session = SpellSession::new(self.system);
        for spell in &existing {
            session.add(format(spell, self.system)?, DuplicatePolicy::Replace)?;
        }

        let (mut added, mut replaced, mut kept_existing) = (0, 0, 0);
        for spell in &incoming {
            match session.add(format(spell, self.system)?, request.duplicates)? {
                AddOutcome::Added => added += 1,
                AddOutcome::Replaced => replaced += 1,
                AddOutcome::KeptExisting => kept_existing += 1,
            }
        }

        let header = header.unwrap_or_else(default_header_today);
        let written = write_lst(
            &request.output,
            &header,
            session.lines(),
            &mods,
            request.force,
        )?;

        let pcc = if request.pcc {
            Some(sync_pcc(&written, self.system, request.campaign.as_deref())?)
        } else {
            None
        };

        Ok(GenerateReport {
            written,
            total: session.len(),
            added,
            replaced,
            kept_existing,
            pcc,
        })
    }

    /// Create or update the `.pcc` that loads `lst`.
    pub fn sync_campaign(
        &self,
        lst: &Path,
        campaign: Option<&Path>,
    ) -> Result<PccOutcome, SpellError> {
        Ok(sync_pcc(lst, self.system, campaign)?)
    }
}

fn spell_label(raw: &SpellAttributeSet, index: usize) -> String {
    raw.value_of(NAME)
        .map(str::to_string)
        .unwrap_or_else(|| format!("spell #{}", index + 1))
}

fn normalized_or_rejected(checks: Vec<SpellCheck>) -> Result<Vec<NormalizedSpell>, SpellError> {
    let rejected: Vec<RejectedSpell> = checks.iter().filter_map(SpellCheck::rejected).collect();
    if !rejected.is_empty() {
        return Err(SpellError::Rejected(rejected));
    }
    Ok(checks
        .into_iter()
        .filter_map(|check| check.result.into_result().ok())
        .collect())
}
