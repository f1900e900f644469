//! PCGen campaign (`.pcc`) files.
//!
//! A `.pcc` makes a homebrew `.lst` loadable as a source in PCGen. New files
//! are published under "Homebrew"; existing files only get a `SPELL:` line
//! appended when they do not load the `.lst` yet.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use spellgen_domain::RuleSystem;
use thiserror::Error;

const SPELL_TOKEN: &str = "SPELL:";

/// Errors that can occur while handling `.pcc` files.
#[derive(Debug, Error)]
pub enum PccError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid .lst path: {0}")]
    InvalidLstPath(PathBuf),
}

/// Title case like PCGen source names: the first letter of every word is
/// upper-cased, the rest lower-cased.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Render a new `.pcc` named after `campaign_file` that loads `lst_file_name`.
pub fn render_pcc(campaign_file: &Path, system: RuleSystem, lst_file_name: &str) -> String {
    let stem = campaign_file
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("homebrew");
    let title = title_case(stem);
    [
        format!("CAMPAIGN:{title}"),
        format!("GAMEMODE:{}", system.game_mode()),
        format!("TYPE:{}", system.pcc_type()),
        "BOOKTYPE:Supplement".to_string(),
        "PUBNAMELONG:Homebrew".to_string(),
        "PUBNAMESHORT:Homebrew".to_string(),
        format!("SOURCELONG:{title}"),
        "SOURCESHORT:Homebrew".to_string(),
        "RANK:9".to_string(),
        "DESC:Homebrew content generated by spellgen".to_string(),
        String::new(),
        format!("{SPELL_TOKEN}{lst_file_name}"),
    ]
    .join("\n")
}

fn is_pcc(path: &Path) -> bool {
    let ext = path.extension();
    ext.is_some_and(|ext| ext.eq_ignore_ascii_case("pcc"))
}

/// Appends `.pcc` unless already present.
pub fn with_pcc_extension(path: &Path) -> PathBuf {
    if is_pcc(path) {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".pcc");
        PathBuf::from(name)
    }
}

/// First `.pcc` file in `dir`, in file name order.
pub fn find_pcc(dir: &Path) -> Result<Option<PathBuf>, PccError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_pcc(path))
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Whether any `SPELL:` entry in `pcc_text` loads a file named
/// `lst_file_name`.
///
/// Entries are `|` separated and may carry a directory (`@/homebrew/`).
pub fn references_lst(pcc_text: &str, lst_file_name: &str) -> bool {
    pcc_text
        .lines()
        .filter_map(|line| line.trim().strip_prefix(SPELL_TOKEN))
        .flat_map(|entries| entries.split('|'))
        .map(|entry| {
            let entry = entry.trim();
            entry.rsplit(['/', '\\']).next().unwrap_or(entry)
        })
        .any(|file_name| file_name == lst_file_name)
}

/// Make sure the `.pcc` at `pcc` loads `lst_file_name`.
///
/// Returns `true` when the file was changed.
pub fn ensure_pcc_references(pcc: &Path, lst_file_name: &str) -> Result<bool, PccError> {
    let text = fs::read_to_string(pcc)?;
    if references_lst(&text, lst_file_name) {
        tracing::debug!(pcc = %pcc.display(), lst = lst_file_name, ".pcc already loads .lst");
        return Ok(false);
    }
    let mut updated = text;
    updated.push('\n');
    updated.push_str(SPELL_TOKEN);
    updated.push_str(lst_file_name);
    fs::write(pcc, updated)?;
    tracing::info!(pcc = %pcc.display(), lst = lst_file_name, "Added SPELL: line to .pcc");
    Ok(true)
}

/// What [`sync_pcc`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PccOutcome {
    Created(PathBuf),
    Updated(PathBuf),
    Unchanged(PathBuf),
}

impl PccOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Updated(path) | Self::Unchanged(path) => path,
        }
    }
}

impl fmt::Display for PccOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "Created {}", path.display()),
            Self::Updated(path) => write!(f, "Added spell file to {}", path.display()),
            Self::Unchanged(path) => write!(f, "{} already loads the spell file", path.display()),
        }
    }
}

fn has_directory(path: &Path) -> bool {
    path.is_absolute() || path.parent().is_some_and(|p| !p.as_os_str().is_empty())
}

/// Create or update the `.pcc` next to `lst_path`.
///
/// When `campaign_file` is given it is used (created if missing). Otherwise
/// the first `.pcc` in the `.lst` directory is updated, or `homebrew.pcc`
/// is created.
pub fn sync_pcc(
    lst_path: &Path,
    system: RuleSystem,
    campaign_file: Option<&Path>,
) -> Result<PccOutcome, PccError> {
    let lst_file_name = lst_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PccError::InvalidLstPath(lst_path.to_path_buf()))?;
    let dir = lst_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let target = match campaign_file {
        Some(file) if has_directory(file) => Some(with_pcc_extension(file)),
        Some(file) => Some(dir.join(with_pcc_extension(file))),
        None => find_pcc(dir)?,
    };

    match target {
        Some(pcc) if pcc.is_file() => {
            if ensure_pcc_references(&pcc, lst_file_name)? {
                Ok(PccOutcome::Updated(pcc))
            } else {
                Ok(PccOutcome::Unchanged(pcc))
            }
        }
        target => {
            let pcc = target.unwrap_or_else(|| dir.join("homebrew.pcc"));
            fs::write(&pcc, render_pcc(&pcc, system, lst_file_name))?;
            tracing::info!(pcc = %pcc.display(), "Created .pcc file");
            Ok(PccOutcome::Created(pcc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_new_campaign() {
        let campaign = Path::new("/data/my homebrew.pcc");
        let text = render_pcc(campaign, RuleSystem::Pathfinder1e, "spells.lst");
        assert_eq!(
            text,
            "CAMPAIGN:My Homebrew\nGAMEMODE:Pathfinder\nTYPE:Homebrew.PathfinderHomebrew\n\
             BOOKTYPE:Supplement\nPUBNAMELONG:Homebrew\nPUBNAMESHORT:Homebrew\n\
             SOURCELONG:My Homebrew\nSOURCESHORT:Homebrew\nRANK:9\n\
             DESC:Homebrew content generated by spellgen\n\nSPELL:spells.lst"
        );
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("my_SPELLS-2"), "My_Spells-2");
        assert_eq!(title_case("homebrew"), "Homebrew");
    }

    #[test]
    fn game_mode_follows_system() {
        let text = render_pcc(Path::new("x.pcc"), RuleSystem::Dnd5e, "a.lst");
        assert!(text.contains("\nGAMEMODE:5e\nTYPE:Homebrew.5eHomebrew\n"));
    }

    #[test]
    fn find_pcc_uses_sorted_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(find_pcc(dir.path()).expect("read dir"), None);
        for name in ["b.pcc", "a.PCC", "c.lst"] {
            fs::write(dir.path().join(name), "").expect("write");
        }
        let found = find_pcc(dir.path()).expect("read dir");
        assert_eq!(found, Some(dir.path().join("a.PCC")));
    }

    #[test]
    fn references_match_whole_file_names() {
        assert!(references_lst("CAMPAIGN:Hb\nSPELL:spells.lst", "spells.lst"));
        assert!(references_lst("SPELL:@/homebrew/spells.lst", "spells.lst"));
        assert!(references_lst("SPELL:a.lst|spells.lst", "spells.lst"));
        assert!(!references_lst("SPELL:myspells.lst", "spells.lst"));
        assert!(!references_lst("SPELL:spells.lst.bak", "spells.lst"));
        assert!(!references_lst("DESC:uses spells.lst", "spells.lst"));
    }

    #[test]
    fn ensure_references_ignores_similar_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pcc = dir.path().join("hb.pcc");
        fs::write(&pcc, "CAMPAIGN:Hb\nSPELL:myspells.lst").expect("write");

        assert!(ensure_pcc_references(&pcc, "spells.lst").expect("update"));
        assert_eq!(
            fs::read_to_string(&pcc).expect("read"),
            "CAMPAIGN:Hb\nSPELL:myspells.lst\nSPELL:spells.lst"
        );
    }

    #[test]
    fn ensure_references_appends_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pcc = dir.path().join("hb.pcc");
        fs::write(&pcc, "CAMPAIGN:Hb\nSPELL:other.lst").expect("write");

        assert!(ensure_pcc_references(&pcc, "spells.lst").expect("update"));
        assert!(!ensure_pcc_references(&pcc, "spells.lst").expect("no-op"));
        assert_eq!(
            fs::read_to_string(&pcc).expect("read"),
            "CAMPAIGN:Hb\nSPELL:other.lst\nSPELL:spells.lst"
        );
    }

    #[test]
    fn sync_creates_then_updates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let lst = dir.path().join("spells.lst");
        let pcc = dir.path().join("homebrew.pcc");

        let created = sync_pcc(&lst, RuleSystem::Dnd35e, None).expect("create");
        assert_eq!(created, PccOutcome::Created(pcc.clone()));
        let text = fs::read_to_string(&pcc).expect("read");
        assert!(text.ends_with("SPELL:spells.lst"));

        let again = sync_pcc(&lst, RuleSystem::Dnd35e, None).expect("unchanged");
        assert_eq!(again, PccOutcome::Unchanged(pcc.clone()));

        let other = dir.path().join("more.lst");
        let updated = sync_pcc(&other, RuleSystem::Dnd35e, None).expect("update");
        assert_eq!(updated, PccOutcome::Updated(pcc));
    }

    #[test]
    fn sync_with_named_campaign() {
        let dir = tempfile::tempdir().expect("temp dir");
        let lst = dir.path().join("spells.lst");
        let campaign = Some(Path::new("arcana"));
        let outcome = sync_pcc(&lst, RuleSystem::Pathfinder1e, campaign).expect("create");
        assert_eq!(outcome, PccOutcome::Created(dir.path().join("arcana.pcc")));
        let text = fs::read_to_string(outcome.path()).expect("read");
        assert!(text.starts_with("CAMPAIGN:Arcana\n"));
    }
}
