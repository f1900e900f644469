//! PCGen spell `.lst` writer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use spellgen_domain::OutputLine;

use crate::infrastructure::importers::LstError;

/// Comment line separating spells from preserved `.MOD` lines.
pub const MODS_MARKER: &str = "# BEGIN MODS";

/// Header for a new homebrew file dated `date`.
pub fn default_header(date: NaiveDate) -> String {
    format!(
        "SOURCELONG:Homebrew\tSOURCESHORT:Homebrew\tSOURCEWEB:None\t#\tSOURCEDATE:{}",
        date.format("%Y-%m-%d")
    )
}

/// Header for a new homebrew file dated today.
pub fn default_header_today() -> String {
    default_header(chrono::Local::now().date_naive())
}

/// Render a complete `.lst` file.
pub fn render_lst(header: &str, lines: &[OutputLine], mods: &[String]) -> String {
    let mut out = String::new();
    out.push_str(header);
    out.push_str("\n\n");
    for line in lines {
        out.push_str(&line.to_line());
    }
    out.push('\n');
    out.push_str(MODS_MARKER);
    out.push('\n');
    for m in mods {
        out.push_str(m);
        out.push('\n');
    }
    out
}

/// Appends `.lst` unless the path already ends with it (any case).
pub fn with_lst_extension(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("lst"));
    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".lst");
        PathBuf::from(name)
    }
}

/// Whether `text` looks like a file this tool (or a homebrew tool) wrote.
///
/// The first line that is neither blank nor a comment must mention
/// `HOMEBREW` or `MPC`. Files with no such line are treated as ours.
pub fn is_homebrew_lst(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let upper = line.to_uppercase();
            upper.contains("HOMEBREW") || upper.contains("MPC")
        })
        .unwrap_or(true)
}

/// Write a `.lst` file, refusing to overwrite a foreign file unless `force`.
///
/// Returns the path actually written, with the `.lst` extension ensured.
pub fn write_lst(
    path: &Path,
    header: &str,
    lines: &[OutputLine],
    mods: &[String],
    force: bool,
) -> Result<PathBuf, LstError> {
    let path = with_lst_extension(path);
    if path.is_file() && !force {
        let existing = fs::read_to_string(&path)?;
        if !is_homebrew_lst(&existing) {
            tracing::warn!(path = %path.display(), "Refusing to overwrite foreign .lst file");
            return Err(LstError::ForeignFile(path));
        }
    }

    fs::write(&path, render_lst(header, lines, mods))?;
    tracing::info!(
        path = %path.display(),
        spells = lines.len(),
        mods = mods.len(),
        "Wrote .lst file"
    );
    Ok(path)
}
