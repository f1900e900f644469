//! Spellgen - Main entry point.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spellgen_domain::{DuplicatePolicy, RuleSystem, SpellAttributeSet, ValidationResult};
use spellgen_engine::infrastructure::export::with_lst_extension;
use spellgen_engine::infrastructure::importers::read_spell_inputs;
use spellgen_engine::infrastructure::settings::SettingsStore;
use spellgen_engine::use_cases::{GenerateRequest, SpellCheck, SpellError};
use spellgen_engine::App;

#[derive(Parser)]
#[command(name = "spellgen", version, about = "Generate PCGen homebrew spell files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate spells from a JSON file and print the normalized attributes
    Validate {
        /// JSON object or array of objects with spell attributes
        input: PathBuf,
        /// Pathfinder 1e, D&D 3.5e or D&D 5e (defaults to the last used)
        #[arg(long)]
        system: Option<RuleSystem>,
    },

    /// Validate spells and write them to a .lst file
    Generate {
        input: PathBuf,
        #[arg(long)]
        system: Option<RuleSystem>,
        /// Output file; a bare file name goes to the remembered directory
        #[arg(long)]
        output: PathBuf,
        /// Existing .lst whose spells, header and mods are kept
        #[arg(long)]
        merge: Option<PathBuf>,
        /// Keep the first spell when names collide instead of replacing it
        #[arg(long)]
        keep_duplicates: bool,
        /// Overwrite an existing file that is not homebrew
        #[arg(long)]
        force: bool,
        /// Create or update a .pcc next to the output
        #[arg(long)]
        pcc: bool,
        /// Campaign file to create or update with --pcc
        #[arg(long, requires = "pcc")]
        campaign: Option<PathBuf>,
    },

    /// List the spells of a .lst file and re-validate them
    Load {
        file: PathBuf,
        #[arg(long)]
        system: Option<RuleSystem>,
    },

    /// Create or update the .pcc that loads a .lst file
    Pcc {
        file: PathBuf,
        #[arg(long)]
        system: Option<RuleSystem>,
        /// Campaign file name (defaults to the .pcc in the same directory)
        #[arg(long)]
        name: Option<PathBuf>,
    },

    /// Show or change remembered settings
    Settings {
        #[command(subcommand)]
        cmd: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the settings file location and contents
    Show,
    /// Change the default directory or rule system
    Set {
        #[arg(long)]
        directory: Option<PathBuf>,
        #[arg(long)]
        system: Option<RuleSystem>,
    },
}

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spellgen=info,spellgen_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = App::new(SettingsStore::new());

    match cli.cmd {
        Command::Validate { input, system } => {
            let system = app.resolve_system(system);
            let inputs = read_inputs(&input)?;
            let checks = app.spells(system).check(&inputs);
            for check in &checks {
                print_check(check, true);
            }
            let rejected = checks.iter().filter(|c| !c.result.is_normalized()).count();
            if rejected > 0 {
                anyhow::bail!("{rejected} of {} spell(s) rejected", checks.len());
            }
        }
        Command::Generate {
            input,
            system,
            output,
            merge,
            keep_duplicates,
            force,
            pcc,
            campaign,
        } => {
            let system = app.resolve_system(system);
            let inputs = read_inputs(&input)?;
            let output = resolve_output(&output, &app.settings.default_directory());
            let request = GenerateRequest {
                inputs,
                output,
                merge,
                duplicates: if keep_duplicates {
                    DuplicatePolicy::Keep
                } else {
                    DuplicatePolicy::Replace
                },
                force,
                pcc,
                campaign,
            };

            let report = match app.spells(system).generate(request) {
                Ok(report) => report,
                Err(SpellError::Rejected(rejected)) => {
                    for spell in &rejected {
                        println!("REJECTED {spell}");
                    }
                    anyhow::bail!("{} spell(s) rejected, nothing written", rejected.len());
                }
                Err(e) => return Err(e).context("generating spell file"),
            };

            println!(
                "Wrote {} spell(s) to {} ({} added, {} replaced, {} kept)",
                report.total,
                report.written.display(),
                report.added,
                report.replaced,
                report.kept_existing
            );
            if let Some(outcome) = &report.pcc {
                println!("{outcome}");
            }
            if let Err(e) = app.settings.remember(&report.written, system) {
                tracing::warn!(error = %e, "Failed to save settings");
            }
        }
        Command::Load { file, system } => {
            let system = app.resolve_system(system);
            let file = with_lst_extension(&file);
            let loaded = app
                .spells(system)
                .load(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            if let Some(header) = &loaded.header {
                println!("# {header}");
            }
            for check in &loaded.checks {
                print_check(check, false);
            }
            println!("{} mod line(s)", loaded.mods.len());
        }
        Command::Pcc { file, system, name } => {
            let system = app.resolve_system(system);
            let file = with_lst_extension(&file);
            let outcome = app
                .spells(system)
                .sync_campaign(&file, name.as_deref())
                .with_context(|| format!("updating campaign for {}", file.display()))?;
            println!("{outcome}");
        }
        Command::Settings { cmd } => match cmd {
            SettingsCommand::Show => {
                let settings = app.settings.current();
                println!("file: {}", app.settings.store().path().display());
                println!("directory: {}", settings.default_directory.display());
                println!("system: {}", settings.default_system);
            }
            SettingsCommand::Set { directory, system } => {
                if let Some(directory) = directory {
                    app.settings
                        .set_directory(&directory)
                        .context("saving settings")?;
                }
                if let Some(system) = system {
                    app.settings.set_system(system).context("saving settings")?;
                }
                let settings = app.settings.current();
                println!("directory: {}", settings.default_directory.display());
                println!("system: {}", settings.default_system);
            }
        },
    }

    Ok(())
}

fn read_inputs(input: &Path) -> anyhow::Result<Vec<SpellAttributeSet>> {
    read_spell_inputs(input).with_context(|| format!("reading {}", input.display()))
}

fn print_check(check: &SpellCheck, with_attributes: bool) {
    match &check.result {
        ValidationResult::Normalized(spell) => {
            println!("OK {}", check.label);
            if with_attributes {
                for (key, value) in spell.attributes().iter() {
                    println!("    {key}: {value}");
                }
            }
        }
        ValidationResult::Rejected(problems) => {
            println!("REJECTED {}", check.label);
            for problem in problems {
                println!("    {problem}");
            }
        }
    }
}

/// Bare file names are placed in the remembered directory.
fn resolve_output(output: &Path, default_directory: &Path) -> PathBuf {
    let bare = match output.parent() {
        Some(parent) => parent.as_os_str().is_empty(),
        None => true,
    };
    if bare && !output.is_absolute() {
        default_directory.join(output)
    } else {
        output.to_path_buf()
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
