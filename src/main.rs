//! dirprompt - Aggregate directory trees into prompt sections.
//!
//! Usage:
//!   dirprompt                        Assemble the configured prompt
//!   dirprompt section <DIR>          Print one section
//!   dirprompt prompt                 Assemble the configured prompt
//!   dirprompt db-error <JSON>        Describe a database error
//!   dirprompt --help                 Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirprompt_core::{PromptConfig, channel};
use dirprompt_section::{PromptBuilder, SectionBuilder, handle_db_error};

/// Config file looked up in the working directory.
const LOCAL_CONFIG: &str = "dirprompt.toml";

/// Environment switch equivalent to `--debug`.
const DEBUG_ENV: &str = "DIRPROMPT_DEBUG";

#[derive(Parser)]
#[command(
    name = "dirprompt",
    version,
    about = "Aggregate directory trees into prompt sections",
    long_about = "dirprompt reads every file below a directory and renders them, with \
                  size and modification time, as one titled text section.\n\n\
                  Run without a subcommand to assemble the configured prompt."
)]
struct Cli {
    /// Print diagnostic traces to stderr
    #[arg(short, long, global = true)]
    debug: bool,

    /// Prompt configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render one directory as a section
    Section {
        /// Directory to aggregate
        dir: PathBuf,

        /// Section title (defaults to the directory name)
        #[arg(short, long)]
        title: Option<String>,

        /// Print a file count and size summary to stderr
        #[arg(short, long)]
        summary: bool,
    },

    /// Assemble the prompt from the configured sections
    Prompt {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Describe a database error given as a JSON object
    DbError {
        /// Error object, e.g. '{"code":"23503","detail":"..."}'
        json: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.debug || std::env::var_os(DEBUG_ENV).is_some_and(|v| v != "0"));

    match cli.command {
        Some(Command::Section {
            dir,
            title,
            summary,
        }) => {
            run_section(&dir, title, summary).await;
        }
        Some(Command::Prompt { output }) => {
            run_prompt(cli.config.as_deref(), output).await?;
        }
        Some(Command::DbError { json }) => {
            run_db_error(&json)?;
        }
        None => {
            run_prompt(cli.config.as_deref(), None).await?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber.
///
/// `debug` enables every channel; otherwise `RUST_LOG` decides, and traces
/// stay off when it is unset.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(channel::ALL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Print one section.
async fn run_section(dir: &Path, title: Option<String>, summary: bool) {
    let title = title.unwrap_or_else(|| default_title(dir));
    let section = SectionBuilder::new().build(dir, &title).await;

    println!("{section}");

    if summary {
        eprintln!(
            "{} of {} files loaded, {}",
            section.loaded_count(),
            section.blocks().len(),
            format_size(section.total_size())
        );
    }
}

/// Assemble and print (or write) the prompt.
async fn run_prompt(config_path: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let prompt = PromptBuilder::new(config).build().await;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, prompt)
                .with_context(|| format!("Cannot write {}", output_path.display()))?;
            eprintln!("Wrote prompt to {}", output_path.display());
        }
        None => {
            println!("{prompt}");
        }
    }

    Ok(())
}

/// Describe a JSON-encoded database error.
fn run_db_error(json: &str) -> Result<()> {
    let error: serde_json::Value = serde_json::from_str(json).context("Invalid JSON error object")?;
    println!("{}", handle_db_error(&error));
    Ok(())
}

/// Resolve the prompt configuration.
///
/// Order: explicit `--config`, `dirprompt.toml` in the working directory, the
/// user config directory, then built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<PromptConfig> {
    if let Some(path) = explicit {
        return PromptConfig::load(path)
            .with_context(|| format!("Invalid config {}", path.display()));
    }

    let candidates = [
        Some(PathBuf::from(LOCAL_CONFIG)),
        dirs::config_dir().map(|d| d.join("dirprompt").join("config.toml")),
    ];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            tracing::info!(target: channel::INFO, "Using config {}", path.display());
            return PromptConfig::load(&path)
                .with_context(|| format!("Invalid config {}", path.display()));
        }
    }

    Ok(PromptConfig::default())
}

/// Title used when none is given: the directory's last component.
fn default_title(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
