//! CLI command definitions and handlers

mod init;
mod modules;
mod score;
mod show;
mod tui;
mod validate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::AuditConfig;

/// infraudit - IT infrastructure audit questionnaires
#[derive(Parser, Debug)]
#[command(name = "infraudit")]
#[command(
    version,
    about = "Guided IT infrastructure audits: answer a questionnaire, get a maturity score and ranked risks",
    long_about = "infraudit walks through an audit module question by question, scores the answers \
per category, maps the global score onto a five-level maturity scale and ranks the risks \
carried by the chosen answers.\n\n\
Built-in modules: infrastructure, security, continuity, governance.",
    after_help = "\
Examples:
  infraudit modules                                List audit modules
  infraudit run                                    Interactive audit
  infraudit run security                           Interactive audit of one module
  infraudit score security --answers answers.toml  Non-interactive audit
  infraudit validate --catalog ./modules           Check a custom catalog"
)]
pub struct Cli {
    /// Module file or directory replacing the built-in catalog
    #[arg(long, global = true, env = "INFRAUDIT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Config file (default: infraudit.toml, .infrauditrc.json, then user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the audit modules of the active catalog
    Modules {
        /// Print the module list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a module's questions and answer options
    Show {
        /// Module id (see `infraudit modules`)
        module: String,
    },

    /// Load and validate the active catalog
    Validate,

    /// Run an interactive audit in the terminal
    #[command(after_help = "\
Keys:
  Up/Down or j/k   Move the selection
  Enter            Choose a module or answer
  1-9              Answer with the n-th option
  e                Export the report as Markdown (report view)
  r / Esc          Restart from module selection
  q                Quit")]
    Run {
        /// Skip module selection and start with this module
        module: Option<String>,

        /// Directory where `e` writes exported reports
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },

    /// Score a module from a file of answers
    #[command(after_help = "\
The answers file maps question ids to option ids:
  mfa = \"b\"
  backups = \"a\"

Examples:
  infraudit score continuity --answers answers.toml
  infraudit score continuity --answers answers.toml -f markdown -o audit.md
  infraudit score continuity --answers answers.toml -f json --reference AUD-2026-001
  infraudit score continuity --answers answers.toml -f digest")]
    Score {
        /// Module id (see `infraudit modules`)
        module: String,

        /// TOML file of `question_id = \"option_id\"` pairs
        #[arg(long, short = 'a')]
        answers: PathBuf,

        /// Output format: text, json, markdown (or md), html, digest
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md", "html", "digest"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Document reference (default: <prefix>-<YYYYMMDD>-<random>)
        #[arg(long)]
        reference: Option<String>,

        /// Document date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Do not show the analysis progress bar
        #[arg(long)]
        no_progress: bool,

        /// Disable emoji in output
        #[arg(long)]
        no_emoji: bool,
    },

    /// Write an example infraudit.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Settings and catalog shared by every command
pub struct CliEnv {
    pub config: AuditConfig,
    pub catalog: Catalog,
}

pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;

    // Init must work before any config or catalog exists
    let load_env = || -> Result<CliEnv> {
        let config = AuditConfig::load(cli.config.as_deref(), &cwd)?;
        let catalog = load_catalog(cli.catalog.as_deref(), &config)?;
        Ok(CliEnv { config, catalog })
    };

    match cli.command {
        Commands::Init { force } => init::run(&cwd, force),
        Commands::Modules { json } => modules::run(&load_env()?, json),
        Commands::Show { module } => show::run(&load_env()?, &module),
        Commands::Validate => validate::run(&load_env()?),
        Commands::Run { module, export_dir } => tui::run(&load_env()?, module.as_deref(), &export_dir),
        Commands::Score {
            module,
            answers,
            format,
            output,
            reference,
            date,
            no_progress,
            no_emoji,
        } => score::run(
            &load_env()?,
            score::ScoreArgs {
                module,
                answers,
                format,
                output,
                reference,
                date,
                no_progress,
                no_emoji,
            },
        ),
    }
}

/// `--catalog` wins over the config file, which wins over the built-in catalog
fn load_catalog(flag: Option<&Path>, config: &AuditConfig) -> Result<Catalog> {
    match flag.or(config.catalog.path.as_deref()) {
        Some(path) => {
            debug!("Using catalog at {}", path.display());
            Catalog::load(path)
                .with_context(|| format!("Invalid audit catalog {}", path.display()))
        }
        None => Catalog::builtin().context("Built-in audit catalog is invalid"),
    }
}
