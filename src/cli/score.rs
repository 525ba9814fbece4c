//! Score command - non-interactive audit from a file of answers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use super::CliEnv;
use crate::reporters::{self, ExportStamp, OutputFormat};
use crate::session::{AnalysisStatus, AuditFlow};

pub struct ScoreArgs {
    pub module: String,
    pub answers: PathBuf,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub reference: Option<String>,
    pub date: Option<String>,
    pub no_progress: bool,
    pub no_emoji: bool,
}

pub fn run(env: &CliEnv, args: ScoreArgs) -> Result<()> {
    let format_name = args
        .format
        .as_deref()
        .or(env.config.defaults.format.as_deref())
        .unwrap_or("text");
    let format = OutputFormat::from_str(format_name)?;
    let no_emoji = args.no_emoji || env.config.no_emoji();

    // Resolve the stamp before running anything so a bad date fails fast
    let stamp = build_stamp(env, args.reference, args.date.as_deref())?;

    let answers = read_answers(&args.answers)?;
    let mut flow = AuditFlow::new(&env.catalog).with_analysis_steps(env.config.analysis.steps);
    flow.select_module(&args.module)?;
    feed_answers(&mut flow, &answers)?;

    let show_progress = !args.no_progress && Term::stdout().is_term();
    if show_progress {
        run_analysis_with_bar(&mut flow, env.config.analysis.steps, env.config.analysis.tick_ms)?;
    } else {
        flow.finish_analysis()?;
    }

    let report = flow
        .into_report()
        .context("Audit finished without producing a report")?;
    let rendered = reporters::render(&report, &stamp, format)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let icon = if no_emoji { "" } else { "📄 " };
            println!(
                "{}{} report written to {} ({}/100, {})",
                icon,
                format,
                style(path.display()).cyan(),
                report.global_score,
                report.maturity
            );
        }
        None => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn build_stamp(env: &CliEnv, reference: Option<String>, date: Option<&str>) -> Result<ExportStamp> {
    let mut stamp = ExportStamp::generate(&env.config.export.reference_prefix);
    if let Some(date) = date {
        stamp.date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", date))?;
        if reference.is_none() {
            stamp.reference = reporters::generate_reference(&env.config.export.reference_prefix, stamp.date);
        }
    }
    if let Some(reference) = reference {
        stamp.reference = reference;
    }
    Ok(stamp.with_organization(env.config.export.organization.clone()))
}

/// Parse a `question_id = "option_id"` TOML table
fn parse_answers(content: &str) -> Result<BTreeMap<String, String>> {
    Ok(toml::from_str(content)?)
}

fn read_answers(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    parse_answers(&content).with_context(|| format!("Invalid answers file {}", path.display()))
}

/// Answer every question of the selected module in catalog order
fn feed_answers(flow: &mut AuditFlow<'_>, answers: &BTreeMap<String, String>) -> Result<()> {
    let Some(module) = flow.current_module() else {
        bail!("No module selected");
    };

    for id in answers.keys() {
        if module.question(id).is_none() {
            warn!("Ignoring answer for unknown question '{}' in module {}", id, module.id);
        }
    }

    while let Some(question) = flow.current_question() {
        let Some(option_id) = answers.get(&question.id) else {
            let valid: Vec<&str> = question.options.iter().map(|o| o.id.as_str()).collect();
            bail!(
                "Missing answer for question '{}' ({}). Valid options: {}",
                question.id,
                question.text,
                valid.join(", ")
            );
        };
        flow.answer(option_id)
            .with_context(|| format!("Invalid answer for question '{}'", question.id))?;
    }
    debug!("Fed {} answers into module {}", module.questions.len(), module.id);
    Ok(())
}

fn run_analysis_with_bar(flow: &mut AuditFlow<'_>, steps: u32, tick_ms: u64) -> Result<()> {
    let bar = ProgressBar::new(steps.max(1) as u64);
    bar.set_style(create_bar_style());
    bar.set_message("Analyzing answers...");
    let tick = Duration::from_millis(tick_ms);

    loop {
        match flow.tick_analysis()? {
            AnalysisStatus::InProgress(progress) => {
                bar.set_position(progress.step() as u64);
                std::thread::sleep(tick);
            }
            AnalysisStatus::Complete => {
                bar.finish_and_clear();
                return Ok(());
            }
        }
    }
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}
