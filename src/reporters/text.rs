//! Text (terminal) reporter with colors and formatting

use super::ExportStamp;
use crate::models::{AuditReport, MaturityLevel, Severity};
use anyhow::Result;

/// Maturity colors (ANSI escape codes)
fn maturity_color(maturity: MaturityLevel) -> &'static str {
    match maturity {
        MaturityLevel::Optimized => "\x1b[32m",    // Green
        MaturityLevel::Managed => "\x1b[92m",      // Light green
        MaturityLevel::Defined => "\x1b[33m",      // Yellow
        MaturityLevel::Reproducible => "\x1b[91m", // Light red
        MaturityLevel::Initial => "\x1b[31m",      // Red
    }
}

/// Severity colors
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::Major => "\x1b[91m",    // Light red
        Severity::Moderate => "\x1b[33m", // Yellow
        Severity::Low => "\x1b[34m",      // Blue
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Risks listed before the "...and N more" line
const MAX_RISKS: usize = 10;
const BAR_WIDTH: usize = 20;

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::Major => "[M]",
        Severity::Moderate => "[m]",
        Severity::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AuditReport, stamp: &ExportStamp) -> Result<String> {
    let mut out = String::new();

    let maturity_c = maturity_color(report.maturity);
    out.push_str(&format!("\n{BOLD}{}{RESET}\n", report.module_title));
    out.push_str(&format!("{DIM}{}{RESET}\n", report.standard));
    out.push_str(&format!(
        "{DIM}Ref {}  {}{}{RESET}\n",
        stamp.reference,
        stamp.date.format("%Y-%m-%d"),
        stamp
            .organization
            .as_deref()
            .map(|o| format!("  {o}"))
            .unwrap_or_default()
    ));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Maturity: {maturity_c}{BOLD}{}{RESET} ({}/5)  ",
        report.global_score,
        report.maturity,
        report.maturity.ordinal()
    ));
    out.push_str(&format!(
        "Answered: {}/{}  Points: {}/{}\n",
        report.answered, report.question_count, report.total_score, report.total_max
    ));
    out.push_str(&format!("{DIM}{}{RESET}\n\n", report.maturity.description()));

    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    let label_width = report
        .categories
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0);
    for cat in &report.categories {
        out.push_str(&format!(
            "  {:<width$}  {}  {}\n",
            cat.category,
            render_bar(cat.percentage),
            format_percentage(cat.percentage, cat.max),
            width = label_width
        ));
    }
    out.push('\n');

    let rs = &report.risk_summary;
    out.push_str(&format!("{BOLD}RISKS{RESET} ({} total)\n", rs.total));

    let mut summary_parts = Vec::new();
    if rs.critical > 0 {
        summary_parts.push(format!("\x1b[31m{} critical{RESET}", rs.critical));
    }
    if rs.major > 0 {
        summary_parts.push(format!("\x1b[91m{} major{RESET}", rs.major));
    }
    if rs.moderate > 0 {
        summary_parts.push(format!("\x1b[33m{} moderate{RESET}", rs.moderate));
    }
    if rs.low > 0 {
        summary_parts.push(format!("\x1b[34m{} low{RESET}", rs.low));
    }
    if !summary_parts.is_empty() {
        out.push_str(&format!("  {}\n\n", summary_parts.join(" | ")));
    }

    if report.risks.is_empty() {
        out.push_str(&format!("  {DIM}No risks identified.{RESET}\n\n"));
    } else {
        out.push_str(&format!(
            "{DIM}  #   SEV  RISK                                      ACTION{RESET}\n"
        ));
        out.push_str(&format!(
            "{DIM}  ─────────────────────────────────────────────────────────────────{RESET}\n"
        ));

        for (i, ranked) in report.risks.iter().take(MAX_RISKS).enumerate() {
            let sev = ranked.severity();
            out.push_str(&format!(
                "  {DIM}{:>3}{RESET}  {}{}{RESET}  {:<40}  {DIM}{} ({}){RESET}\n",
                i + 1,
                severity_color(sev),
                severity_tag(sev),
                truncate(&ranked.risk.description, 40),
                truncate(&ranked.risk.recommendation.action, 50),
                ranked.risk.recommendation.term
            ));
        }

        let remaining = report.risks.len().saturating_sub(MAX_RISKS);
        if remaining > 0 {
            out.push_str(&format!(
                "\n  {DIM}...and {} more (export with --format markdown for the full list){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Shorten to `max` characters, counting chars rather than bytes
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

fn render_bar(percentage: u32) -> String {
    let filled = (percentage.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!(
        "{}{}{RESET}{DIM}{}{RESET}",
        score_color(percentage),
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

fn format_percentage(percentage: u32, max: u32) -> String {
    if max == 0 {
        return format!("{DIM}n/a{RESET}");
    }
    format!("{}{:>3}%{RESET}", score_color(percentage), percentage)
}

fn score_color(percentage: u32) -> &'static str {
    if percentage >= 70 {
        "\x1b[32m"
    } else if percentage >= 50 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    }
}
