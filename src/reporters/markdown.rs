//! Markdown reporter producing the audit document
//!
//! Layout is fixed: header, summary, category breakdown, ranked risks and
//! the recommended action plan.

use super::ExportStamp;
use crate::models::{AuditReport, CategoryScore, RankedRisk};
use anyhow::Result;

/// Render report as a Markdown document
pub fn render(report: &AuditReport, stamp: &ExportStamp) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report, stamp));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_categories(&report.categories));
    md.push('\n');

    md.push_str(&render_risks(&report.risks));
    md.push('\n');

    md.push_str(&render_action_plan(&report.risks));
    md.push('\n');

    md.push_str(&render_footer(stamp));

    Ok(md)
}

fn render_header(report: &AuditReport, stamp: &ExportStamp) -> String {
    let mut md = format!("# Audit Report: {}\n\n", report.module_title);
    md.push_str(&format!("**Reference:** {}  \n", stamp.reference));
    md.push_str(&format!("**Date:** {}  \n", stamp.date.format("%Y-%m-%d")));
    if let Some(org) = &stamp.organization {
        md.push_str(&format!("**Organization:** {}  \n", org));
    }
    md.push_str(&format!("**Standard:** {}\n", report.standard));
    md
}

fn render_summary(report: &AuditReport) -> String {
    let rs = &report.risk_summary;
    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Global Score** | {}/100 |
| **Maturity Level** | {} ({}/5) |
| **Assessment** | {} |
| **Questions Answered** | {}/{} |
| **Points** | {}/{} |
| **Risks** | {} ({} critical, {} major, {} moderate, {} low) |
"#,
        report.global_score,
        report.maturity,
        report.maturity.ordinal(),
        report.maturity.description(),
        report.answered,
        report.question_count,
        report.total_score,
        report.total_max,
        rs.total,
        rs.critical,
        rs.major,
        rs.moderate,
        rs.low
    )
}

fn render_categories(categories: &[CategoryScore]) -> String {
    let mut md = String::from(
        "## Category Breakdown\n\n| Category | Score | Percentage | Status |\n|----------|-------|------------|--------|\n",
    );
    for cat in categories {
        md.push_str(&format!(
            "| {} | {}/{} | {}% | {} |\n",
            escape_cell(&cat.category),
            cat.current,
            cat.max,
            cat.percentage,
            status(cat)
        ));
    }
    md
}

fn render_risks(risks: &[RankedRisk]) -> String {
    let mut md = String::from("## Identified Risks\n\n");

    if risks.is_empty() {
        md.push_str("No risks identified.\n");
        return md;
    }

    for (i, ranked) in risks.iter().enumerate() {
        let risk = &ranked.risk;
        md.push_str(&format!(
            "### {}. {} [{}]\n\n",
            i + 1,
            risk.description,
            capitalize(&risk.severity.to_string())
        ));
        md.push_str(&format!(
            "- **Category:** {}\n- **Answer:** {}\n- **Cause:** {}\n- **Impact:** {}\n- **Recommendation ({}):** {}\n\n",
            ranked.category,
            ranked.answer,
            risk.cause,
            risk.impact,
            risk.recommendation.term,
            risk.recommendation.action
        ));
    }

    md
}

/// Actions sorted by urgency, then most severe first within a term
fn render_action_plan(risks: &[RankedRisk]) -> String {
    let mut md = String::from("## Action Plan\n\n");

    if risks.is_empty() {
        md.push_str("No corrective action required.\n");
        return md;
    }

    let mut actions: Vec<&RankedRisk> = risks.iter().collect();
    actions.sort_by(|a, b| {
        a.risk
            .recommendation
            .term
            .cmp(&b.risk.recommendation.term)
            .then_with(|| b.severity().weight().cmp(&a.severity().weight()))
    });

    md.push_str("| Term | Severity | Action | Category |\n|------|----------|--------|----------|\n");
    for ranked in actions {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            ranked.risk.recommendation.term,
            capitalize(&ranked.severity().to_string()),
            escape_cell(&ranked.risk.recommendation.action),
            escape_cell(&ranked.category)
        ));
    }
    md
}

fn render_footer(stamp: &ExportStamp) -> String {
    format!("---\n\n*Generated by infraudit, reference {}*\n", stamp.reference)
}

fn status(cat: &CategoryScore) -> &'static str {
    if cat.max == 0 {
        "Not assessed"
    } else if cat.percentage >= 70 {
        "Good"
    } else if cat.percentage >= 50 {
        "Fair"
    } else {
        "Poor"
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
