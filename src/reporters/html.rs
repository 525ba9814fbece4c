//! HTML reporter with embedded styles
//!
//! Generates a standalone audit document that opens in any browser and
//! prints cleanly. Sections follow the Markdown document.

use super::ExportStamp;
use crate::models::{AuditReport, MaturityLevel, RankedRisk, Severity};
use anyhow::Result;

/// Render report as standalone HTML
pub fn render(report: &AuditReport, stamp: &ExportStamp) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report, stamp));

    html.push_str("<div class=\"content\">\n");
    html.push_str(&render_maturity_section(report));
    html.push_str(&render_categories(report));
    html.push_str(&render_risk_summary(report));
    html.push_str(&render_risks(&report.risks));
    html.push_str(&render_action_plan(&report.risks));
    html.push_str("</div>\n");

    html.push_str(&render_footer(stamp));
    html.push_str("</div>\n</body>\n</html>\n");

    Ok(html)
}

fn render_head(report: &AuditReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Audit Report - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&report.module_title)
    )
}

fn render_header(report: &AuditReport, stamp: &ExportStamp) -> String {
    let organization = stamp
        .organization
        .as_deref()
        .map(|o| format!("    <p class=\"organization\">{}</p>\n", html_escape(o)))
        .unwrap_or_default();
    format!(
        r#"<div class="header">
    <h1>{}</h1>
    <p class="standard">{}</p>
{}    <p class="stamp">Reference {} &middot; {}</p>
</div>
"#,
        html_escape(&report.module_title),
        html_escape(&report.standard),
        organization,
        html_escape(&stamp.reference),
        stamp.date.format("%Y-%m-%d")
    )
}

fn render_maturity_section(report: &AuditReport) -> String {
    format!(
        r#"<div class="maturity-section">
    <div class="score-badge {}">{}</div>
    <div class="maturity">Maturity level {}/5: <strong>{}</strong></div>
    <p class="maturity-description">{}</p>
    <p class="answered">{} of {} questions answered, {}/{} points</p>
</div>
"#,
        maturity_class(report.maturity),
        report.global_score,
        report.maturity.ordinal(),
        report.maturity,
        report.maturity.description(),
        report.answered,
        report.question_count,
        report.total_score,
        report.total_max
    )
}

fn render_categories(report: &AuditReport) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Category Breakdown</h2>\n    <div class=\"metrics-grid\">\n",
    );
    for cat in &report.categories {
        let (value, class) = if cat.max == 0 {
            ("n/a".to_string(), "bar-none")
        } else {
            (format!("{}%", cat.percentage), bar_class(cat.percentage))
        };
        html.push_str(&format!(
            r#"        <div class="metric-card">
            <h3>{}</h3>
            <div class="metric-value">{}</div>
            <div class="metric-detail">{}/{}</div>
            <div class="metric-bar">
                <div class="metric-bar-fill {}" style="width: {}%"></div>
            </div>
        </div>
"#,
            html_escape(&cat.category),
            value,
            cat.current,
            cat.max,
            class,
            cat.percentage.min(100)
        ));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_risk_summary(report: &AuditReport) -> String {
    let rs = &report.risk_summary;
    format!(
        r#"<div class="section">
    <h2 class="section-title">Risk Summary</h2>
    <div class="severity-summary">
        <div class="severity-item"><span class="severity-badge severity-critical">Critical</span><span class="severity-count">{}</span></div>
        <div class="severity-item"><span class="severity-badge severity-major">Major</span><span class="severity-count">{}</span></div>
        <div class="severity-item"><span class="severity-badge severity-moderate">Moderate</span><span class="severity-count">{}</span></div>
        <div class="severity-item"><span class="severity-badge severity-low">Low</span><span class="severity-count">{}</span></div>
    </div>
</div>
"#,
        rs.critical, rs.major, rs.moderate, rs.low
    )
}

fn render_risks(risks: &[RankedRisk]) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Identified Risks</h2>\n",
    );

    if risks.is_empty() {
        html.push_str("    <p class=\"empty\">No risks identified.</p>\n</div>\n");
        return html;
    }

    html.push_str("    <div class=\"risks-list\">\n");
    for (i, ranked) in risks.iter().enumerate() {
        html.push_str(&render_risk(i + 1, ranked));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_risk(rank: usize, ranked: &RankedRisk) -> String {
    let risk = &ranked.risk;
    format!(
        r#"        <div class="risk-card">
            <div class="risk-header">
                <span class="rank">#{}</span>
                <span class="severity-badge {}">{}</span>
                <span class="risk-title">{}</span>
                <span class="category-badge">{}</span>
            </div>
            <div class="risk-body">
                <p><strong>Answer:</strong> {}</p>
                <p><strong>Cause:</strong> {}</p>
                <p><strong>Impact:</strong> {}</p>
                <div class="recommendation">
                    <div class="recommendation-label">Recommendation ({})</div>
                    <div class="recommendation-text">{}</div>
                </div>
            </div>
        </div>
"#,
        rank,
        severity_class(risk.severity),
        risk.severity,
        html_escape(&risk.description),
        html_escape(&ranked.category),
        html_escape(&ranked.answer),
        html_escape(&risk.cause),
        html_escape(&risk.impact),
        risk.recommendation.term,
        html_escape(&risk.recommendation.action)
    )
}

/// Corrective actions, most urgent term first, then by severity
fn render_action_plan(risks: &[RankedRisk]) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Action Plan</h2>\n",
    );

    if risks.is_empty() {
        html.push_str("    <p class=\"empty\">No corrective action required.</p>\n</div>\n");
        return html;
    }

    let mut actions: Vec<&RankedRisk> = risks.iter().collect();
    actions.sort_by(|a, b| {
        a.risk
            .recommendation
            .term
            .cmp(&b.risk.recommendation.term)
            .then_with(|| b.severity().weight().cmp(&a.severity().weight()))
    });

    html.push_str(
        "    <table class=\"action-plan\">\n        <thead><tr><th>Term</th><th>Severity</th><th>Action</th><th>Category</th></tr></thead>\n        <tbody>\n",
    );
    for ranked in actions {
        html.push_str(&format!(
            "            <tr><td>{}</td><td><span class=\"severity-badge {}\">{}</span></td><td>{}</td><td>{}</td></tr>\n",
            ranked.risk.recommendation.term,
            severity_class(ranked.severity()),
            ranked.severity(),
            html_escape(&ranked.risk.recommendation.action),
            html_escape(&ranked.category)
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_footer(stamp: &ExportStamp) -> String {
    format!(
        "<div class=\"footer\">\n    <p>Generated by infraudit &middot; {}</p>\n</div>\n",
        html_escape(&stamp.reference)
    )
}

fn bar_class(percentage: u32) -> &'static str {
    if percentage >= 70 {
        "bar-good"
    } else if percentage >= 50 {
        "bar-moderate"
    } else {
        "bar-poor"
    }
}

fn maturity_class(maturity: MaturityLevel) -> &'static str {
    match maturity {
        MaturityLevel::Optimized | MaturityLevel::Managed => "score-good",
        MaturityLevel::Defined => "score-moderate",
        MaturityLevel::Reproducible | MaturityLevel::Initial => "score-poor",
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "severity-critical",
        Severity::Major => "severity-major",
        Severity::Moderate => "severity-moderate",
        Severity::Low => "severity-low",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
:root {
    --primary-color: #0f766e;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --muted-color: #64748b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #0f766e 0%, #1d4ed8 100%);
    color: white;
    padding: 2.5rem 2rem;
}

.header h1 { font-size: 2.2rem; margin-bottom: 0.25rem; }
.header .standard, .header .organization { opacity: 0.9; }
.header .stamp { opacity: 0.8; font-size: 0.9rem; margin-top: 0.75rem; font-family: monospace; }

.content { padding: 2rem; }

.maturity-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.score-badge {
    display: inline-block;
    font-size: 3rem;
    font-weight: bold;
    width: 120px;
    height: 120px;
    line-height: 120px;
    border-radius: 50%;
    margin-bottom: 1rem;
    color: white;
}

.score-good { background: #10b981; }
.score-moderate { background: #eab308; }
.score-poor { background: #ef4444; }

.maturity { font-size: 1.3rem; }
.maturity-description, .answered { color: var(--muted-color); }
.maturity-description { font-style: italic; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
}

.metric-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.metric-card h3 { font-size: 0.875rem; color: var(--muted-color); text-transform: uppercase; }
.metric-value { font-size: 2rem; font-weight: bold; }
.metric-detail { font-size: 0.875rem; color: var(--muted-color); margin-bottom: 0.5rem; }

.metric-bar { height: 8px; background: #e2e8f0; border-radius: 4px; overflow: hidden; }
.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

.severity-summary { display: flex; flex-wrap: wrap; gap: 1rem; }
.severity-item {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.75rem 1.25rem;
    border-radius: 8px;
    border: 1px solid var(--border-color);
}
.severity-count { font-weight: bold; font-size: 1.25rem; }

.severity-badge {
    padding: 0.2rem 0.7rem;
    border-radius: 6px;
    font-size: 0.8rem;
    font-weight: 600;
    color: white;
    text-transform: capitalize;
    white-space: nowrap;
}
.severity-critical { background: #dc2626; }
.severity-major { background: #ea580c; }
.severity-moderate { background: #ca8a04; }
.severity-low { background: #2563eb; }

.risks-list { display: flex; flex-direction: column; gap: 1rem; }
.risk-card { border: 1px solid var(--border-color); border-radius: 8px; overflow: hidden; }
.risk-header {
    padding: 0.9rem 1rem;
    background: #f8fafc;
    display: flex;
    align-items: center;
    gap: 0.75rem;
    flex-wrap: wrap;
}
.rank { color: var(--muted-color); font-family: monospace; }
.risk-title { flex: 1; font-weight: 600; }
.category-badge {
    background: #ccfbf1;
    color: #0f766e;
    padding: 0.2rem 0.7rem;
    border-radius: 6px;
    font-size: 0.8rem;
}
.risk-body { padding: 1rem; }
.risk-body p { margin-bottom: 0.4rem; }

.recommendation {
    margin-top: 0.75rem;
    padding: 0.9rem;
    background: #ecfdf5;
    border-left: 4px solid #10b981;
    border-radius: 4px;
}
.recommendation-label { font-weight: 600; color: #059669; }
.recommendation-text { color: #065f46; }

.empty { color: var(--muted-color); font-style: italic; }

.footer {
    text-align: center;
    padding: 1.5rem;
    color: var(--muted-color);
    border-top: 1px solid var(--border-color);
}

.bar-none { background: transparent; }

.action-plan { width: 100%; border-collapse: collapse; font-size: 0.95rem; }
.action-plan th, .action-plan td { text-align: left; padding: 0.6rem 0.75rem; border-bottom: 1px solid var(--border-color); }
.action-plan th { color: var(--muted-color); font-weight: 600; }

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 1.5rem 1rem; }
    .header h1 { font-size: 1.6rem; }
    .score-badge { width: 80px; height: 80px; line-height: 80px; font-size: 2rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .risk-card { page-break-inside: avoid; }
}
"#;
