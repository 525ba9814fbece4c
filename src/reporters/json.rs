//! JSON reporter
//!
//! Outputs the full AuditReport as pretty-printed JSON, wrapped with the
//! export reference and date.

use super::ExportStamp;
use crate::models::AuditReport;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonExport<'a> {
    reference: &'a str,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<&'a str>,
    report: &'a AuditReport,
}

/// Render report as JSON
pub fn render(report: &AuditReport, stamp: &ExportStamp) -> Result<String> {
    let export = JsonExport {
        reference: &stamp.reference,
        date: stamp.date.format("%Y-%m-%d").to_string(),
        organization: stamp.organization.as_deref(),
        report,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_report, test_stamp};

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report, &test_stamp()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["reference"], "AUD-20260301-0a1b2c3d");
        assert_eq!(parsed["date"], "2026-03-01");
        assert!(parsed.get("organization").is_none());
        assert_eq!(parsed["report"]["global_score"], 50);
        assert_eq!(parsed["report"]["maturity"], "defined");
        assert_eq!(parsed["report"]["risks"][0]["severity"], "critical");
    }

    #[test]
    fn test_json_report_deserializes_back() {
        let report = test_report();
        let json_str = render(&report, &test_stamp()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        let back: AuditReport = serde_json::from_value(parsed["report"].clone()).expect("report");
        assert_eq!(back, report);
    }

    #[test]
    fn test_json_organization_when_set() {
        let stamp = test_stamp().with_organization(Some("Acme".into()));
        let json_str = render(&test_report(), &stamp).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["organization"], "Acme");
    }
}
