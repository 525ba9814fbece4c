//! Condensed text digest handed to a conversational assistant

use crate::models::AuditReport;

/// Number of risks included in the assistant digest
pub const ASSISTANT_TOP_RISKS: usize = 5;

/// Build the assistant digest: module, global score, maturity, category
/// scores and the top risks with their recommended action.
pub fn assistant_digest(report: &AuditReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Audit module: {} ({})",
        report.module_title, report.standard
    ));
    lines.push(format!(
        "Global score: {}/100, maturity: {}",
        report.global_score, report.maturity
    ));

    let categories: Vec<String> = report
        .categories
        .iter()
        .map(|c| format!("{} {}%", c.category, c.percentage))
        .collect();
    if !categories.is_empty() {
        lines.push(format!("Categories: {}", categories.join(", ")));
    }

    if report.risks.is_empty() {
        lines.push("Top risks: none identified".to_string());
    } else {
        lines.push(format!(
            "Top risks ({} of {}):",
            report.risks.len().min(ASSISTANT_TOP_RISKS),
            report.risks.len()
        ));
        for (i, ranked) in report.risks.iter().take(ASSISTANT_TOP_RISKS).enumerate() {
            lines.push(format!(
                "{}. [{}] {} -> {} ({})",
                i + 1,
                ranked.risk.severity,
                ranked.risk.description,
                ranked.risk.recommendation.action,
                ranked.risk.recommendation.term
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{module, option, question};
    use crate::models::Severity;
    use crate::report::evaluate;
    use crate::session::AnswerStore;

    #[test]
    fn test_digest_keeps_top_five_in_rank_order() {
        let questions = (1..=7)
            .map(|i| {
                let severity = if i % 2 == 0 { Severity::Critical } else { Severity::Moderate };
                question(&format!("q{i}"), "Ops", vec![option("ok", 10, None), option(&format!("bad{i}"), 0, Some(severity))])
            })
            .collect();
        let m = module("m", questions);
        let mut store = AnswerStore::new();
        for q in &m.questions {
            store.record(&q.id, q.options[1].clone());
        }
        let digest = assistant_digest(&evaluate(&m, &store));

        assert!(digest.contains("Audit module: Module m (Test standard)"));
        assert!(digest.contains("Global score: 0/100, maturity: Initial"));
        assert!(digest.contains("Top risks (5 of 7):"));
        assert!(digest.contains("1. [critical] Risk of bad2 -> Fix bad2 (immediate)"));
        assert!(digest.contains("4. [moderate] Risk of bad1"));
        assert!(digest.contains("5. [moderate] Risk of bad3"));
        assert!(!digest.contains("bad5"));
        assert!(!digest.contains("6."));
    }

    #[test]
    fn test_digest_without_risks() {
        let m = module("m", vec![question("q1", "Ops", vec![option("ok", 10, None)])]);
        let mut store = AnswerStore::new();
        store.record("q1", m.questions[0].options[0].clone());
        let digest = assistant_digest(&evaluate(&m, &store));
        assert!(digest.contains("Global score: 100/100, maturity: Optimized"));
        assert!(digest.contains("Categories: Ops 100%"));
        assert!(digest.ends_with("Top risks: none identified"));
    }

    #[test]
    fn test_digest_is_deterministic() {
        let m = module("m", vec![question("q1", "Ops", vec![option("bad", 0, Some(Severity::Major))])]);
        let mut store = AnswerStore::new();
        store.record("q1", m.questions[0].options[0].clone());
        let report = evaluate(&m, &store);
        assert_eq!(assistant_digest(&report), assistant_digest(&report));
    }
}
