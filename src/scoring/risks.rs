//! Severity ranking of the risks carried by chosen options

use crate::models::{AuditModule, RankedRisk};
use crate::session::AnswerStore;

/// Collect the risk of every chosen option, most severe first.
///
/// Risks of equal severity keep the order of their questions in the module.
pub fn prioritize(module: &AuditModule, answers: &AnswerStore) -> Vec<RankedRisk> {
    let mut risks: Vec<RankedRisk> = module
        .questions
        .iter()
        .filter_map(|question| {
            let option = answers.chosen(&question.id)?;
            let risk = option.risk.as_ref()?;
            Some(RankedRisk {
                question_id: question.id.clone(),
                category: question.category.clone(),
                answer: option.label.clone(),
                risk: risk.clone(),
            })
        })
        .collect();

    // sort_by is stable
    risks.sort_by(|a, b| b.severity().weight().cmp(&a.severity().weight()));
    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{module, option, question, sample_module};
    use crate::models::Severity;

    #[test]
    fn test_sorted_by_severity_descending() {
        let m = sample_module();
        let mut store = AnswerStore::new();
        store.record("q1", m.questions[0].option("b").unwrap().clone()); // moderate
        store.record("q2", m.questions[1].option("c").unwrap().clone()); // critical
        store.record("q3", m.questions[2].option("b").unwrap().clone()); // low

        let severities: Vec<Severity> = prioritize(&m, &store).iter().map(|r| r.severity()).collect();
        assert_eq!(severities, [Severity::Critical, Severity::Moderate, Severity::Low]);
    }

    #[test]
    fn test_options_without_risk_are_skipped() {
        let m = sample_module();
        let mut store = AnswerStore::new();
        store.record("q1", m.questions[0].option("a").unwrap().clone());
        store.record("q2", m.questions[1].option("b").unwrap().clone());

        let risks = prioritize(&m, &store);
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].question_id, "q2");
    }

    #[test]
    fn test_equal_severity_keeps_question_order() {
        let questions = (1..=6)
            .map(|i| {
                let id = format!("q{i}");
                let worst = if i == 2 || i == 5 { Severity::Critical } else { Severity::Low };
                question(&id, "Ops", vec![option("a", 10, None), option("z", 0, Some(worst))])
            })
            .collect();
        let m = module("m", questions);

        // Record in reverse to prove the store's insertion order is irrelevant
        let mut store = AnswerStore::new();
        for q in m.questions.iter().rev() {
            store.record(&q.id, q.option("z").unwrap().clone());
        }

        let order: Vec<String> = prioritize(&m, &store).into_iter().map(|r| r.question_id).collect();
        assert_eq!(order, ["q2", "q5", "q1", "q3", "q4", "q6"]);
    }

    #[test]
    fn test_ranking_is_repeatable() {
        let m = sample_module();
        let mut store = AnswerStore::new();
        for q in &m.questions {
            store.record(&q.id, q.option("c").unwrap().clone());
        }
        assert_eq!(prioritize(&m, &store), prioritize(&m, &store));
    }

    #[test]
    fn test_empty_store_has_no_risks() {
        assert!(prioritize(&sample_module(), &AnswerStore::new()).is_empty());
    }
}
