//! Turns discrete answers into category and global percentages

use crate::models::{AuditModule, CategoryScore, MaturityLevel, MAX_OPTION_SCORE};
use crate::session::AnswerStore;
use tracing::debug;

/// Aggregated scores for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    /// One entry per category, in order of first appearance in the module
    pub categories: Vec<CategoryScore>,
    pub total_score: u32,
    pub total_max: u32,
    pub answered: usize,
    pub global_score: u32,
    pub maturity: MaturityLevel,
}

/// `round(100 * current / max)`, or 0 when `max` is 0
pub fn percentage(current: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (100.0 * current as f64 / max as f64).round() as u32
}

/// Score every answered question of a module.
///
/// Unanswered questions are left out of both the score and the maximum, so a
/// partially answered module is judged only on what was answered.
pub fn aggregate(module: &AuditModule, answers: &AnswerStore) -> ScoreSummary {
    let per_question_max = MAX_OPTION_SCORE as u32;

    let mut categories: Vec<CategoryScore> = module
        .categories()
        .into_iter()
        .map(|category| CategoryScore {
            category: category.to_string(),
            current: 0,
            max: 0,
            percentage: 0,
        })
        .collect();

    let mut total_score = 0;
    let mut total_max = 0;
    let mut answered = 0;

    for question in &module.questions {
        let Some(option) = answers.chosen(&question.id) else {
            continue;
        };
        let score = option.score.clamp(0, MAX_OPTION_SCORE) as u32;

        total_score += score;
        total_max += per_question_max;
        answered += 1;

        if let Some(cat) = categories.iter_mut().find(|c| c.category == question.category) {
            cat.current += score;
            cat.max += per_question_max;
        }
    }

    for cat in &mut categories {
        cat.percentage = percentage(cat.current, cat.max);
    }

    let global_score = percentage(total_score, total_max);
    let maturity = MaturityLevel::from_score(global_score);

    debug!(
        "Scored {}: {}/{} over {} answers -> {}% ({})",
        module.id, total_score, total_max, answered, global_score, maturity
    );

    ScoreSummary {
        categories,
        total_score,
        total_max,
        answered,
        global_score,
        maturity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{module, option, question, sample_module};

    fn answer_all(module: &AuditModule, picks: &[&str]) -> AnswerStore {
        let mut store = AnswerStore::new();
        for (q, pick) in module.questions.iter().zip(picks) {
            store.record(&q.id, q.option(pick).unwrap().clone());
        }
        store
    }

    #[test]
    fn test_percentage_rounding_and_guard() {
        assert_eq!(percentage(15, 30), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(10, 10), 100);
    }

    #[test]
    fn test_single_category_example() {
        let m = module(
            "m",
            vec![
                question("q1", "Ops", vec![option("hi", 10, None), option("lo", 0, None), option("mid", 5, None)]),
                question("q2", "Ops", vec![option("hi", 10, None), option("lo", 0, None), option("mid", 5, None)]),
                question("q3", "Ops", vec![option("hi", 10, None), option("lo", 0, None), option("mid", 5, None)]),
            ],
        );
        let summary = aggregate(&m, &answer_all(&m, &["hi", "lo", "mid"]));

        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].current, 15);
        assert_eq!(summary.categories[0].max, 30);
        assert_eq!(summary.categories[0].percentage, 50);
        assert_eq!(summary.global_score, 50);
        assert_eq!(summary.maturity, MaturityLevel::Defined);
    }

    #[test]
    fn test_category_max_sums_to_total_max() {
        let m = sample_module();
        let summary = aggregate(&m, &answer_all(&m, &["a", "b", "c"]));
        let category_max: u32 = summary.categories.iter().map(|c| c.max).sum();
        assert_eq!(category_max, summary.total_max);
        assert_eq!(summary.total_max, 10 * summary.answered as u32);
        assert_eq!(summary.answered, 3);

        let network = &summary.categories[0];
        assert_eq!(network.category, "Network");
        assert_eq!((network.current, network.max, network.percentage), (10, 20, 50));
        let backup = &summary.categories[1];
        assert_eq!((backup.current, backup.max, backup.percentage), (5, 10, 50));
    }

    #[test]
    fn test_unanswered_questions_are_excluded() {
        let m = sample_module();
        let mut store = AnswerStore::new();
        store.record("q1", m.questions[0].option("a").unwrap().clone());

        let summary = aggregate(&m, &store);
        assert_eq!(summary.total_score, 10);
        assert_eq!(summary.total_max, 10);
        assert_eq!(summary.global_score, 100);
        assert_eq!(summary.maturity, MaturityLevel::Optimized);

        let backup = summary.categories.iter().find(|c| c.category == "Backup").unwrap();
        assert_eq!((backup.max, backup.percentage), (0, 0));
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let summary = aggregate(&sample_module(), &AnswerStore::new());
        assert_eq!(summary.total_max, 0);
        assert_eq!(summary.global_score, 0);
        assert_eq!(summary.maturity, MaturityLevel::Initial);
        assert!(summary.categories.iter().all(|c| c.percentage == 0));
    }

    #[test]
    fn test_answers_for_other_modules_are_ignored() {
        let m = sample_module();
        let mut store = answer_all(&m, &["c", "c", "c"]);
        store.record("unrelated", option("x", 10, None));
        let summary = aggregate(&m, &store);
        assert_eq!(summary.answered, 3);
        assert_eq!(summary.total_score, 0);
    }
}
