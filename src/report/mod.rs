//! Report synthesis
//!
//! `synthesize` is the hand-off point to everything downstream (terminal UI,
//! document export, assistant digest). It is a pure function: the same inputs
//! always give a structurally equal `AuditReport`.

mod digest;

pub use digest::{assistant_digest, ASSISTANT_TOP_RISKS};

use crate::models::{
    AuditModule, AuditReport, CategoryScore, MaturityLevel, RankedRisk, RiskSummary,
    MAX_OPTION_SCORE,
};
use crate::scoring;
use crate::session::AnswerStore;
use tracing::debug;

/// Assemble the final report from already computed scores and risks
pub fn synthesize(
    module: &AuditModule,
    categories: Vec<CategoryScore>,
    global_score: u32,
    maturity: MaturityLevel,
    risks: Vec<RankedRisk>,
) -> AuditReport {
    let total_score = categories.iter().map(|c| c.current).sum();
    let total_max: u32 = categories.iter().map(|c| c.max).sum();
    // Each answered question adds exactly MAX_OPTION_SCORE to the maximum
    let answered = (total_max / MAX_OPTION_SCORE as u32) as usize;

    AuditReport {
        module_id: module.id.clone(),
        module_title: module.title.clone(),
        standard: module.standard.clone(),
        global_score,
        maturity,
        total_score,
        total_max,
        answered,
        question_count: module.questions.len(),
        risk_summary: RiskSummary::from_risks(&risks),
        categories,
        risks,
    }
}

/// Score, rank and synthesize in one pass
pub fn evaluate(module: &AuditModule, answers: &AnswerStore) -> AuditReport {
    let summary = scoring::aggregate(module, answers);
    let risks = scoring::prioritize(module, answers);
    debug!(
        "Synthesizing report for {}: {} categories, {} risks",
        module.id,
        summary.categories.len(),
        risks.len()
    );
    synthesize(
        module,
        summary.categories,
        summary.global_score,
        summary.maturity,
        risks,
    )
}
