//! One audit run: the answers given so far and the flow that collects them

mod answers;
mod flow;

pub use answers::{Answer, AnswerStore};
pub use flow::{AnalysisProgress, AnalysisStatus, AuditFlow, AuditState, DEFAULT_ANALYSIS_STEPS};
