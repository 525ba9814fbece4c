//! Audit flow state machine
//!
//! ```text
//! ModuleSelection ──select_module──▶ Questioning(module, 0)
//! Questioning(module, i) ──answer──▶ Questioning(module, i + 1)
//! Questioning(module, last) ──answer──▶ Analyzing(module)
//! Analyzing(module) ──tick_analysis × steps──▶ Report(module)
//! any state ──restart──▶ ModuleSelection
//! ```
//!
//! `Analyzing` is a fixed-step counter for progress display. It never touches
//! the answers and ends with exactly one transition to `Report`, where the
//! report is computed.

use super::answers::AnswerStore;
use crate::catalog::Catalog;
use crate::error::FlowError;
use crate::models::{AuditModule, AuditReport, Question};
use crate::report;
use tracing::{debug, info};

/// Number of analysis ticks when none is configured
pub const DEFAULT_ANALYSIS_STEPS: u32 = 20;

/// Cosmetic progress of the `Analyzing` state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisProgress {
    step: u32,
    total: u32,
}

impl AnalysisProgress {
    pub fn new(total: u32) -> Self {
        Self {
            step: 0,
            total: total.max(1),
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn percent(&self) -> u32 {
        self.step * 100 / self.total
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.total
    }

    fn advance(&mut self) {
        self.step = (self.step + 1).min(self.total);
    }
}

/// Where an audit run currently stands
#[derive(Debug, Clone)]
pub enum AuditState<'a> {
    ModuleSelection,
    Questioning {
        module: &'a AuditModule,
        index: usize,
    },
    Analyzing {
        module: &'a AuditModule,
        progress: AnalysisProgress,
    },
    Report {
        module: &'a AuditModule,
        report: AuditReport,
    },
}

impl AuditState<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            AuditState::ModuleSelection => "module-selection",
            AuditState::Questioning { .. } => "questioning",
            AuditState::Analyzing { .. } => "analyzing",
            AuditState::Report { .. } => "report",
        }
    }
}

/// Result of one analysis tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    InProgress(AnalysisProgress),
    Complete,
}

/// Drives one audit run over a catalog.
///
/// Every transition either succeeds or returns a `FlowError` with the state
/// and answers left exactly as they were.
pub struct AuditFlow<'a> {
    catalog: &'a Catalog,
    state: AuditState<'a>,
    answers: AnswerStore,
    analysis_steps: u32,
}

impl<'a> AuditFlow<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            state: AuditState::ModuleSelection,
            answers: AnswerStore::new(),
            analysis_steps: DEFAULT_ANALYSIS_STEPS,
        }
    }

    /// Set how many ticks the `Analyzing` state lasts
    pub fn with_analysis_steps(mut self, steps: u32) -> Self {
        self.analysis_steps = steps.max(1);
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn state(&self) -> &AuditState<'a> {
        &self.state
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Module being audited, if any
    pub fn current_module(&self) -> Option<&'a AuditModule> {
        match self.state {
            AuditState::ModuleSelection => None,
            AuditState::Questioning { module, .. }
            | AuditState::Analyzing { module, .. }
            | AuditState::Report { module, .. } => Some(module),
        }
    }

    /// Question awaiting an answer
    pub fn current_question(&self) -> Option<&'a Question> {
        match self.state {
            AuditState::Questioning { module, index } => module.questions.get(index),
            _ => None,
        }
    }

    /// `(answered, total)` while questioning
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            AuditState::Questioning { module, index } => Some((index, module.questions.len())),
            _ => None,
        }
    }

    /// The finished report, once in the `Report` state
    pub fn report(&self) -> Option<&AuditReport> {
        match &self.state {
            AuditState::Report { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Consume the flow and hand the report over to the caller
    pub fn into_report(self) -> Option<AuditReport> {
        match self.state {
            AuditState::Report { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Start auditing a module. Only valid from module selection.
    pub fn select_module(&mut self, id: &str) -> Result<&'a AuditModule, FlowError> {
        if !matches!(self.state, AuditState::ModuleSelection) {
            return Err(FlowError::NotSelecting(self.state.name()));
        }
        let module = self
            .catalog
            .get_module(id)
            .map_err(|_| FlowError::UnknownModule(id.to_string()))?;

        self.answers.clear();
        self.state = AuditState::Questioning { module, index: 0 };
        info!(
            "Audit started: {} ({} questions)",
            module.id,
            module.questions.len()
        );
        Ok(module)
    }

    /// Answer the current question with one of its options
    pub fn answer(&mut self, option_id: &str) -> Result<&AuditState<'a>, FlowError> {
        let (module, index) = match self.state {
            AuditState::Questioning { module, index } => (module, index),
            ref other => return Err(FlowError::NoActiveQuestion(other.name())),
        };
        let question = module
            .questions
            .get(index)
            .ok_or(FlowError::NoActiveQuestion(self.state.name()))?;
        let option = question
            .option(option_id)
            .ok_or_else(|| FlowError::ForeignOption {
                question: question.id.clone(),
                option: option_id.to_string(),
            })?;

        self.answers.record(&question.id, option.clone());
        debug!("Answered {} with {} (score {})", question.id, option.id, option.score);

        self.state = if index + 1 < module.questions.len() {
            AuditState::Questioning {
                module,
                index: index + 1,
            }
        } else {
            debug!("All {} questions answered, analyzing", module.questions.len());
            AuditState::Analyzing {
                module,
                progress: AnalysisProgress::new(self.analysis_steps),
            }
        };
        Ok(&self.state)
    }

    /// Advance the analysis counter by one step.
    ///
    /// The step that completes the counter computes the report and moves
    /// the flow to `Report`.
    pub fn tick_analysis(&mut self) -> Result<AnalysisStatus, FlowError> {
        let (module, mut progress) = match self.state {
            AuditState::Analyzing { module, progress } => (module, progress),
            ref other => return Err(FlowError::NotAnalyzing(other.name())),
        };

        progress.advance();
        if progress.is_complete() {
            self.complete_analysis(module);
            return Ok(AnalysisStatus::Complete);
        }
        self.state = AuditState::Analyzing { module, progress };
        Ok(AnalysisStatus::InProgress(progress))
    }

    /// Skip the remaining analysis ticks and produce the report
    pub fn finish_analysis(&mut self) -> Result<&AuditReport, FlowError> {
        let module = match self.state {
            AuditState::Analyzing { module, .. } => module,
            ref other => return Err(FlowError::NotAnalyzing(other.name())),
        };
        self.complete_analysis(module);
        match &self.state {
            AuditState::Report { report, .. } => Ok(report),
            other => Err(FlowError::NotAnalyzing(other.name())),
        }
    }

    /// Back to module selection, discarding answers and any report
    pub fn restart(&mut self) {
        if !matches!(self.state, AuditState::ModuleSelection) {
            debug!("Audit cancelled from state {}", self.state.name());
        }
        self.answers.clear();
        self.state = AuditState::ModuleSelection;
    }

    fn complete_analysis(&mut self, module: &'a AuditModule) {
        let report = report::evaluate(module, &self.answers);
        info!(
            "Audit complete: {} scored {}% ({}), {} risks",
            module.id,
            report.global_score,
            report.maturity,
            report.risks.len()
        );
        self.state = AuditState::Report { module, report };
    }
}
