//! Core data models for infraudit
//!
//! These models describe the audit catalog (modules, questions, weighted
//! options and their risk metadata) and the immutable report produced once
//! a module has been fully answered.

use serde::{Deserialize, Serialize};

/// Highest score an option may carry. Every question is scored out of this.
pub const MAX_OPTION_SCORE: i32 = 10;

/// Severity levels for risks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    Major,
    Critical,
}

impl Severity {
    /// Ordinal weight used to rank risks
    pub fn weight(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::Major => 3,
            Severity::Moderate => 2,
            Severity::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Urgency of a recommended remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Term {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Immediate => write!(f, "immediate"),
            Term::ShortTerm => write!(f, "short-term"),
            Term::MediumTerm => write!(f, "medium-term"),
            Term::LongTerm => write!(f, "long-term"),
        }
    }
}

/// A suggested remediation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub term: Term,
    pub action: String,
}

/// Risk attached to an option: what the answer exposes the organization to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub severity: Severity,
    pub description: String,
    pub cause: String,
    pub impact: String,
    pub recommendation: Recommendation,
}

/// One selectable answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    /// Normalized score in `0..=MAX_OPTION_SCORE`
    pub score: i32,
    #[serde(default)]
    pub risk: Option<RiskAnalysis>,
}

/// A question within an audit module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Free-form grouping label used for sub-scoring
    pub category: String,
    pub text: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Find an option of this question by identifier
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Spread between the best and worst option score.
    ///
    /// A question with a spread of zero cannot discriminate between answers.
    pub fn score_spread(&self) -> i32 {
        let max = self.options.iter().map(|o| o.score).max().unwrap_or(0);
        let min = self.options.iter().map(|o| o.score).min().unwrap_or(0);
        max - min
    }
}

/// An audit domain: a standard reference and an ordered list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Standard the module is aligned with (e.g. "ISO/IEC 27001:2022")
    pub standard: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl AuditModule {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Distinct category labels in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !seen.contains(&q.category.as_str()) {
                seen.push(q.category.as_str());
            }
        }
        seen
    }
}

/// Qualitative maturity tier derived from the global percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityLevel {
    Initial,
    Reproducible,
    Defined,
    Managed,
    Optimized,
}

impl MaturityLevel {
    /// Map a global percentage onto a tier.
    ///
    /// Lower bounds are inclusive: 30 is Reproducible, 90 is Optimized.
    /// Values above 100 cannot come out of the aggregator but still map
    /// to Optimized so the function stays total.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 90 => MaturityLevel::Optimized,
            s if s >= 70 => MaturityLevel::Managed,
            s if s >= 50 => MaturityLevel::Defined,
            s if s >= 30 => MaturityLevel::Reproducible,
            _ => MaturityLevel::Initial,
        }
    }

    /// One-based ordinal (Initial = 1 .. Optimized = 5)
    pub fn ordinal(&self) -> u8 {
        match self {
            MaturityLevel::Initial => 1,
            MaturityLevel::Reproducible => 2,
            MaturityLevel::Defined => 3,
            MaturityLevel::Managed => 4,
            MaturityLevel::Optimized => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaturityLevel::Initial => "Initial",
            MaturityLevel::Reproducible => "Reproducible",
            MaturityLevel::Defined => "Defined",
            MaturityLevel::Managed => "Managed",
            MaturityLevel::Optimized => "Optimized",
        }
    }

    /// Short assessment sentence for documents
    pub fn description(&self) -> &'static str {
        match self {
            MaturityLevel::Initial => "Ad hoc practices, exposure to major incidents is high",
            MaturityLevel::Reproducible => "Some practices repeat but depend on individuals",
            MaturityLevel::Defined => "Documented processes exist, gaps remain in enforcement",
            MaturityLevel::Managed => "Processes are measured and controlled",
            MaturityLevel::Optimized => "Continuous improvement is embedded in operations",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulated score for one category of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub current: u32,
    pub max: u32,
    /// `round(100 * current / max)`, 0 when nothing was answered
    pub percentage: u32,
}

/// A risk carried by a chosen option, with the question it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRisk {
    pub question_id: String,
    pub category: String,
    pub answer: String,
    #[serde(flatten)]
    pub risk: RiskAnalysis,
}

impl RankedRisk {
    pub fn severity(&self) -> Severity {
        self.risk.severity
    }
}

/// Summary of ranked risks by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub critical: usize,
    pub major: usize,
    pub moderate: usize,
    pub low: usize,
    pub total: usize,
}

impl RiskSummary {
    pub fn from_risks(risks: &[RankedRisk]) -> Self {
        let mut summary = Self::default();
        for r in risks {
            match r.severity() {
                Severity::Critical => summary.critical += 1,
                Severity::Major => summary.major += 1,
                Severity::Moderate => summary.moderate += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Final, read-only result of one audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub module_id: String,
    pub module_title: String,
    pub standard: String,
    pub global_score: u32,
    pub maturity: MaturityLevel,
    pub total_score: u32,
    pub total_max: u32,
    pub answered: usize,
    pub question_count: usize,
    pub categories: Vec<CategoryScore>,
    pub risks: Vec<RankedRisk>,
    pub risk_summary: RiskSummary,
}
