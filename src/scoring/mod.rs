//! Audit scoring
//!
//! # Scoring Formula
//!
//! ```text
//! For every answered question q with chosen option o:
//!   total_score      += o.score          category(q).current += o.score
//!   total_max        += 10               category(q).max     += 10
//!
//! percentage(current, max) = round(100 × current / max), 0 when max = 0
//! ```
//!
//! Unanswered questions contribute to neither side of the ratio.
//!
//! # Maturity Tiers
//!
//! | Global score | Tier         |
//! |--------------|--------------|
//! | 0-29         | Initial      |
//! | 30-49        | Reproducible |
//! | 50-69        | Defined      |
//! | 70-89        | Managed      |
//! | 90-100       | Optimized    |
//!
//! # Risk Ranking
//!
//! Risks of chosen options are ordered by severity weight
//! (Critical 4, Major 3, Moderate 2, Low 1), ties kept in question order.

mod aggregator;
mod risks;

pub use aggregator::{aggregate, percentage, ScoreSummary};
pub use risks::prioritize;
