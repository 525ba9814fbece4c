//! infraudit - guided IT infrastructure audits
//!
//! A declarative catalog of audit modules drives a questionnaire state
//! machine. Answers are scored per category, mapped onto a maturity tier and
//! turned into a severity-ranked risk report that can be exported.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod reporters;
pub mod scoring;
pub mod session;
