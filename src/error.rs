//! Error types for the audit engine
//!
//! `CatalogError` covers everything that can go wrong while loading and
//! validating the module catalog. `FlowError` is an invalid transition of
//! the audit state machine; it is always returned before any state changes.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog loading, validation and lookup errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog contains no modules")]
    Empty,

    #[error("Empty identifier in {0}")]
    EmptyIdentifier(String),

    #[error("Duplicate module id '{0}'")]
    DuplicateModule(String),

    #[error("Module '{0}' has no questions")]
    EmptyModule(String),

    #[error("Duplicate question id '{question}' in module '{module}'")]
    DuplicateQuestion { module: String, question: String },

    #[error("Question '{question}' in module '{module}' has no options")]
    NoOptions { module: String, question: String },

    #[error("Duplicate option id '{option}' in question '{module}/{question}'")]
    DuplicateOption {
        module: String,
        question: String,
        option: String,
    },

    #[error("Option '{module}/{question}/{option}' scores {score}, expected 0..={max}")]
    ScoreOutOfRange {
        module: String,
        question: String,
        option: String,
        score: i32,
        max: i32,
    },

    #[error("Unknown module '{0}'")]
    ModuleNotFound(String),

    #[error("Failed to parse catalog data from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid transition of the audit flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("A module can only be selected from module selection (current state: {0})")]
    NotSelecting(&'static str),

    #[error("Unknown module '{0}'")]
    UnknownModule(String),

    #[error("No question is active (current state: {0})")]
    NoActiveQuestion(&'static str),

    #[error("Option '{option}' does not belong to question '{question}'")]
    ForeignOption { question: String, option: String },

    #[error("Audit is not analyzing (current state: {0})")]
    NotAnalyzing(&'static str),
}
