//! Output reporters for audit reports
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON wrapped with the export stamp
//! - `markdown` - Fixed-layout audit document
//! - `html` - Standalone HTML document with embedded CSS
//! - `digest` - Condensed hand-off text for a conversational assistant
//!
//! Reporters only format. They never reorder or rescore what the report holds.

mod html;
mod json;
mod markdown;
mod text;

use crate::models::AuditReport;
use crate::report::assistant_digest;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Html,
    Digest,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "digest" | "assistant" => Ok(OutputFormat::Digest),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown, html, digest",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Digest => write!(f, "digest"),
        }
    }
}

/// Identification printed on every exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStamp {
    pub reference: String,
    pub date: NaiveDate,
    /// Audited organization, shown in document headers when set
    pub organization: Option<String>,
}

impl ExportStamp {
    pub fn new(reference: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            reference: reference.into(),
            date,
            organization: None,
        }
    }

    /// Stamp dated today with a fresh `<prefix>-<YYYYMMDD>-<8 hex>` reference
    pub fn generate(prefix: &str) -> Self {
        let date = Local::now().date_naive();
        Self::new(generate_reference(prefix, date), date)
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|o| !o.trim().is_empty());
        self
    }
}

/// Build a document reference from a prefix, a date and a random suffix
pub fn generate_reference(prefix: &str, date: NaiveDate) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, date.format("%Y%m%d"), &id[..8])
}

/// Render a report in the specified format
pub fn render(report: &AuditReport, stamp: &ExportStamp, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, stamp),
        OutputFormat::Json => json::render(report, stamp),
        OutputFormat::Markdown => markdown::render(report, stamp),
        OutputFormat::Html => html::render(report, stamp),
        OutputFormat::Digest => Ok(assistant_digest(report)),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text | OutputFormat::Digest => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    }
}
