//! Configuration for infraudit
//!
//! Searches for configuration in this order, first hit wins:
//! 1. `--config PATH` given on the command line
//! 2. `infraudit.toml` in the working directory
//! 3. `.infrauditrc.json` in the working directory
//! 4. `<config_dir>/infraudit/config.toml`
//!
//! Every field has a default, so an empty file is a valid config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::session::DEFAULT_ANALYSIS_STEPS;

pub const PROJECT_CONFIG_FILE: &str = "infraudit.toml";
pub const PROJECT_CONFIG_JSON: &str = ".infrauditrc.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub defaults: CliDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// File or directory of module TOML files replacing the built-in catalog
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Pacing of the Analyzing counter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Delay between two ticks in the interactive views
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_steps() -> u32 {
    DEFAULT_ANALYSIS_STEPS
}

fn default_tick_ms() -> u64 {
    40
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Organization named in document headers
    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            organization: None,
            reference_prefix: default_reference_prefix(),
        }
    }
}

fn default_reference_prefix() -> String {
    "AUD".to_string()
}

/// Defaults for CLI flags
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CliDefaults {
    /// Default output format of `score`
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub no_emoji: Option<bool>,
}

impl AuditConfig {
    /// Load configuration for a run started in `cwd`.
    ///
    /// An explicit path must exist and parse. Discovered files that fail to
    /// parse are logged and skipped.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            let config = load_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            return Ok(config);
        }
        Ok(Self::discover(cwd, user_config_path().as_deref()))
    }

    /// Walk the lookup chain, falling back to defaults
    pub fn discover(cwd: &Path, user_config: Option<&Path>) -> Self {
        let candidates = [
            Some(cwd.join(PROJECT_CONFIG_FILE)),
            Some(cwd.join(PROJECT_CONFIG_JSON)),
            user_config.map(Path::to_path_buf),
        ];

        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match load_file(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load {}: {:#}", path.display(), e);
                }
            }
        }

        debug!("No config found, using defaults");
        Self::default()
    }

    pub fn no_emoji(&self) -> bool {
        self.defaults.no_emoji.unwrap_or(false)
    }
}

/// `<config_dir>/infraudit/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("infraudit").join("config.toml"))
}

fn load_file(path: &Path) -> Result<AuditConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Commented example written by `infraudit init`
pub fn example_config() -> &'static str {
    r#"# infraudit configuration

[catalog]
# File or directory of module TOML files replacing the built-in catalog
# path = "audit-modules"

[analysis]
# Steps of the analysis progress counter and delay between steps
steps = 20
tick_ms = 40

[export]
# organization = "Example Corp"
reference_prefix = "AUD"

[defaults]
# format = "markdown"
# no_emoji = false
"#
}
