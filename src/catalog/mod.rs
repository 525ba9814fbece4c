//! Audit module catalog
//!
//! The catalog is a declarative data asset: one TOML document per audit
//! domain, embedded in the binary or loaded from disk. A `Catalog` can only
//! be built through validation, so every value of this type is known to be
//! well formed before an audit starts.
//!
//! # Module format
//!
//! ```toml
//! id = "security"
//! title = "Cybersecurity"
//! subtitle = "Identity, endpoints, messaging and incident response"
//! standard = "NIST Cybersecurity Framework 2.0"
//!
//! [[questions]]
//! id = "iam-mfa"
//! category = "Identity & Access"
//! text = "Is multi-factor authentication enforced?"
//!
//! [[questions.options]]
//! id = "a"
//! label = "Yes, for every account"
//! score = 10
//!
//! [[questions.options]]
//! id = "c"
//! label = "Not deployed"
//! score = 0
//!
//! [questions.options.risk]
//! severity = "critical"
//! description = "No account is protected by a second factor"
//! cause = "MFA never configured"
//! impact = "Account takeover"
//! recommendation = { term = "immediate", action = "Enable MFA" }
//! ```

mod validate;

pub use validate::validate_modules;

use crate::error::CatalogError;
use crate::models::AuditModule;
use std::path::Path;
use tracing::{debug, info};

/// Modules shipped with the binary, in display order
const BUILTIN_MODULES: &[(&str, &str)] = &[
    ("infrastructure.toml", include_str!("data/infrastructure.toml")),
    ("security.toml", include_str!("data/security.toml")),
    ("continuity.toml", include_str!("data/continuity.toml")),
    ("governance.toml", include_str!("data/governance.toml")),
];

/// Validated, read-only set of audit modules
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<AuditModule>,
}

impl Catalog {
    /// Validate a set of modules and wrap them in a catalog
    pub fn new(modules: Vec<AuditModule>) -> Result<Self, CatalogError> {
        validate_modules(&modules)?;
        info!(
            "Catalog loaded: {} modules, {} questions",
            modules.len(),
            modules.iter().map(|m| m.questions.len()).sum::<usize>()
        );
        Ok(Self { modules })
    }

    /// The catalog bundled with infraudit
    pub fn builtin() -> Result<Self, CatalogError> {
        let modules = BUILTIN_MODULES
            .iter()
            .map(|(name, content)| parse_module(name, content))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(modules)
    }

    /// Load a catalog from a module file or a directory of module files.
    ///
    /// Directory entries are read in file name order; only `*.toml` files
    /// are considered.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };

        if !path.is_dir() {
            return Self::new(vec![read_module(path)?]);
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_err)? {
            let file = entry.map_err(io_err)?.path();
            if file.is_file() && file.extension().is_some_and(|ext| ext == "toml") {
                files.push(file);
            }
        }
        files.sort();
        debug!("Found {} module files in {}", files.len(), path.display());

        let modules = files
            .iter()
            .map(|f| read_module(f))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(modules)
    }

    /// All modules, in catalog order
    pub fn list_modules(&self) -> &[AuditModule] {
        &self.modules
    }

    /// Look up a module by identifier
    pub fn get_module(&self, id: &str) -> Result<&AuditModule, CatalogError> {
        self.modules
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CatalogError::ModuleNotFound(id.to_string()))
    }

    pub fn question_count(&self) -> usize {
        self.modules.iter().map(|m| m.questions.len()).sum()
    }
}

/// Parse one module document. Validation happens when the catalog is built.
pub fn parse_module(origin: &str, content: &str) -> Result<AuditModule, CatalogError> {
    toml::from_str(content).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn read_module(path: &Path) -> Result<AuditModule, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_module(&path.display().to_string(), &content)
}
