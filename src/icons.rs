//! Loading icon configuration files.
//!
//! Files are JSON or JSON5 documents in the configuration format. Every file
//! is validated before it is deserialized, so a returned [`IconConfig`] is
//! always well-formed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;
use thiserror::Error;

use crate::config::resolve_path;
use crate::models::IconConfig;
use crate::validate::{validate_icon_config, ValidationIssue};

/// Error loading an icon configuration file
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IconFileError {
    /// File I/O error
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON/JSON5 syntax error
    #[error("Invalid JSON5: {0}")]
    Syntax(#[from] json5::Error),
    /// Document failed validation
    #[error("Icon config is invalid:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ValidationIssue>),
    /// Validated document could not be converted
    #[error("Failed to read icon config: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Parse and validate icon configuration text.
pub fn parse_icon_config(text: &str) -> Result<IconConfig, IconFileError> {
    let document: Value = json5::from_str(text)?;
    let result = validate_icon_config(&document);
    if !result.valid {
        return Err(IconFileError::Invalid(result.errors));
    }
    for warning in &result.warnings {
        log::warn!("{}", warning);
    }
    Ok(serde_json::from_value(document)?)
}

/// Load one icon configuration file.
pub fn load_icon_file(path: &Path) -> Result<IconConfig, IconFileError> {
    let text = fs::read_to_string(path)
        .map_err(|source| IconFileError::Io { path: path.to_path_buf(), source })?;
    log::debug!("loading icons from {}", path.display());
    parse_icon_config(&text)
}

/// Load several files in parallel, keeping input order in the results.
pub fn load_icon_files(paths: &[PathBuf]) -> Vec<(PathBuf, Result<IconConfig, IconFileError>)> {
    paths.par_iter().map(|path| (path.clone(), load_icon_file(path))).collect()
}

/// Expand glob patterns into a sorted, deduplicated list. Relative patterns
/// resolve against `root`, absolute ones are used as given.
pub fn expand_sources(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let full = resolve_path(root, Path::new(pattern));
        let Some(full) = full.to_str() else {
            log::warn!("skipping non-UTF-8 source pattern {}", full.display());
            continue;
        };
        match glob::glob(full) {
            Ok(entries) => files.extend(entries.flatten().filter(|p| p.is_file())),
            Err(e) => log::warn!("invalid source pattern '{}': {}", pattern, e),
        }
    }
    files.sort();
    files.dedup();
    files
}
