//! Configuration loading and discovery for `pathicon.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PathiconConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up during discovery.
pub const CONFIG_FILE: &str = "pathicon.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pathicon.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override default size
    pub size: Option<String>,
    /// Override default color
    pub color: Option<String>,
    /// Override default duration
    pub duration: Option<String>,
    /// Replace the icon source patterns
    pub sources: Option<Vec<String>>,
    /// Enable strict validation
    pub strict: Option<bool>,
}

/// Find pathicon.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pathicon.toml
/// 2. Check XDG_CONFIG_HOME/pathicon/pathicon.toml (or ~/.config/pathicon/pathicon.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pathicon.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pathicon").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find pathicon.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pathicon.toml file.
///
/// With an explicit path, that file must exist. Otherwise the file is
/// discovered with [`find_config`], and defaults are used when none exists.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("site/pathicon.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PathiconConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            log::debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(default_config())
        }
    }
}

fn load_config_file(path: &Path) -> Result<PathiconConfig, ConfigError> {
    log::debug!("loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let config: PathiconConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no pathicon.toml is found.
pub fn default_config() -> PathiconConfig {
    PathiconConfig::default()
}

/// Merge CLI overrides into a configuration. CLI arguments win.
pub fn merge_cli_overrides(config: &mut PathiconConfig, overrides: &CliOverrides) {
    if let Some(ref size) = overrides.size {
        config.defaults.size = size.clone();
    }
    if let Some(ref color) = overrides.color {
        config.defaults.color = color.clone();
    }
    if let Some(ref duration) = overrides.duration {
        config.defaults.duration = duration.clone();
    }
    if let Some(ref sources) = overrides.sources {
        config.icons.sources = sources.clone();
    }
    if let Some(strict) = overrides.strict {
        config.validate.strict = strict;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root. Absolute paths pass through.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
