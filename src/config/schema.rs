//! Configuration schema types for `pathicon.toml`
//!
//! Defines element defaults, icon source discovery and validation settings.

use serde::{Deserialize, Serialize};

use crate::element::RenderDefaults;

/// Element defaults applied when an attribute is not set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_delay")]
    pub delay: String,
    #[serde(default = "default_stagger")]
    pub stagger: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            color: default_color(),
            duration: default_duration(),
            delay: default_delay(),
            stagger: default_stagger(),
        }
    }
}

fn default_size() -> String {
    RenderDefaults::default().size
}

fn default_color() -> String {
    RenderDefaults::default().color
}

fn default_duration() -> String {
    RenderDefaults::default().duration
}

fn default_delay() -> String {
    RenderDefaults::default().delay
}

fn default_stagger() -> String {
    RenderDefaults::default().stagger
}

impl DefaultsConfig {
    pub fn render_defaults(&self) -> RenderDefaults {
        RenderDefaults {
            size: self.size.clone(),
            color: self.color.clone(),
            duration: self.duration.clone(),
            delay: self.delay.clone(),
            stagger: self.stagger.clone(),
        }
    }
}

/// Where icon definition files are found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Glob patterns, relative to the directory holding `pathicon.toml`
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self { sources: default_sources() }
    }
}

fn default_sources() -> Vec<String> {
    vec!["icons/**/*.json".to_string()]
}

/// Validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidateConfig {
    /// Any invalid icon file fails the whole load
    #[serde(default)]
    pub strict: bool,
}

/// Complete `pathicon.toml` contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathiconConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub icons: IconsConfig,
    #[serde(default)]
    pub validate: ValidateConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.duration")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pathicon.toml: '{}' {}", self.field, self.message)
    }
}

/// True for non-negative CSS times like `0.6s`, `150ms` or `0`.
pub fn is_css_time(value: &str) -> bool {
    let value = value.trim();
    if value == "0" {
        return true;
    }
    let number = value
        .strip_suffix("ms")
        .or_else(|| value.strip_suffix('s'))
        .unwrap_or("");
    number.parse::<f64>().is_ok_and(|n| n >= 0.0)
}

impl PathiconConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.defaults.size.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "defaults.size".to_string(),
                message: "must be a non-empty CSS length".to_string(),
            });
        }

        if self.defaults.color.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "defaults.color".to_string(),
                message: "must be a non-empty CSS color".to_string(),
            });
        }

        for (field, value) in [
            ("defaults.duration", &self.defaults.duration),
            ("defaults.delay", &self.defaults.delay),
            ("defaults.stagger", &self.defaults.stagger),
        ] {
            if !is_css_time(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("must be a non-negative CSS time, got '{}'", value),
                });
            }
        }

        if self.icons.sources.is_empty() {
            errors.push(ConfigValidationError {
                field: "icons.sources".to_string(),
                message: "must contain at least one glob pattern".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
