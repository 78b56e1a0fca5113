//! Validation of icon configuration documents
//!
//! Checks the `{ "icons": { "<name>": { "paths": [...], ... } } }` shape
//! structurally and reports every problem found instead of stopping at the
//! first one. Validation never fails: malformed input becomes issues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Lowercase, hyphen-separated identifiers (`arrow-right`, `x2`).
static ICON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").expect("valid regex"));

const ENTRY_KEYS: [&str; 3] = ["paths", "viewBox", "layers"];
const LAYER_KEYS: [&str; 5] = ["weight", "opacity", "duration", "delay", "stagger"];
const TIMING_KEYS: [&str; 3] = ["duration", "delay", "stagger"];

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueType {
    /// Input text is not valid JSON/JSON5
    JsonSyntax,
    /// A value has the wrong JSON type
    WrongType,
    /// The top-level `icons` object is missing
    MissingIcons,
    /// Icon name does not match the identifier pattern
    InvalidName,
    /// A required field is missing
    MissingField,
    /// `paths` is empty
    EmptyPaths,
    /// A path entry is empty
    EmptyPath,
    /// viewBox is not four numbers
    InvalidViewBox,
    /// Timing value is negative
    NegativeTiming,
    /// Layer weight or opacity out of range
    OutOfRange,
    /// Property not part of the format
    UnknownProperty,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::JsonSyntax => write!(f, "json_syntax"),
            IssueType::WrongType => write!(f, "wrong_type"),
            IssueType::MissingIcons => write!(f, "missing_icons"),
            IssueType::InvalidName => write!(f, "invalid_name"),
            IssueType::MissingField => write!(f, "missing_field"),
            IssueType::EmptyPaths => write!(f, "empty_paths"),
            IssueType::EmptyPath => write!(f, "empty_path"),
            IssueType::InvalidViewBox => write!(f, "invalid_view_box"),
            IssueType::NegativeTiming => write!(f, "negative_timing"),
            IssueType::OutOfRange => write!(f, "out_of_range"),
            IssueType::UnknownProperty => write!(f, "unknown_property"),
        }
    }
}

/// A validation issue found in the document
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Dotted location of the offending value (e.g. `icons.arrow.paths`)
    pub path: String,
    pub severity: Severity,
    pub issue_type: IssueType,
    /// Human-readable message describing the issue
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { path: path.into(), severity: Severity::Error, issue_type, message: message.into() }
    }

    pub fn warning(
        path: impl Into<String>,
        issue_type: IssueType,
        message: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), severity: Severity::Warning, issue_type, message: message.into() }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { self.path.as_str() };
        write!(f, "{}: {} [{}] {}", self.severity, path, self.issue_type, self.message)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    /// True when no errors were found (warnings allowed)
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Validator collecting issues for one document
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Split the collected issues into a result.
    pub fn finish(self) -> ValidationResult {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.issues.into_iter().partition(|i| i.severity == Severity::Error);
        ValidationResult { valid: errors.is_empty(), errors, warnings }
    }

    /// Validate a whole configuration document
    pub fn validate_document(&mut self, document: &Value) {
        let Some(root) = document.as_object() else {
            self.issues.push(ValidationIssue::error(
                "",
                IssueType::WrongType,
                "Document must be a JSON object",
            ));
            return;
        };

        for key in root.keys().filter(|k| k.as_str() != "icons") {
            self.issues.push(ValidationIssue::error(
                key.as_str(),
                IssueType::UnknownProperty,
                format!("Unknown top-level property \"{}\"", key),
            ));
        }

        match root.get("icons") {
            None => self.issues.push(ValidationIssue::error(
                "icons",
                IssueType::MissingIcons,
                "Missing required \"icons\" object",
            )),
            Some(Value::Object(icons)) => {
                for (name, entry) in icons {
                    self.validate_icon(name, entry);
                }
            }
            Some(_) => self.issues.push(ValidationIssue::error(
                "icons",
                IssueType::WrongType,
                "\"icons\" must be an object",
            )),
        }
    }

    fn validate_icon(&mut self, name: &str, entry: &Value) {
        let at = format!("icons.{}", name);

        if !ICON_NAME.is_match(name) {
            self.issues.push(ValidationIssue::error(
                at.as_str(),
                IssueType::InvalidName,
                format!("Icon name \"{}\" must be lowercase and hyphen-separated", name),
            ));
        }

        let Some(entry) = entry.as_object() else {
            self.issues.push(ValidationIssue::error(
                at.as_str(),
                IssueType::WrongType,
                "Icon entry must be an object",
            ));
            return;
        };

        self.check_unknown_keys(&at, entry, &ENTRY_KEYS);
        self.validate_paths(&at, entry.get("paths"));

        match entry.get("viewBox") {
            None => {}
            Some(Value::String(view_box)) => {
                let numbers: Vec<&str> = view_box.split([' ', ',']).filter(|s| !s.is_empty()).collect();
                if numbers.len() != 4 || numbers.iter().any(|n| n.parse::<f64>().is_err()) {
                    self.issues.push(ValidationIssue::warning(
                        format!("{}.viewBox", at),
                        IssueType::InvalidViewBox,
                        format!("viewBox \"{}\" should be four numbers", view_box),
                    ));
                }
            }
            Some(_) => self.issues.push(ValidationIssue::error(
                format!("{}.viewBox", at),
                IssueType::WrongType,
                "viewBox must be a string",
            )),
        }

        match entry.get("layers") {
            None => {}
            Some(Value::Array(layers)) => {
                for (index, layer) in layers.iter().enumerate() {
                    self.validate_layer(&format!("{}.layers[{}]", at, index), layer);
                }
            }
            Some(_) => self.issues.push(ValidationIssue::error(
                format!("{}.layers", at),
                IssueType::WrongType,
                "layers must be an array",
            )),
        }
    }

    fn validate_paths(&mut self, at: &str, paths: Option<&Value>) {
        let at = format!("{}.paths", at);
        let paths = match paths {
            None => {
                self.issues.push(ValidationIssue::error(
                    at,
                    IssueType::MissingField,
                    "Missing required \"paths\" array",
                ));
                return;
            }
            Some(Value::Array(paths)) => paths,
            Some(_) => {
                self.issues.push(ValidationIssue::error(
                    at,
                    IssueType::WrongType,
                    "paths must be an array of strings",
                ));
                return;
            }
        };

        if paths.is_empty() {
            self.issues.push(ValidationIssue::error(
                at.as_str(),
                IssueType::EmptyPaths,
                "paths must contain at least one entry",
            ));
        }

        for (index, path) in paths.iter().enumerate() {
            match path {
                Value::String(d) if d.trim().is_empty() => {
                    self.issues.push(ValidationIssue::error(
                        format!("{}[{}]", at, index),
                        IssueType::EmptyPath,
                        "path data must not be empty",
                    ));
                }
                Value::String(_) => {}
                _ => self.issues.push(ValidationIssue::error(
                    format!("{}[{}]", at, index),
                    IssueType::WrongType,
                    "path data must be a string",
                )),
            }
        }
    }

    fn validate_layer(&mut self, at: &str, layer: &Value) {
        let Some(layer) = layer.as_object() else {
            self.issues.push(ValidationIssue::error(at, IssueType::WrongType, "layer must be an object"));
            return;
        };

        self.check_unknown_keys(at, layer, &LAYER_KEYS);

        for (key, value) in layer {
            if !LAYER_KEYS.contains(&key.as_str()) {
                continue;
            }
            let field = format!("{}.{}", at, key);
            let Some(number) = value.as_f64() else {
                self.issues.push(ValidationIssue::error(
                    field,
                    IssueType::WrongType,
                    format!("{} must be a number", key),
                ));
                continue;
            };

            if TIMING_KEYS.contains(&key.as_str()) && number < 0.0 {
                self.issues.push(ValidationIssue::error(
                    field,
                    IssueType::NegativeTiming,
                    format!("{} must not be negative (got {})", key, number),
                ));
            } else if key == "weight" && number <= 0.0 {
                self.issues.push(ValidationIssue::error(
                    field,
                    IssueType::OutOfRange,
                    format!("weight must be greater than 0 (got {})", number),
                ));
            } else if key == "opacity" && !(0.0..=1.0).contains(&number) {
                self.issues.push(ValidationIssue::error(
                    field,
                    IssueType::OutOfRange,
                    format!("opacity must be between 0 and 1 (got {})", number),
                ));
            }
        }
    }

    fn check_unknown_keys(&mut self, at: &str, object: &Map<String, Value>, known: &[&str]) {
        for key in object.keys().filter(|k| !known.contains(&k.as_str())) {
            self.issues.push(ValidationIssue::error(
                format!("{}.{}", at, key),
                IssueType::UnknownProperty,
                format!("Unknown property \"{}\"", key),
            ));
        }
    }
}

/// Validate an already-parsed configuration document.
pub fn validate_icon_config(document: &Value) -> ValidationResult {
    let mut validator = Validator::new();
    validator.validate_document(document);
    validator.finish()
}

/// Parse JSON/JSON5 text and validate it.
pub fn validate_icon_json(text: &str) -> ValidationResult {
    match json5::from_str::<Value>(text) {
        Ok(document) => validate_icon_config(&document),
        Err(e) => {
            let mut validator = Validator::new();
            validator.issues.push(ValidationIssue::error(
                "",
                IssueType::JsonSyntax,
                format!("Invalid JSON5: {}", e),
            ));
            validator.finish()
        }
    }
}
