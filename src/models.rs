//! Data models for icon definitions and icon configuration documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ViewBox used when a definition does not specify one.
pub const DEFAULT_VIEW_BOX: &str = "0 0 24 24";

fn default_view_box() -> String {
    DEFAULT_VIEW_BOX.to_string()
}

/// Per-layer styling and timing metadata.
///
/// Timing values are milliseconds, matching the JSON configuration format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stagger: Option<f64>,
}

/// A named icon: ordered path data plus a viewBox and optional layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IconDefinition {
    pub name: String,
    pub paths: Vec<String>,
    #[serde(rename = "viewBox", default = "default_view_box")]
    pub view_box: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layers: Option<Vec<LayerConfig>>,
}

impl IconDefinition {
    /// Create a definition with the default viewBox and no layer metadata.
    pub fn new(name: impl Into<String>, paths: Vec<String>) -> Self {
        Self { name: name.into(), paths, view_box: default_view_box(), layers: None }
    }

    /// Set the viewBox.
    pub fn with_view_box(mut self, view_box: impl Into<String>) -> Self {
        self.view_box = view_box.into();
        self
    }

    /// Attach layer metadata.
    pub fn with_layers(mut self, layers: Vec<LayerConfig>) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Layer metadata for the path at `index`, if any was configured.
    pub fn layer(&self, index: usize) -> Option<&LayerConfig> {
        self.layers.as_ref().and_then(|layers| layers.get(index))
    }
}

/// Options accepted by single-icon registration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterOptions {
    pub view_box: Option<String>,
    /// Replace an existing definition instead of keeping the first one.
    pub overwrite: bool,
}

impl RegisterOptions {
    pub fn view_box(view_box: impl Into<String>) -> Self {
        Self { view_box: Some(view_box.into()), overwrite: false }
    }

    pub fn overwrite() -> Self {
        Self { view_box: None, overwrite: true }
    }
}

/// One entry of a batch registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchEntry {
    pub name: String,
    pub paths: Vec<String>,
    #[serde(rename = "viewBox", skip_serializing_if = "Option::is_none", default)]
    pub view_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layers: Option<Vec<LayerConfig>>,
    #[serde(default)]
    pub overwrite: bool,
}

impl BatchEntry {
    pub fn new(name: impl Into<String>, paths: Vec<String>) -> Self {
        Self { name: name.into(), paths, view_box: None, layers: None, overwrite: false }
    }

    pub fn with_view_box(mut self, view_box: impl Into<String>) -> Self {
        self.view_box = Some(view_box.into());
        self
    }

    pub fn into_definition(self) -> IconDefinition {
        IconDefinition {
            name: self.name,
            paths: self.paths,
            view_box: self.view_box.unwrap_or_else(default_view_box),
            layers: self.layers,
        }
    }
}

/// A single icon entry of a configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IconEntry {
    pub paths: Vec<String>,
    #[serde(rename = "viewBox", skip_serializing_if = "Option::is_none", default)]
    pub view_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layers: Option<Vec<LayerConfig>>,
}

/// An icon configuration document: `{ "icons": { "<name>": { ... } } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct IconConfig {
    pub icons: BTreeMap<String, IconEntry>,
}

impl IconConfig {
    /// Convert the document into batch entries, ordered by icon name.
    pub fn to_batch(&self) -> Vec<BatchEntry> {
        self.icons
            .iter()
            .map(|(name, entry)| BatchEntry {
                name: name.clone(),
                paths: entry.paths.clone(),
                view_box: entry.view_box.clone(),
                layers: entry.layers.clone(),
                overwrite: false,
            })
            .collect()
    }

    /// Merge another document into this one. Existing names are kept.
    pub fn merge(&mut self, other: IconConfig) {
        for (name, entry) in other.icons {
            self.icons.entry(name).or_insert(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_definition_default_view_box() {
        let def = IconDefinition::new("arrow", vec!["M5 12h14".to_string()]);
        assert_eq!(def.view_box, "0 0 24 24");
        assert!(def.layers.is_none());
        assert!(def.layer(0).is_none());
    }

    #[test]
    fn test_icon_definition_deserialize_view_box_key() {
        let def: IconDefinition = serde_json::from_str(
            r#"{"name": "x", "paths": ["M0 0L1 1"], "viewBox": "0 0 100 100"}"#,
        )
        .expect("should parse definition");
        assert_eq!(def.view_box, "0 0 100 100");

        let def: IconDefinition = serde_json::from_str(r#"{"name": "x", "paths": []}"#)
            .expect("should parse definition without viewBox");
        assert_eq!(def.view_box, DEFAULT_VIEW_BOX);
    }

    #[test]
    fn test_batch_entry_into_definition() {
        let def = BatchEntry::new("a", vec!["M1 1".to_string()]).into_definition();
        assert_eq!(def.view_box, DEFAULT_VIEW_BOX);

        let def = BatchEntry::new("b", vec!["M1 1".to_string()])
            .with_view_box("0 0 48 48")
            .into_definition();
        assert_eq!(def.view_box, "0 0 48 48");
    }

    #[test]
    fn test_icon_config_to_batch_is_sorted() {
        let config: IconConfig = serde_json::from_str(
            r#"{"icons": {"zeta": {"paths": ["M1 1"]}, "alpha": {"paths": ["M2 2"], "viewBox": "0 0 10 10"}}}"#,
        )
        .expect("should parse config");

        let batch = config.to_batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].name, "alpha");
        assert_eq!(batch[0].view_box.as_deref(), Some("0 0 10 10"));
        assert_eq!(batch[1].name, "zeta");
        assert!(!batch[1].overwrite);
    }

    #[test]
    fn test_icon_config_merge_keeps_first() {
        let mut first: IconConfig =
            serde_json::from_str(r#"{"icons": {"a": {"paths": ["M1 1"]}}}"#).expect("parse");
        let second: IconConfig = serde_json::from_str(
            r#"{"icons": {"a": {"paths": ["M9 9"]}, "b": {"paths": ["M2 2"]}}}"#,
        )
        .expect("parse");

        first.merge(second);
        assert_eq!(first.icons["a"].paths, vec!["M1 1".to_string()]);
        assert!(first.icons.contains_key("b"));
    }

    #[test]
    fn test_layer_config_rejects_unknown_fields() {
        let result: Result<LayerConfig, _> = serde_json::from_str(r#"{"speed": 2}"#);
        assert!(result.is_err());
    }
}
