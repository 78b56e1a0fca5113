//! WASM API module for browser/JS interop
//!
//! Exposes the shared icon registry and element rendering to JavaScript.
//! Every function works on the per-thread global registry.

use wasm_bindgen::prelude::*;

use crate::element::{Displayed, IconElement, RenderWarning};
use crate::host::Host;
use crate::icons::parse_icon_config;
use crate::models::RegisterOptions;
use crate::registry::IconRegistry;
use crate::validate::validate_icon_json as validate_document;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Outcome of a bulk registration.
#[wasm_bindgen]
pub struct RegisterResult {
    registered: usize,
    errors: Vec<String>,
}

#[wasm_bindgen]
impl RegisterResult {
    /// Number of icons in the accepted document
    #[wasm_bindgen(getter)]
    pub fn registered(&self) -> usize {
        self.registered
    }

    /// Parse or validation errors; empty on success
    #[wasm_bindgen(getter)]
    pub fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }
}

/// Markup of one rendered element.
#[wasm_bindgen]
pub struct IconMarkup {
    markup: String,
    placeholder: bool,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl IconMarkup {
    #[wasm_bindgen(getter)]
    pub fn markup(&self) -> String {
        self.markup.clone()
    }

    /// True when the icon was unknown and the placeholder was drawn
    #[wasm_bindgen(getter)]
    pub fn placeholder(&self) -> bool {
        self.placeholder
    }

    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}

/// Register one single-path icon.
///
/// An existing name is kept unless `overwrite` is set.
#[wasm_bindgen]
pub fn register_icon(name: &str, path_data: &str, view_box: Option<String>, overwrite: bool) {
    let options = RegisterOptions { view_box, overwrite };
    IconRegistry::global().register_with(name, path_data, options);
}

/// Register every icon of a JSON/JSON5 configuration document in one batch.
///
/// `registered` counts only new names. Names already in the registry keep
/// their first definition and are not counted.
#[wasm_bindgen]
pub fn register_icons_json(json: &str) -> RegisterResult {
    match parse_icon_config(json) {
        Ok(config) => {
            let registry = IconRegistry::global();
            let before = registry.len();
            registry.load_config(&config);
            RegisterResult { registered: registry.len() - before, errors: Vec::new() }
        }
        Err(e) => RegisterResult { registered: 0, errors: vec![e.to_string()] },
    }
}

/// Render a `<path-icon>` element for `name` and return its markup.
#[wasm_bindgen]
pub fn render_icon_markup(
    name: &str,
    size: Option<String>,
    color: Option<String>,
    animation: Option<String>,
    reduced_motion: bool,
) -> IconMarkup {
    let host = Host::with_reduced_motion(reduced_motion);
    let element = IconElement::new(&IconRegistry::global(), &host);
    element.set_attribute("icon", name);
    for (attribute, value) in [("size", size), ("color", color), ("animation", animation)] {
        if let Some(value) = value {
            element.set_attribute(attribute, &value);
        }
    }
    element.connected();

    let placeholder = matches!(element.displayed(), Displayed::Placeholder(_));
    let warnings = if placeholder {
        vec![RenderWarning::icon_not_found(name).message]
    } else {
        Vec::new()
    };
    let markup = element.to_markup();
    // Unsubscribes from late registration; this element is never mounted.
    element.disconnected();

    IconMarkup { markup, placeholder, warnings }
}

/// Markup of the hidden symbol sheet.
#[wasm_bindgen]
pub fn sprite_markup() -> String {
    IconRegistry::global().sprite_markup()
}

/// Registered icon names, sorted.
#[wasm_bindgen]
pub fn icon_names() -> Vec<String> {
    IconRegistry::global().names()
}

/// Validate a configuration document and return any errors/warnings.
///
/// # Returns
/// Array of validation messages (empty if valid)
#[wasm_bindgen]
pub fn validate_icon_json(json: &str) -> Vec<String> {
    let result = validate_document(json);
    result.errors.iter().chain(&result.warnings).map(|issue| issue.to_string()).collect()
}
