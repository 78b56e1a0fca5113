//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm
//! Or for native: see tests in src/wasm.rs (run with cargo test --features wasm)

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use pathicon::wasm::{
    icon_names, register_icon, register_icons_json, render_icon_markup, sprite_markup,
    validate_icon_json,
};

const ICON_SET: &str = r#"{
    icons: {
        "arrow-right": { paths: ["M5 12h14", "m12 5 7 7-7 7"] },
        circle: { paths: ["M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20"], viewBox: "0 0 24 24" },
    },
}"#;

// ============================================================================
// Registration
// ============================================================================

#[wasm_bindgen_test]
fn test_register_json5_document() {
    let result = register_icons_json(r#"{ icons: { "wasm-left": { paths: ["M19 12H5"] }, "wasm-up": { paths: ["M12 19V5"] } } }"#);
    assert!(result.errors().is_empty(), "errors: {:?}", result.errors());
    assert_eq!(result.registered(), 2);

    let names = icon_names();
    assert!(names.contains(&"wasm-left".to_string()));
    assert!(names.contains(&"wasm-up".to_string()));
}

#[wasm_bindgen_test]
fn test_register_counts_only_new_names() {
    register_icons_json(ICON_SET);
    let result = register_icons_json(ICON_SET);
    assert!(result.errors().is_empty());
    assert_eq!(result.registered(), 0);
}

#[wasm_bindgen_test]
fn test_register_rejects_invalid_document() {
    let result = register_icons_json(r#"{"icons": {"x": {"paths": "M0 0"}}}"#);
    assert_eq!(result.registered(), 0);
    assert_eq!(result.errors().len(), 1);
}

#[wasm_bindgen_test]
fn test_register_single_icon_first_wins() {
    register_icon("wasm-dot", "M12 12h.01", None, false);
    register_icon("wasm-dot", "M0 0", None, false);
    let markup = sprite_markup();
    assert!(markup.contains("M12 12h.01"));
    assert!(!markup.contains(r#"d="M0 0""#));
}

// ============================================================================
// Rendering
// ============================================================================

#[wasm_bindgen_test]
fn test_render_registered_icon() {
    register_icons_json(ICON_SET);
    let rendered =
        render_icon_markup("arrow-right", None, Some("teal".to_string()), Some("hover".to_string()), false);

    assert!(!rendered.placeholder());
    assert!(rendered.markup().contains("--pathicon-color: teal"));
    assert!(rendered.markup().contains("--pathicon-animated: 1"));
}

#[wasm_bindgen_test]
fn test_render_with_reduced_motion() {
    register_icons_json(ICON_SET);
    let rendered = render_icon_markup("circle", None, None, Some("hover".to_string()), true);
    assert!(rendered.markup().contains("--pathicon-animated: 0"));
}

#[wasm_bindgen_test]
fn test_render_missing_icon() {
    let rendered = render_icon_markup("does-not-exist", None, None, None, false);
    assert!(rendered.placeholder());
    assert_eq!(rendered.warnings().len(), 1);
    assert!(rendered.markup().contains(r#"aria-label="missing icon""#));
}

// ============================================================================
// Validation
// ============================================================================

#[wasm_bindgen_test]
fn test_validate_valid_document() {
    assert!(validate_icon_json(ICON_SET).is_empty());
}

#[wasm_bindgen_test]
fn test_validate_syntax_error() {
    let messages = validate_icon_json("{ icons: ");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("json_syntax"));
}
