//! Icon registry and its parts.
//!
//! This module provides:
//! - A unified `Registry` trait for name-keyed stores
//! - `IconStore` holding icon definitions
//! - `SymbolPublisher` maintaining the hidden shared `<symbol>` container
//! - `LateRegistrationNotifier`, the one-shot signal raised after batches
//! - `IconRegistry`, the shared handle composing all of the above
//!
//! Registering a name twice keeps the first definition unless the caller
//! asks to overwrite.

mod icons;
mod notifier;
mod store;
mod symbols;
mod traits;

pub use icons::IconRegistry;
pub use notifier::{LateRegistrationNotifier, SubscriptionId};
pub use store::IconStore;
pub use symbols::{build_symbol, SymbolPublisher};
pub use traits::Registry;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::models::{BatchEntry, IconConfig, LayerConfig, RegisterOptions};
    use std::cell::Cell;
    use std::rc::Rc;

    fn registry() -> (Document, IconRegistry) {
        let doc = Document::new();
        let registry = IconRegistry::new(&doc);
        (doc, registry)
    }

    fn entry(name: &str, paths: &[&str]) -> BatchEntry {
        BatchEntry::new(name, paths.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn test_register_then_get() {
        let (_doc, registry) = registry();
        registry.register("test-icon", "M10 10 L20 20");

        let icon = registry.get("test-icon").expect("should be registered");
        assert_eq!(icon.paths, vec!["M10 10 L20 20".to_string()]);
        assert_eq!(icon.view_box, "0 0 24 24");
    }

    #[test]
    fn test_register_custom_view_box() {
        let (_doc, registry) = registry();
        registry.register_with("x-icon", "M10 10 L90 90", RegisterOptions::view_box("0 0 100 100"));

        assert_eq!(registry.get("x-icon").map(|d| d.view_box), Some("0 0 100 100".to_string()));
        let symbol = registry.symbol("x-icon").expect("symbol should be published");
        assert_eq!(symbol.borrow().attribute("viewBox"), Some("0 0 100 100"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let (_doc, registry) = registry();
        registry.register("test-icon", "M10 10 L20 20");
        registry.register("test-icon", "M0 0 L5 5");

        let icon = registry.get("test-icon").expect("should be registered");
        assert_eq!(icon.paths, vec!["M10 10 L20 20".to_string()]);
        assert_eq!(registry.symbol_container().borrow().children().len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_definition_and_symbol() {
        let (_doc, registry) = registry();
        registry.register("test-icon", "M10 10 L20 20");
        registry.register_with("test-icon", "M0 0 L5 5", RegisterOptions::overwrite());

        let icon = registry.get("test-icon").expect("should be registered");
        assert_eq!(icon.paths, vec!["M0 0 L5 5".to_string()]);

        let defs = registry.symbol_container();
        assert_eq!(defs.borrow().children().len(), 1);
        let symbol = registry.symbol("test-icon").expect("symbol should exist");
        let symbol = symbol.borrow();
        assert_eq!(symbol.children()[0].borrow().attribute("d"), Some("M0 0 L5 5"));
    }

    #[test]
    fn test_has_before_and_after() {
        let (_doc, registry) = registry();
        assert!(!registry.has("arrow"));
        registry.register("arrow", "M5 12h14");
        assert!(registry.has("arrow"));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let (doc, registry) = registry();
        registry.register_batch(Vec::new());

        assert!(registry.is_empty());
        assert_eq!(registry.notifier().notifications(), 0);
        // The container is not even created
        assert!(doc.body().borrow().children().is_empty());
    }

    #[test]
    fn test_batch_registers_all_and_notifies_once() {
        let (_doc, registry) = registry();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        registry.notifier().subscribe_once(move || counter.set(counter.get() + 1));

        registry.register_batch(vec![entry("a", &["M1 1"]), entry("b", &["M2 2", "M3 3"])]);

        assert!(registry.has("a"));
        assert!(registry.has("b"));
        assert_eq!(registry.notifier().notifications(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_batch_single_append() {
        let (_doc, registry) = registry();
        let defs = registry.symbol_container();
        let before = defs.borrow().child_mutations();

        registry.register_batch(vec![entry("a", &["M1 1"]), entry("b", &["M2 2"]), entry("c", &["M3 3"])]);

        assert_eq!(defs.borrow().children().len(), 3);
        assert_eq!(defs.borrow().child_mutations(), before + 1);
    }

    #[test]
    fn test_batch_respects_first_writer() {
        let (_doc, registry) = registry();
        registry.register("a", "M1 1");
        registry.register_batch(vec![entry("a", &["M9 9"]), entry("b", &["M2 2"]), entry("b", &["M8 8"])]);

        assert_eq!(registry.get("a").map(|d| d.paths), Some(vec!["M1 1".to_string()]));
        assert_eq!(registry.get("b").map(|d| d.paths), Some(vec!["M2 2".to_string()]));
        assert_eq!(registry.symbol_container().borrow().children().len(), 2);
    }

    #[test]
    fn test_batch_overwrite_entry() {
        let (_doc, registry) = registry();
        registry.register("a", "M1 1");
        let mut replacement = entry("a", &["M9 9"]);
        replacement.overwrite = true;
        registry.register_batch(vec![replacement]);

        assert_eq!(registry.get("a").map(|d| d.paths), Some(vec!["M9 9".to_string()]));
        assert_eq!(registry.symbol_container().borrow().children().len(), 1);
    }

    #[test]
    fn test_batch_keeps_layers() {
        let (_doc, registry) = registry();
        let mut layered = entry("check", &["M20 6L9 17l-5-5"]);
        layered.layers = Some(vec![LayerConfig { weight: Some(2.0), ..Default::default() }]);
        registry.register_batch(vec![layered]);

        let def = registry.get("check").expect("registered");
        assert_eq!(def.layer(0).and_then(|l| l.weight), Some(2.0));
    }

    #[test]
    fn test_detached_container_recreated() {
        let (doc, registry) = registry();
        registry.register("a", "M1 1");
        let original = registry.symbol_container();

        // Host removes the hidden svg
        let root = doc.body().borrow().children()[0].clone();
        doc.body().borrow_mut().remove_child(&root);

        assert!(registry.has("a"));
        let recreated = registry.symbol_container();
        assert!(!Rc::ptr_eq(&original, &recreated));
        assert!(doc.contains(&recreated));
        assert!(registry.get("a").is_some());
        // Stored definitions are republished into the new container
        assert!(registry.symbol("a").is_some());
    }

    #[test]
    fn test_emptied_svg_container_recreated() {
        let (doc, registry) = registry();
        registry.register("a", "M1 1");
        let original = registry.symbol_container();

        // Host empties the hidden svg, leaving the svg itself in place
        doc.body().borrow().children()[0].borrow_mut().clear_children();

        registry.register("b", "M2 2");
        let recreated = registry.symbol_container();
        assert!(!Rc::ptr_eq(&original, &recreated));
        assert!(doc.contains(&recreated));
        assert_eq!(doc.body().borrow().children().len(), 1);
        assert!(registry.symbol("a").is_some());
        assert!(registry.symbol("b").is_some());

        let markup = registry.sprite_markup();
        assert!(markup.contains(r#"<symbol id="a""#));
        assert!(markup.contains(r#"<symbol id="b""#));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (doc, registry) = registry();
        registry.register("a", "M1 1");
        registry.notifier().subscribe_once(|| {});

        registry.reset();

        assert!(registry.is_empty());
        assert_eq!(registry.notifier().pending(), 0);
        assert!(doc.body().borrow().children().is_empty());
        assert!(!registry.has("a"));
    }

    #[test]
    fn test_load_config() {
        let (_doc, registry) = registry();
        let config: IconConfig = serde_json::from_str(
            r#"{"icons": {"arrow-right": {"paths": ["M5 12h14", "M12 5l7 7-7 7"], "viewBox": "0 0 24 24"}}}"#,
        )
        .expect("should parse config");

        registry.load_config(&config);
        assert_eq!(registry.names(), vec!["arrow-right".to_string()]);
        assert_eq!(registry.notifier().notifications(), 1);
    }

    #[test]
    fn test_sprite_markup() {
        let (_doc, registry) = registry();
        registry.register("dot", "M12 12h.01");
        let markup = registry.sprite_markup();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"<symbol id="dot" viewBox="0 0 24 24"><path d="M12 12h.01"/></symbol>"#));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = IconRegistry::global();
        let b = IconRegistry::global();
        a.reset();
        a.register("shared", "M1 1");
        assert!(b.has("shared"));
        b.reset();
        assert!(!a.has("shared"));
    }
}
