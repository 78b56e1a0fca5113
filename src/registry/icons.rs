//! The icon registry: definition store, shared symbols and late-registration
//! signal behind one shared handle.

use std::cell::RefCell;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::dom::{Document, NodeRef};
use crate::host::Host;
use crate::models::{BatchEntry, IconConfig, IconDefinition, RegisterOptions};

use super::notifier::LateRegistrationNotifier;
use super::store::IconStore;
use super::symbols::SymbolPublisher;
use super::traits::Registry;

#[derive(Debug)]
struct RegistryState {
    store: IconStore,
    symbols: SymbolPublisher,
}

impl RegistryState {
    /// Liveness check. A recreated container gets every stored symbol again.
    fn ensure_container(&mut self) -> NodeRef {
        let (defs, fresh) = self.symbols.ensure_container();
        if fresh && !self.store.is_empty() {
            log::debug!(
                "symbol container recreated, republishing {} icons",
                self.store.len()
            );
            let definitions = self.store.sorted();
            self.symbols.publish_all(definitions);
        }
        defs
    }
}

/// Shared icon registry.
///
/// Cloning yields another handle to the same registry. Registration is
/// expected from a single logical writer (typically app startup); concurrent
/// writers only get last-writer-wins under `overwrite`.
///
/// # Example
///
/// ```
/// use pathicon::dom::Document;
/// use pathicon::registry::IconRegistry;
///
/// let registry = IconRegistry::new(&Document::new());
/// registry.register("minus", "M5 12h14");
///
/// assert!(registry.has("minus"));
/// assert_eq!(registry.get("minus").map(|d| d.paths), Some(vec!["M5 12h14".to_string()]));
/// ```
#[derive(Debug, Clone)]
pub struct IconRegistry {
    state: Rc<RefCell<RegistryState>>,
    notifier: Rc<LateRegistrationNotifier>,
}

thread_local! {
    static GLOBAL_REGISTRY: OnceCell<IconRegistry> = const { OnceCell::new() };
}

impl IconRegistry {
    /// Create an isolated registry publishing into `document`.
    pub fn new(document: &Document) -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                store: IconStore::new(),
                symbols: SymbolPublisher::new(document.clone()),
            })),
            notifier: Rc::new(LateRegistrationNotifier::new()),
        }
    }

    /// The registry for the current thread's host, created on first use.
    pub fn global() -> IconRegistry {
        GLOBAL_REGISTRY
            .with(|cell| cell.get_or_init(|| IconRegistry::new(Host::current().document())).clone())
    }

    /// Register a single-path icon with the default viewBox.
    pub fn register(&self, name: &str, path_data: &str) {
        self.register_with(name, path_data, RegisterOptions::default());
    }

    /// Register a single-path icon.
    ///
    /// An existing name is left untouched unless `options.overwrite` is set,
    /// in which case definition and symbol are both replaced.
    pub fn register_with(&self, name: &str, path_data: &str, options: RegisterOptions) {
        let mut definition = IconDefinition::new(name, vec![path_data.to_string()]);
        if let Some(view_box) = options.view_box {
            definition.view_box = view_box;
        }

        let mut state = self.state.borrow_mut();
        state.ensure_container();

        if state.store.contains(name) && !options.overwrite {
            log::debug!("icon '{}' already registered, keeping first definition", name);
            return;
        }

        state.symbols.publish(&definition);
        state.store.replace(definition);
        log::debug!("registered icon '{}'", name);
    }

    /// Register several icons, publishing their symbols in one append and
    /// raising the late-registration signal once afterwards.
    pub fn register_batch(&self, entries: impl IntoIterator<Item = BatchEntry>) {
        let entries: Vec<BatchEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            state.ensure_container();

            let mut accepted: Vec<IconDefinition> = Vec::new();
            for entry in entries {
                let taken = state.store.contains(&entry.name)
                    || accepted.iter().any(|d| d.name == entry.name);
                if taken && !entry.overwrite {
                    log::debug!("icon '{}' already registered, skipping batch entry", entry.name);
                    continue;
                }
                let definition = entry.into_definition();
                accepted.retain(|d| d.name != definition.name);
                accepted.push(definition);
            }

            state.symbols.publish_all(&accepted);
            log::debug!("batch registered {} icons", accepted.len());
            for definition in accepted {
                state.store.replace(definition);
            }
        }

        // Borrow released: subscribers re-render and read the registry
        self.notifier.notify();
    }

    /// Register every icon of a validated configuration document as a batch.
    pub fn load_config(&self, config: &IconConfig) {
        self.register_batch(config.to_batch());
    }

    /// Look up a definition. Absence is an expected outcome, not an error.
    pub fn get(&self, name: &str) -> Option<IconDefinition> {
        let mut state = self.state.borrow_mut();
        state.ensure_container();
        state.store.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.ensure_container();
        state.store.contains(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut names: Vec<String> = state.store.names().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.state.borrow().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The live shared `<defs>` container, recreated if it was detached.
    pub fn symbol_container(&self) -> NodeRef {
        self.state.borrow_mut().ensure_container()
    }

    /// The published `<symbol>` for a name.
    pub fn symbol(&self, name: &str) -> Option<NodeRef> {
        let mut state = self.state.borrow_mut();
        state.ensure_container();
        state.symbols.symbol(name)
    }

    /// Markup of the hidden sprite sheet holding every published symbol.
    pub fn sprite_markup(&self) -> String {
        let mut state = self.state.borrow_mut();
        state.ensure_container();
        state.symbols.markup().unwrap_or_default()
    }

    pub fn notifier(&self) -> &LateRegistrationNotifier {
        &self.notifier
    }

    pub fn document(&self) -> Document {
        self.state.borrow().symbols.document().clone()
    }

    /// Clear every definition, the container and pending subscriptions.
    ///
    /// Meant for test isolation only.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.store.clear();
        state.symbols.detach();
        self.notifier.clear();
    }
}
