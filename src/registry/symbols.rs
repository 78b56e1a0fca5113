//! Shared symbol publisher.
//!
//! Owns one hidden `<svg aria-hidden="true"><defs>` container inserted as the
//! first child of the document body and keeps one `<symbol>` per registered
//! icon inside it, keyed by `id`.

use std::rc::Rc;

use crate::dom::{Document, Node, NodeRef};
use crate::models::IconDefinition;

/// Build the `<symbol>` element for a definition.
pub fn build_symbol(definition: &IconDefinition) -> NodeRef {
    let symbol = Node::create("symbol");
    {
        let mut s = symbol.borrow_mut();
        s.set_attribute("id", definition.name.as_str());
        s.set_attribute("viewBox", definition.view_box.as_str());
        for d in &definition.paths {
            let path = Node::create("path");
            path.borrow_mut().set_attribute("d", d.as_str());
            s.append_child(path);
        }
    }
    symbol
}

/// Lazily created hidden container plus symbol publishing.
#[derive(Debug)]
pub struct SymbolPublisher {
    document: Document,
    root: Option<NodeRef>,
    defs: Option<NodeRef>,
}

impl SymbolPublisher {
    pub fn new(document: Document) -> Self {
        Self { document, root: None, defs: None }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// True if both the hidden `<svg>` and its `<defs>` are still attached
    /// to the document.
    pub fn is_attached(&self) -> bool {
        let live = |node: &Option<NodeRef>| {
            node.as_ref().is_some_and(|node| self.document.contains(node))
        };
        live(&self.root) && live(&self.defs)
    }

    /// Return the live `<defs>` container, creating it if it was never built
    /// or has been detached. The flag is true when a new container was made.
    pub fn ensure_container(&mut self) -> (NodeRef, bool) {
        if let (true, Some(defs)) = (self.is_attached(), self.defs.as_ref()) {
            return (Rc::clone(defs), false);
        }
        // A root emptied by the host is stale; drop it before rebuilding.
        self.detach();

        let svg = Node::create("svg");
        let defs = Node::create("defs");
        {
            let mut s = svg.borrow_mut();
            s.set_attribute("aria-hidden", "true");
            s.set_attribute("width", "0");
            s.set_attribute("height", "0");
            s.set_style_property("display", "none");
            s.append_child(Rc::clone(&defs));
        }
        self.document.body().borrow_mut().insert_first(Rc::clone(&svg));

        self.root = Some(svg);
        self.defs = Some(Rc::clone(&defs));
        (defs, true)
    }

    /// Publish one symbol, replacing any symbol with the same id.
    pub fn publish(&mut self, definition: &IconDefinition) {
        let (defs, _) = self.ensure_container();
        let mut defs = defs.borrow_mut();
        if let Some(existing) = defs.child_by_id(&definition.name) {
            defs.remove_child(&existing);
        }
        defs.append_child(build_symbol(definition));
    }

    /// Publish several symbols with a single append to the container.
    pub fn publish_all<'a>(&mut self, definitions: impl IntoIterator<Item = &'a IconDefinition>) {
        let (defs, _) = self.ensure_container();
        let mut defs = defs.borrow_mut();
        let mut fragment = Vec::new();
        for definition in definitions {
            if let Some(existing) = defs.child_by_id(&definition.name) {
                defs.remove_child(&existing);
            }
            fragment.push(build_symbol(definition));
        }
        defs.append_fragment(fragment);
    }

    /// Look up a published symbol by icon name.
    pub fn symbol(&self, name: &str) -> Option<NodeRef> {
        self.defs.as_ref().and_then(|defs| defs.borrow().child_by_id(name))
    }

    /// Remove the container from the document and forget it.
    pub fn detach(&mut self) {
        if let Some(root) = self.root.take() {
            self.document.body().borrow_mut().remove_child(&root);
        }
        self.defs = None;
    }

    /// Markup of the hidden sprite sheet, if a container exists.
    pub fn markup(&self) -> Option<String> {
        self.root.as_ref().map(|root| root.borrow().to_markup())
    }
}
