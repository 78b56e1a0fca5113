//! Minimal retained element tree standing in for the host document.
//!
//! Only what the registry and the icon element need is modelled: elements
//! with attributes, inline style properties and children, a document body,
//! containment checks and markup serialization. Everything is single-threaded
//! and shared through `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;

/// Shared handle to an element.
pub type NodeRef = Rc<RefCell<Node>>;

/// An element in the tree.
#[derive(Debug, Default)]
pub struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    children: Vec<NodeRef>,
    /// Number of child-list mutations (append, insert, remove, clear)
    child_mutations: u64,
}

impl Node {
    /// Create a detached element.
    pub fn create(tag: impl Into<String>) -> NodeRef {
        Rc::new(RefCell::new(Node { tag: tag.into(), ..Default::default() }))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn set_style_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.style.insert(name.into(), value.into());
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn child_mutations(&self) -> u64 {
        self.child_mutations
    }

    pub fn append_child(&mut self, child: NodeRef) {
        self.children.push(child);
        self.child_mutations += 1;
    }

    /// Append several children as a single mutation (a document fragment).
    pub fn append_fragment(&mut self, fragment: Vec<NodeRef>) {
        if fragment.is_empty() {
            return;
        }
        self.children.extend(fragment);
        self.child_mutations += 1;
    }

    pub fn insert_first(&mut self, child: NodeRef) {
        self.children.insert(0, child);
        self.child_mutations += 1;
    }

    /// Remove a direct child. Returns false if `child` was not a child.
    pub fn remove_child(&mut self, child: &NodeRef) -> bool {
        let before = self.children.len();
        self.children.retain(|c| !Rc::ptr_eq(c, child));
        let removed = self.children.len() != before;
        if removed {
            self.child_mutations += 1;
        }
        removed
    }

    /// Remove every child. Calling this on an empty element is a no-op.
    pub fn clear_children(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.children.clear();
        self.child_mutations += 1;
    }

    /// Find a direct child by `id` attribute.
    pub fn child_by_id(&self, id: &str) -> Option<NodeRef> {
        self.children.iter().find(|c| c.borrow().id() == Some(id)).cloned()
    }

    /// Serialize this element and its subtree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
        }
        if !self.style.is_empty() {
            let style: Vec<String> =
                self.style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            let _ = write!(out, " style=\"{}\"", escape_attribute(&style.join("; ")));
        }

        // Custom elements and HTML containers never self-close
        let self_closing = self.children.is_empty() && !self.tag.contains('-') && self.tag != "body";
        if self_closing {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.borrow().write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// True if `target` is `root` or one of its descendants.
pub fn contains(root: &NodeRef, target: &NodeRef) -> bool {
    if Rc::ptr_eq(root, target) {
        return true;
    }
    root.borrow().children.iter().any(|child| contains(child, target))
}

/// The host document. Cloning yields another handle to the same tree.
#[derive(Debug, Clone)]
pub struct Document {
    body: NodeRef,
}

impl Document {
    pub fn new() -> Self {
        Self { body: Node::create("body") }
    }

    pub fn body(&self) -> NodeRef {
        Rc::clone(&self.body)
    }

    /// Liveness check: is `node` attached anywhere under the body?
    pub fn contains(&self, node: &NodeRef) -> bool {
        contains(&self.body, node)
    }

    pub fn to_markup(&self) -> String {
        self.body.borrow().to_markup()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_serialization() {
        let svg = Node::create("svg");
        svg.borrow_mut().set_attribute("viewBox", "0 0 24 24");
        let path = Node::create("path");
        path.borrow_mut().set_attribute("d", "M1 1");
        path.borrow_mut().set_style_property("opacity", "0.4");
        svg.borrow_mut().append_child(path);

        assert_eq!(
            svg.borrow().to_markup(),
            r#"<svg viewBox="0 0 24 24"><path d="M1 1" style="opacity: 0.4"/></svg>"#
        );
    }

    #[test]
    fn test_custom_element_never_self_closes() {
        let el = Node::create("path-icon");
        assert_eq!(el.borrow().to_markup(), "<path-icon></path-icon>");
    }

    #[test]
    fn test_attribute_escaping() {
        let el = Node::create("g");
        el.borrow_mut().set_attribute("data-x", "a<\"b\">&c");
        assert_eq!(el.borrow().to_markup(), r#"<g data-x="a&lt;&quot;b&quot;&gt;&amp;c"/>"#);
    }

    #[test]
    fn test_document_contains_nested() {
        let doc = Document::new();
        let outer = Node::create("svg");
        let inner = Node::create("defs");
        outer.borrow_mut().append_child(Rc::clone(&inner));
        doc.body().borrow_mut().append_child(Rc::clone(&outer));

        assert!(doc.contains(&outer));
        assert!(doc.contains(&inner));

        doc.body().borrow_mut().remove_child(&outer);
        assert!(!doc.contains(&outer));
        assert!(!doc.contains(&inner));
    }

    #[test]
    fn test_fragment_append_is_one_mutation() {
        let parent = Node::create("defs");
        parent.borrow_mut().append_fragment(vec![Node::create("symbol"), Node::create("symbol")]);
        assert_eq!(parent.borrow().children().len(), 2);
        assert_eq!(parent.borrow().child_mutations(), 1);

        parent.borrow_mut().append_fragment(Vec::new());
        assert_eq!(parent.borrow().child_mutations(), 1);
    }

    #[test]
    fn test_clear_children_idempotent() {
        let parent = Node::create("path-icon");
        parent.borrow_mut().clear_children();
        assert_eq!(parent.borrow().child_mutations(), 0);

        parent.borrow_mut().append_child(Node::create("svg"));
        parent.borrow_mut().clear_children();
        parent.borrow_mut().clear_children();
        assert!(parent.borrow().children().is_empty());
        assert_eq!(parent.borrow().child_mutations(), 2);
    }

    #[test]
    fn test_child_by_id() {
        let defs = Node::create("defs");
        let symbol = Node::create("symbol");
        symbol.borrow_mut().set_attribute("id", "star");
        defs.borrow_mut().append_child(Rc::clone(&symbol));

        let found = defs.borrow().child_by_id("star").expect("should find symbol");
        assert!(Rc::ptr_eq(&found, &symbol));
        assert!(defs.borrow().child_by_id("moon").is_none());
    }
}
