//! The `<path-icon>` element and its render state machine.
//!
//! Every render pass is a pure function of the observed attributes plus the
//! reduced-motion flag. Five things trigger one: mount, attribute changes,
//! late registration, reduced-motion changes, and (for styling only) hover.
//!
//! Exactly one of icon, placeholder or nothing is visible after a pass.
//!
//! # Example
//!
//! ```
//! use pathicon::element::{Displayed, IconElement};
//! use pathicon::host::Host;
//! use pathicon::registry::IconRegistry;
//!
//! let host = Host::new();
//! let registry = IconRegistry::new(host.document());
//! registry.register("minus", "M5 12h14");
//!
//! let element = IconElement::new(&registry, &host);
//! element.set_attribute("icon", "minus");
//! element.connected();
//!
//! assert_eq!(element.displayed(), Displayed::Icon("minus".to_string()));
//! ```

mod attributes;
mod render;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::{Node, NodeRef};
use crate::host::{Host, MediaListener};
use crate::registry::{IconRegistry, SubscriptionId};

pub use attributes::{
    is_observed, parse_layers, AnimationMode, IconAttributes, LayerTiming, RenderDefaults,
    OBSERVED_ATTRIBUTES,
};
pub use render::{
    build_icon, build_placeholder, path_transition, path_weight, publish_variables, Displayed,
    RenderWarning, DASH_HIDDEN, DASH_REVEALED, LAYER_STEPS, PATH_LENGTH, VAR_ANIMATED, VAR_COLOR,
    VAR_DELAY, VAR_DURATION, VAR_LAYER_DELAY, VAR_LAYER_DURATION, VAR_SIZE, VAR_STAGGER,
};

/// Tag name of the element.
pub const TAG_NAME: &str = "path-icon";

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderOutcome {
    pub displayed: Displayed,
    pub warnings: Vec<RenderWarning>,
}

struct ElementState {
    node: NodeRef,
    registry: IconRegistry,
    defaults: RenderDefaults,
    reduced_motion: bool,
    /// Pending late-registration subscription; `Some` means waiting
    awaiting: Option<SubscriptionId>,
    connected: bool,
    hover_wired: bool,
    paths: Vec<NodeRef>,
    displayed: Displayed,
    render_count: usize,
    motion_listener: Option<MediaListener>,
}

impl Drop for ElementState {
    fn drop(&mut self) {
        if let Some(id) = self.awaiting.take() {
            self.registry.notifier().unsubscribe(id);
        }
    }
}

/// Handle to one icon element instance. Clones share the instance.
#[derive(Clone)]
pub struct IconElement {
    state: Rc<RefCell<ElementState>>,
}

impl IconElement {
    /// Create an unmounted element with the standard defaults.
    pub fn new(registry: &IconRegistry, host: &Host) -> Self {
        Self::with_defaults(registry, host, RenderDefaults::default())
    }

    /// Create an unmounted element with custom attribute defaults.
    ///
    /// Subscribes to the host's reduced-motion query; the subscription is
    /// released when the last handle is dropped.
    pub fn with_defaults(registry: &IconRegistry, host: &Host, defaults: RenderDefaults) -> Self {
        let query = host.reduced_motion();
        let state = Rc::new(RefCell::new(ElementState {
            node: Node::create(TAG_NAME),
            registry: registry.clone(),
            defaults,
            reduced_motion: query.matches(),
            awaiting: None,
            connected: false,
            hover_wired: false,
            paths: Vec::new(),
            displayed: Displayed::Empty,
            render_count: 0,
            motion_listener: None,
        }));

        let weak = Rc::downgrade(&state);
        let listener = query.add_listener(move |reduced| {
            if let Some(state) = weak.upgrade() {
                let element = IconElement { state };
                element.set_reduced_motion(reduced);
            }
        });
        state.borrow_mut().motion_listener = Some(listener);

        Self { state }
    }

    /// The host element node.
    pub fn node(&self) -> NodeRef {
        Rc::clone(&self.state.borrow().node)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().node.borrow().attribute(name).map(str::to_string)
    }

    /// Set an attribute and run the change callback.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let old = {
            let state = self.state.borrow();
            let mut node = state.node.borrow_mut();
            let old = node.attribute(name).map(str::to_string);
            node.set_attribute(name, value);
            old
        };
        self.attribute_changed(name, old.as_deref(), Some(value));
    }

    /// Remove an attribute and run the change callback.
    pub fn remove_attribute(&self, name: &str) {
        let old = {
            let state = self.state.borrow();
            let removed = state.node.borrow_mut().remove_attribute(name);
            removed
        };
        if old.is_some() {
            self.attribute_changed(name, old.as_deref(), None);
        }
    }

    /// Attribute change callback. Re-renders for observed attributes whose
    /// value actually changed, once mounted.
    ///
    /// Hosts fire this on every set, including a set to the current value.
    /// Such calls leave the rendered output untouched and are skipped.
    pub fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
        if !is_observed(name) || old == new {
            return;
        }
        if self.is_connected() {
            self.render();
        }
    }

    /// Mount callback: enables hover handling and renders. Hover handlers are
    /// not tied to render passes.
    pub fn connected(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.connected = true;
            state.hover_wired = true;
        }
        self.render();
    }

    /// Unmount callback: drops any pending late-registration subscription.
    pub fn disconnected(&self) {
        let mut state = self.state.borrow_mut();
        state.connected = false;
        if let Some(id) = state.awaiting.take() {
            state.registry.notifier().unsubscribe(id);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    pub fn reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn set_reduced_motion(&self, reduced: bool) {
        let connected = {
            let mut state = self.state.borrow_mut();
            state.reduced_motion = reduced;
            state.connected
        };
        if connected {
            self.render();
        }
    }

    /// True while a placeholder waits for its icon to be registered.
    pub fn is_awaiting_registration(&self) -> bool {
        let state = self.state.borrow();
        state.awaiting.is_some_and(|id| state.registry.notifier().is_pending(id))
    }

    pub fn displayed(&self) -> Displayed {
        self.state.borrow().displayed.clone()
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> usize {
        self.state.borrow().render_count
    }

    /// Rendered path elements, in definition order.
    pub fn paths(&self) -> Vec<NodeRef> {
        self.state.borrow().paths.clone()
    }

    /// Host-visible style variable.
    pub fn style_variable(&self, name: &str) -> Option<String> {
        self.state.borrow().node.borrow().style_property(name).map(str::to_string)
    }

    pub fn to_markup(&self) -> String {
        self.state.borrow().node.borrow().to_markup()
    }

    /// Run one render pass.
    pub fn render(&self) -> RenderOutcome {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        state.render_count += 1;

        let attrs = IconAttributes::read(&state.node.borrow(), &state.defaults);
        let animated = !state.reduced_motion && attrs.animation != AnimationMode::None;
        log::trace!("render pass {} for {:?}", state.render_count, attrs.icon);

        let mut node = state.node.borrow_mut();
        publish_variables(&mut node, &attrs, animated);
        node.clear_children();
        state.paths.clear();

        let Some(name) = attrs.icon.clone() else {
            state.displayed = Displayed::Empty;
            return RenderOutcome::default();
        };

        match state.registry.get(&name) {
            Some(definition) => {
                if let Some(id) = state.awaiting.take() {
                    state.registry.notifier().unsubscribe(id);
                }
                let (svg, paths) = build_icon(&definition, &attrs, animated);
                node.append_child(svg);
                state.paths = paths;
                state.displayed = Displayed::Icon(name);
                RenderOutcome { displayed: state.displayed.clone(), warnings: Vec::new() }
            }
            None => {
                node.append_child(build_placeholder(&attrs, &name));
                let warning = RenderWarning::icon_not_found(&name);
                log::warn!("{}", warning.message);

                // A registry reset drops subscriptions without telling us
                if state.awaiting.is_some_and(|id| !state.registry.notifier().is_pending(id)) {
                    state.awaiting = None;
                }
                if state.awaiting.is_none() {
                    let weak: Weak<RefCell<ElementState>> = Rc::downgrade(&self.state);
                    let id = state.registry.notifier().subscribe_once(move || {
                        if let Some(state) = weak.upgrade() {
                            state.borrow_mut().awaiting = None;
                            IconElement { state }.render();
                        }
                    });
                    state.awaiting = Some(id);
                }

                state.displayed = Displayed::Placeholder(name);
                RenderOutcome { displayed: state.displayed.clone(), warnings: vec![warning] }
            }
        }
    }

    /// Pointer entered the element: draw every path in.
    ///
    /// Does nothing unless hover animation is requested, and never animates
    /// under reduced motion.
    pub fn pointer_enter(&self) {
        self.set_dash_offset(DASH_REVEALED, true);
    }

    /// Pointer left the element: hide every path again.
    pub fn pointer_leave(&self) {
        self.set_dash_offset(DASH_HIDDEN, false);
    }

    fn set_dash_offset(&self, offset: &str, entering: bool) {
        let state = self.state.borrow();
        if !state.hover_wired {
            return;
        }
        let mode = AnimationMode::parse(state.node.borrow().attribute("animation"));
        if mode != AnimationMode::Hover || state.reduced_motion {
            return;
        }
        log::trace!("pointer {}", if entering { "enter" } else { "leave" });
        for path in &state.paths {
            path.borrow_mut().set_style_property("stroke-dashoffset", offset);
        }
    }
}

impl std::fmt::Debug for IconElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("IconElement")
            .field("displayed", &state.displayed)
            .field("connected", &state.connected)
            .field("reduced_motion", &state.reduced_motion)
            .field("awaiting", &state.awaiting.is_some())
            .field("render_count", &state.render_count)
            .finish()
    }
}
