//! Markup construction for one render pass.
//!
//! Pure functions: they read attributes and a definition and produce
//! elements. Lifecycle and subscriptions live in the parent module.

use crate::dom::{Node, NodeRef};
use crate::models::IconDefinition;

use super::attributes::IconAttributes;

pub const VAR_SIZE: &str = "--pathicon-size";
pub const VAR_COLOR: &str = "--pathicon-color";
pub const VAR_DURATION: &str = "--pathicon-duration";
pub const VAR_DELAY: &str = "--pathicon-delay";
pub const VAR_STAGGER: &str = "--pathicon-stagger";
pub const VAR_ANIMATED: &str = "--pathicon-animated";
pub const VAR_LAYER_DURATION: &str = "--pathicon-layer-duration";
pub const VAR_LAYER_DELAY: &str = "--pathicon-layer-delay";

/// Normalized length every path is drawn with.
pub const PATH_LENGTH: &str = "100";
/// Dash offset with the stroke fully hidden.
pub const DASH_HIDDEN: &str = "100";
/// Dash offset with the stroke fully drawn.
pub const DASH_REVEALED: &str = "0";

/// Stroke width and opacity, cycled by path index (thin/faint to bold/opaque).
pub const LAYER_STEPS: [(f64, f64); 3] = [(1.0, 0.4), (1.5, 0.7), (2.0, 1.0)];

const PLACEHOLDER_VIEW_BOX: &str = "0 0 24 24";
const PLACEHOLDER_PATHS: [&str; 2] = ["M9.1 9a3 3 0 0 1 5.8 1c0 2-3 3-3 3", "M12 17h.01"];

/// What a render pass left visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Displayed {
    /// No icon name set
    #[default]
    Empty,
    /// Named icon not registered (yet)
    Placeholder(String),
    /// Named icon rendered
    Icon(String),
}

/// A non-fatal diagnostic from a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderWarning {
    pub message: String,
}

impl RenderWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn icon_not_found(name: &str) -> Self {
        Self::new(format!("Icon '{}' not found in registry", name))
    }
}

/// Publish sizing, timing and animation variables on the host element.
pub fn publish_variables(host: &mut Node, attrs: &IconAttributes, animated: bool) {
    host.set_style_property(VAR_SIZE, attrs.size.as_str());
    host.set_style_property(VAR_COLOR, attrs.color.as_str());
    host.set_style_property(VAR_DURATION, attrs.duration.as_str());
    host.set_style_property(VAR_DELAY, attrs.delay.as_str());
    host.set_style_property(VAR_STAGGER, attrs.stagger.as_str());
    host.set_style_property(VAR_ANIMATED, if animated { "1" } else { "0" });
}

fn format_number(value: f64) -> String {
    // 1.0 -> "1", 1.5 -> "1.5"
    format!("{}", value)
}

/// Stroke width and opacity for the path at `index`.
///
/// Layer metadata on the definition wins over the repeating 3-step cycle.
pub fn path_weight(definition: &IconDefinition, index: usize) -> (String, String) {
    let (width, opacity) = LAYER_STEPS[index % LAYER_STEPS.len()];
    let layer = definition.layer(index);
    let width = layer.and_then(|l| l.weight).unwrap_or(width);
    let opacity = layer.and_then(|l| l.opacity).unwrap_or(opacity);
    (format_number(width), format_number(opacity))
}

/// CSS transition for the path at `index`: base delay plus `index` staggers.
pub fn path_transition(index: usize) -> String {
    format!(
        "stroke-dashoffset var({ld}, var({d})) ease calc(var({lde}, var({de})) + var({s}) * {i})",
        ld = VAR_LAYER_DURATION,
        d = VAR_DURATION,
        lde = VAR_LAYER_DELAY,
        de = VAR_DELAY,
        s = VAR_STAGGER,
        i = index
    )
}

fn svg_root(view_box: &str, attrs: &IconAttributes, label: &str) -> NodeRef {
    let svg = Node::create("svg");
    {
        let mut s = svg.borrow_mut();
        s.set_attribute("viewBox", view_box);
        s.set_attribute("fill", "none");
        s.set_attribute("stroke", attrs.color.as_str());
        s.set_attribute("stroke-linecap", "round");
        s.set_attribute("stroke-linejoin", "round");
        s.set_attribute("role", "img");
        s.set_attribute("aria-label", label);
        s.set_style_property("width", format!("var({})", VAR_SIZE));
        s.set_style_property("height", format!("var({})", VAR_SIZE));
    }
    svg
}

/// Build the `<svg>` for a registered icon.
///
/// Returns the root plus the path elements in definition order. Paths start
/// hidden (`100`) only when the draw-in animation is enabled. Static icons
/// start drawn (`0`), since nothing would ever reveal them otherwise.
pub fn build_icon(
    definition: &IconDefinition,
    attrs: &IconAttributes,
    animated: bool,
) -> (NodeRef, Vec<NodeRef>) {
    let svg = svg_root(&definition.view_box, attrs, &definition.name);
    let initial_offset = if animated { DASH_HIDDEN } else { DASH_REVEALED };

    let mut paths = Vec::with_capacity(definition.paths.len());
    for (index, d) in definition.paths.iter().enumerate() {
        let path = Node::create("path");
        {
            let mut p = path.borrow_mut();
            let (width, opacity) = path_weight(definition, index);
            p.set_attribute("d", d.as_str());
            p.set_attribute("pathLength", PATH_LENGTH);
            p.set_attribute("stroke-width", width);
            p.set_attribute("data-layer", index.to_string());
            p.set_style_property("opacity", opacity);
            p.set_style_property("stroke-dasharray", PATH_LENGTH);
            p.set_style_property("stroke-dashoffset", initial_offset);
            p.set_style_property("transition", path_transition(index));

            if let Some(timing) = attrs.layer_timing(index) {
                if let Some(duration) = &timing.duration {
                    p.set_style_property(VAR_LAYER_DURATION, duration.as_str());
                }
                if let Some(delay) = &timing.delay {
                    p.set_style_property(VAR_LAYER_DELAY, delay.as_str());
                }
            }
        }
        svg.borrow_mut().append_child(path.clone());
        paths.push(path);
    }

    (svg, paths)
}

/// Build the fixed square-with-question-mark placeholder glyph.
pub fn build_placeholder(attrs: &IconAttributes, missing: &str) -> NodeRef {
    let svg = svg_root(PLACEHOLDER_VIEW_BOX, attrs, "missing icon");
    {
        let mut s = svg.borrow_mut();
        s.set_attribute("data-placeholder", missing);
        s.set_attribute("stroke-width", "1.5");

        let frame = Node::create("rect");
        {
            let mut r = frame.borrow_mut();
            r.set_attribute("x", "3");
            r.set_attribute("y", "3");
            r.set_attribute("width", "18");
            r.set_attribute("height", "18");
            r.set_attribute("rx", "2");
        }
        s.append_child(frame);

        for d in PLACEHOLDER_PATHS {
            let path = Node::create("path");
            path.borrow_mut().set_attribute("d", d);
            s.append_child(path);
        }
    }
    svg
}
