//! Observed attributes of the icon element and the `layers` mini-format.

use crate::dom::Node;

/// Attributes whose changes re-render the element.
pub const OBSERVED_ATTRIBUTES: [&str; 8] =
    ["icon", "size", "color", "animation", "duration", "delay", "stagger", "layers"];

pub fn is_observed(name: &str) -> bool {
    OBSERVED_ATTRIBUTES.contains(&name)
}

/// Animation trigger requested through the `animation` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    #[default]
    None,
    Hover,
}

impl AnimationMode {
    /// Anything other than `hover` means no animation.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("hover") => AnimationMode::Hover,
            _ => AnimationMode::None,
        }
    }
}

/// Fallback values for unset attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDefaults {
    pub size: String,
    pub color: String,
    pub duration: String,
    pub delay: String,
    pub stagger: String,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            size: "24px".to_string(),
            color: "currentColor".to_string(),
            duration: "0.6s".to_string(),
            delay: "0s".to_string(),
            stagger: "0.1s".to_string(),
        }
    }
}

/// One `name:duration:delay` tuple of the `layers` attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerTiming {
    pub name: String,
    pub duration: Option<String>,
    pub delay: Option<String>,
}

impl LayerTiming {
    /// Tuples with fewer than two fields carry no timing.
    pub fn has_timing(&self) -> bool {
        self.duration.is_some() || self.delay.is_some()
    }
}

fn non_empty(part: Option<&str>) -> Option<String> {
    part.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse `bg:2s:0.1s,fg:1s` into ordered layer timings.
///
/// Never fails: empty tuples are skipped and missing fields stay `None`.
pub fn parse_layers(raw: &str) -> Vec<LayerTiming> {
    raw.split(',')
        .map(str::trim)
        .filter(|tuple| !tuple.is_empty())
        .map(|tuple| {
            let mut parts = tuple.split(':');
            LayerTiming {
                name: parts.next().unwrap_or_default().trim().to_string(),
                duration: non_empty(parts.next()),
                delay: non_empty(parts.next()),
            }
        })
        .collect()
}

/// Attribute values read fresh for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct IconAttributes {
    pub icon: Option<String>,
    pub size: String,
    pub color: String,
    pub animation: AnimationMode,
    pub duration: String,
    pub delay: String,
    pub stagger: String,
    pub layers: Vec<LayerTiming>,
}

impl IconAttributes {
    /// Read every observed attribute from `node`, falling back to `defaults`.
    ///
    /// The first layer tuple's duration/delay replace the element-level
    /// values; later tuples only apply to their own path.
    pub fn read(node: &Node, defaults: &RenderDefaults) -> Self {
        let text = |name: &str| non_empty(node.attribute(name));

        let layers = node.attribute("layers").map(parse_layers).unwrap_or_default();
        let mut duration = text("duration").unwrap_or_else(|| defaults.duration.clone());
        let mut delay = text("delay").unwrap_or_else(|| defaults.delay.clone());

        if let Some(first) = layers.first() {
            if let Some(d) = &first.duration {
                duration = d.clone();
            }
            if let Some(d) = &first.delay {
                delay = d.clone();
            }
        }

        Self {
            icon: text("icon"),
            size: text("size").unwrap_or_else(|| defaults.size.clone()),
            color: text("color").unwrap_or_else(|| defaults.color.clone()),
            animation: AnimationMode::parse(node.attribute("animation")),
            duration,
            delay,
            stagger: text("stagger").unwrap_or_else(|| defaults.stagger.clone()),
            layers,
        }
    }

    /// Timing override for the path at `index`, from the matching tuple.
    ///
    /// Index 0 is already folded into the element-level variables.
    pub fn layer_timing(&self, index: usize) -> Option<&LayerTiming> {
        if index == 0 {
            return None;
        }
        self.layers.get(index).filter(|l| l.has_timing())
    }
}
