//! Presentational configuration.
//!
//! Passed to the renderer at construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Node fill colours by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePalette {
    pub root: String,
    pub internal: String,
    pub leaf: String,
}

impl Default for NodePalette {
    fn default() -> Self {
        Self {
            root: "#FF5C5C".to_string(),
            internal: "#FF6F76".to_string(),
            leaf: "#FF9398".to_string(),
        }
    }
}

/// Two-stop gradient applied to every link stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkGradient {
    /// Element id referenced as `url(#id)`.
    pub id: String,
    /// Colour at offset 0%.
    pub from: String,
    /// Colour at offset 100%.
    pub to: String,
    /// Gradient rotation in degrees.
    pub rotation: f64,
}

impl Default for LinkGradient {
    fn default() -> Self {
        Self {
            id: "linear-gradient".to_string(),
            from: "#FFFFFF".to_string(),
            to: "#FF5C5C".to_string(),
            rotation: 90.0,
        }
    }
}

/// Label colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPalette {
    pub internal: String,
    pub leaf: String,
}

impl Default for TextPalette {
    fn default() -> Self {
        Self {
            internal: "#0A131F".to_string(),
            leaf: "#142843".to_string(),
        }
    }
}

/// Every colour used by the chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub node: NodePalette,
    pub link: LinkGradient,
    pub text: TextPalette,
}

/// Configuration for the scene renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Circle radius of each node.
    pub node_radius: f64,
    /// Link stroke opacity.
    pub link_opacity: f64,
    /// Link stroke width.
    pub link_width: f64,
    /// Horizontal label offset from the node.
    pub label_offset: f64,
    /// Vertical label shift (SVG `dy`).
    pub label_dy: String,
    /// Colours.
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_radius: 2.5,
            link_opacity: 0.4,
            link_width: 1.5,
            label_offset: 6.0,
            label_dy: ".31em".to_string(),
            palette: Palette::default(),
        }
    }
}
