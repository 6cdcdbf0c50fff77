//! Drawable primitives.
//!
//! A `Scene` is the complete output of one render pass, in paint order:
//! gradient definition, links, node circles, labels. Coordinates are relative
//! to the chart centre; the host translates by `(width / 2, height / 2)`.

use serde::Serialize;

use crate::layout::Point;

/// Horizontal alignment of a label relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value.
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

/// Node tier used for fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTier {
    Root,
    Internal,
    Leaf,
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// Linear gradient definition shared by all links.
    #[serde(rename_all = "camelCase")]
    Gradient {
        id: String,
        rotation: f64,
        from: String,
        to: String,
    },
    /// Curve from a parent to a child.
    #[serde(rename_all = "camelCase")]
    Link {
        source_id: String,
        target_id: String,
        d: String,
        stroke: String,
        stroke_opacity: f64,
        stroke_width: f64,
    },
    /// Node marker.
    #[serde(rename_all = "camelCase")]
    Node {
        node_id: String,
        tier: NodeTier,
        transform: String,
        center: Point,
        r: f64,
        fill: String,
    },
    /// Node label.
    #[serde(rename_all = "camelCase")]
    Label {
        node_id: String,
        text: String,
        transform: String,
        x: f64,
        dy: String,
        anchor: TextAnchor,
        fill: String,
    },
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Node markers with their ids and centres, for hit testing.
    pub fn node_centers(&self) -> impl Iterator<Item = (&str, Point)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Node { node_id, center, .. } => Some((node_id.as_str(), *center)),
            _ => None,
        })
    }

    /// Count primitives matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| predicate(p)).count()
    }
}
