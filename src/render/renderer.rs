//! Scene renderer: layout output to drawable primitives.
//!
//! Purely presentational. Each call to `render` builds a fresh scene and
//! replaces the previous one, so repeated renders never accumulate
//! primitives.

use std::f64::consts::PI;
use tracing::debug;

use super::config::RenderConfig;
use super::scene::{NodeTier, Primitive, Scene, TextAnchor};
use crate::hierarchy::Hierarchy;
use crate::layout::link::coord;
use crate::layout::{PositionedNode, RadialCurve, RadialLayout};

/// Renders a `RadialLayout` into a `Scene`.
pub struct SceneRenderer {
    config: RenderConfig,
    label_column: Option<String>,
    scene: Scene,
}

impl SceneRenderer {
    /// Create a renderer. `label_column` selects the record field used for
    /// label text (falling back to the id).
    pub fn new(config: RenderConfig, label_column: Option<String>) -> Self {
        Self {
            config,
            label_column,
            scene: Scene::new(),
        }
    }

    /// Create a renderer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RenderConfig::default(), None)
    }

    /// The renderer configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The most recently rendered scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Drop everything drawn so far.
    pub fn clear(&mut self) {
        self.scene = Scene::new();
    }

    /// Render the layout, replacing the previous scene.
    pub fn render(&mut self, hierarchy: &Hierarchy, layout: &RadialLayout) -> &Scene {
        let palette = &self.config.palette;
        let mut scene = Scene::new();

        scene.push(Primitive::Gradient {
            id: palette.link.id.clone(),
            rotation: palette.link.rotation,
            from: palette.link.from.clone(),
            to: palette.link.to.clone(),
        });

        let stroke = format!("url(#{})", palette.link.id);
        for link in layout.links() {
            let (Some(source), Some(target)) = (layout.node(link.source), layout.node(link.target))
            else {
                continue;
            };
            scene.push(Primitive::Link {
                source_id: hierarchy.node(link.source).id().to_string(),
                target_id: hierarchy.node(link.target).id().to_string(),
                d: RadialCurve::between(source, target).to_path_data(),
                stroke: stroke.clone(),
                stroke_opacity: self.config.link_opacity,
                stroke_width: self.config.link_width,
            });
        }

        let order = hierarchy.descendants();
        for &id in &order {
            let Some(positioned) = layout.node(id) else {
                continue;
            };
            let tier = tier_of(positioned);
            let fill = match tier {
                NodeTier::Root => &palette.node.root,
                NodeTier::Internal => &palette.node.internal,
                NodeTier::Leaf => &palette.node.leaf,
            };
            scene.push(Primitive::Node {
                node_id: hierarchy.node(id).id().to_string(),
                tier,
                transform: node_transform(positioned),
                center: positioned.point(),
                r: self.config.node_radius,
                fill: fill.clone(),
            });
        }

        for &id in &order {
            let Some(positioned) = layout.node(id) else {
                continue;
            };
            let node = hierarchy.node(id);
            let (x, anchor) = label_placement(positioned, self.config.label_offset);
            let fill = if positioned.is_leaf {
                &palette.text.leaf
            } else {
                &palette.text.internal
            };
            scene.push(Primitive::Label {
                node_id: node.id().to_string(),
                text: node.record.label(self.label_column.as_deref()).to_string(),
                transform: label_transform(positioned),
                x,
                dy: self.config.label_dy.clone(),
                anchor,
                fill: fill.clone(),
            });
        }

        debug!(
            primitives = scene.len(),
            links = layout.links().len(),
            collapsed = layout.is_collapsed(),
            "rendered scene"
        );

        self.scene = scene;
        &self.scene
    }
}

fn tier_of(node: &PositionedNode) -> NodeTier {
    if node.depth == 0 {
        NodeTier::Root
    } else if !node.is_leaf {
        NodeTier::Internal
    } else {
        NodeTier::Leaf
    }
}

/// `rotate(θ·180/π − 90) translate(r, 0)`.
pub fn node_transform(node: &PositionedNode) -> String {
    format!(
        "rotate({}) translate({},0)",
        coord(node.rotation_degrees()),
        coord(node.radius)
    )
}

/// Node transform plus a half turn on the left half so text stays upright.
pub fn label_transform(node: &PositionedNode) -> String {
    let flip = if node.angle >= PI { 180 } else { 0 };
    format!("{} rotate({flip})", node_transform(node))
}

/// Label offset and anchor so the text reads away from the node.
///
/// Leaves on the right half and internal nodes on the left half read
/// forwards from the node; the other two cases read backwards.
pub fn label_placement(node: &PositionedNode, offset: f64) -> (f64, TextAnchor) {
    if (node.angle < PI) == node.is_leaf {
        (offset, TextAnchor::Start)
    } else {
        (-offset, TextAnchor::End)
    }
}
