//! Radial cluster layout.
//!
//! Places a `Hierarchy` on concentric circles: angle from the left-to-right
//! order of the leaves, radius from depth.
//!
//! # Algorithm Overview
//!
//! 1. **Post-order walk:** each leaf gets a linear position `x` equal to the
//!    previous leaf's `x` plus the separation between the two. Each internal
//!    node gets the mean `x` of its children.
//! 2. **Wrap gap:** the gap between the last and first leaf is the mean of the
//!    two separations in either direction, so the circle closes with the same
//!    spacing rules as every other pair of neighbours.
//! 3. **Coordinate transform:** `angle = x / (x_last + wrap) * 2π`, so the first
//!    leaf sits at angle 0 and the gaps sum to exactly one turn.
//!    `radius = depth * max_radius / max_depth`.
//!
//! Separation between neighbouring leaves `a` (the later one) and `b` is
//! `siblings / depth(a)` when they share a parent and `cousins / depth(a)`
//! otherwise, so families are grouped and the spacing narrows further from
//! the centre.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, instrument};

use super::link::{Link, Point, point_radial};
use crate::error::InvalidGeometryError;
use crate::hierarchy::{Hierarchy, NodeId, TreeNode};

/// Leaf separation factors, before depth scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separation {
    /// Gap between leaves that share a parent.
    pub siblings: f64,
    /// Gap between leaves under different parents.
    pub cousins: f64,
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            siblings: 1.0,
            cousins: 5.0,
        }
    }
}

impl Separation {
    /// Separation between neighbouring leaves, scaled by the depth of `a`.
    pub fn between(&self, a: &TreeNode, b: &TreeNode) -> f64 {
        let base = if a.parent == b.parent {
            self.siblings
        } else {
            self.cousins
        };
        base / a.depth as f64
    }

    fn is_valid(&self) -> bool {
        self.siblings.is_finite()
            && self.cousins.is_finite()
            && self.siblings > 0.0
            && self.cousins > 0.0
    }
}

/// Configuration for the radial cluster layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterConfig {
    /// Radius of the outermost ring.
    pub max_radius: f64,
    /// Leaf separation factors.
    pub separation: Separation,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        // min(500, 400) / 2 - 10
        Self {
            max_radius: 190.0,
            separation: Separation::default(),
        }
    }
}

/// A tree node with its polar position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedNode {
    /// Node in the source hierarchy.
    pub id: NodeId,
    /// Angle in radians, in [0, 2π). 0 points up; angles grow clockwise.
    pub angle: f64,
    /// Distance from the centre.
    pub radius: f64,
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Whether the node has no children.
    pub is_leaf: bool,
}

impl PositionedNode {
    /// Angle in degrees, rotated so that 0 radians points up.
    ///
    /// This is the rotation used by `rotate(..) translate(radius, 0)`.
    pub fn rotation_degrees(&self) -> f64 {
        self.angle.to_degrees() - 90.0
    }

    /// Cartesian position relative to the centre.
    pub fn point(&self) -> Point {
        point_radial(self.angle, self.radius)
    }
}

/// Output of the layout: one positioned node per tree node, one link per edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    /// Positioned nodes indexed by `NodeId`.
    nodes: Vec<PositionedNode>,
    /// Parent-child links in breadth-first order of the child.
    links: Vec<Link>,
    /// True when geometry was degenerate and every node sits at the origin.
    collapsed: bool,
}

impl RadialLayout {
    /// Single-point layout: every node at angle 0, radius 0.
    pub fn collapsed(hierarchy: &Hierarchy) -> Self {
        let nodes = hierarchy
            .iter()
            .map(|(id, node)| PositionedNode {
                id,
                angle: 0.0,
                radius: 0.0,
                depth: node.depth,
                is_leaf: node.is_leaf(),
            })
            .collect();
        Self {
            nodes,
            links: links_of(hierarchy),
            collapsed: true,
        }
    }

    /// Get the positioned node for a tree node.
    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.get(id.index())
    }

    /// All positioned nodes, indexed by `NodeId`.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// All parent-child links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Whether this is the single-point fallback.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the layout has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The radial cluster layout engine.
pub struct ClusterLayout {
    config: ClusterConfig,
}

impl ClusterLayout {
    /// Create a new cluster layout with the given configuration.
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Create a cluster layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ClusterConfig::default())
    }

    /// The layout configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Compute the layout.
    ///
    /// Fails with `InvalidGeometryError` instead of producing non-finite
    /// coordinates: a tree with no depth, a bad radius or bad separation
    /// factors. Callers can fall back to `RadialLayout::collapsed`.
    #[instrument(skip_all, fields(nodes = hierarchy.len()))]
    pub fn compute(&self, hierarchy: &Hierarchy) -> Result<RadialLayout, InvalidGeometryError> {
        let max_radius = self.config.max_radius;
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(InvalidGeometryError::InvalidRadius(max_radius));
        }
        let separation = self.config.separation;
        if !separation.is_valid() {
            return Err(InvalidGeometryError::InvalidSeparation {
                siblings: separation.siblings,
                cousins: separation.cousins,
            });
        }
        let max_depth = hierarchy.max_depth();
        if max_depth == 0 {
            return Err(InvalidGeometryError::ZeroDepth);
        }

        // Linear positions, leaves left to right
        let mut x = vec![0.0f64; hierarchy.len()];
        let mut previous_leaf: Option<NodeId> = None;
        let mut cursor = 0.0f64;
        for id in hierarchy.post_order() {
            let node = hierarchy.node(id);
            if node.is_leaf() {
                if let Some(prev) = previous_leaf {
                    cursor += separation.between(node, hierarchy.node(prev));
                }
                x[id.index()] = cursor;
                previous_leaf = Some(id);
            } else {
                let sum: f64 = node.children.iter().map(|c| x[c.index()]).sum();
                x[id.index()] = sum / node.children.len() as f64;
            }
        }

        let leaves = hierarchy.leaves();
        let (Some(&first), Some(&last)) = (leaves.first(), leaves.last()) else {
            return Err(InvalidGeometryError::ZeroDepth);
        };
        let first_node = hierarchy.node(first);
        let last_node = hierarchy.node(last);
        let wrap = (separation.between(first_node, last_node)
            + separation.between(last_node, first_node))
            / 2.0;
        let span = x[last.index()] + wrap;

        let ring = max_radius / max_depth as f64;
        let nodes: Vec<PositionedNode> = hierarchy
            .iter()
            .map(|(id, node)| PositionedNode {
                id,
                angle: x[id.index()] / span * TAU,
                radius: node.depth as f64 * ring,
                depth: node.depth,
                is_leaf: node.is_leaf(),
            })
            .collect();

        debug!(leaves = leaves.len(), span, max_depth, "computed radial cluster layout");

        Ok(RadialLayout {
            nodes,
            links: links_of(hierarchy),
            collapsed: false,
        })
    }
}

fn links_of(hierarchy: &Hierarchy) -> Vec<Link> {
    hierarchy
        .edges()
        .into_iter()
        .map(|(source, target)| Link { source, target })
        .collect()
}
