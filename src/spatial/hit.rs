//! R-tree based hit testing using the rstar crate.
//!
//! The index holds the node markers of the last rendered scene in canvas
//! coordinates (origin top-left), so pointer offsets from the host can be
//! queried directly.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::render::Scene;

/// A rendered node marker, keyed by its record id.
#[derive(Debug, Clone, PartialEq)]
struct NodeMarker {
    record_id: String,
    position: [f64; 2],
}

impl RTreeObject for NodeMarker {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for NodeMarker {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over rendered node markers.
pub struct SpatialIndex {
    tree: RTree<NodeMarker>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Index every node marker in `scene`.
    ///
    /// Scene coordinates are relative to the tree root; `origin` is where the
    /// root sits on the canvas.
    pub fn rebuild(&mut self, scene: &Scene, origin: (f64, f64)) {
        let markers: Vec<NodeMarker> = scene
            .node_centers()
            .map(|(record_id, center)| NodeMarker {
                record_id: record_id.to_string(),
                position: [origin.0 + center.x, origin.1 + center.y],
            })
            .collect();

        self.tree = RTree::bulk_load(markers);
    }

    /// Record id of the marker nearest to (`x`, `y`), if it lies within
    /// `reach`.
    pub fn node_at(&self, x: f64, y: f64, reach: f64) -> Option<&str> {
        let point = [x, y];
        self.tree
            .nearest_neighbor(&point)
            .filter(|marker| marker.distance_2(&point) <= reach * reach)
            .map(|marker| marker.record_id.as_str())
    }

    /// Clear all markers from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of indexed markers.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{Hierarchy, Record};
    use crate::layout::ClusterLayout;
    use crate::render::SceneRenderer;

    /// root at the centre, `a` at angle 0 (straight up), `b` at π (down).
    fn index() -> SpatialIndex {
        let h = Hierarchy::from_records(vec![
            Record::root("root"),
            Record::child("a", "root"),
            Record::child("b", "root"),
        ])
        .unwrap();
        let layout = ClusterLayout::with_defaults().compute(&h).unwrap();
        let mut renderer = SceneRenderer::with_defaults();
        let mut index = SpatialIndex::new();
        index.rebuild(renderer.render(&h, &layout), (250.0, 250.0));
        index
    }

    #[test]
    fn test_rebuild_indexes_every_node() {
        assert_eq!(index().len(), 3);
    }

    #[test]
    fn test_node_at_uses_canvas_coordinates() {
        let index = index();
        assert_eq!(index.node_at(250.0, 250.0, 1.0), Some("root"));
        assert_eq!(index.node_at(251.0, 62.0, 3.0), Some("a"));
        assert_eq!(index.node_at(250.0, 438.0, 3.0), Some("b"));
    }

    #[test]
    fn test_node_at_respects_reach() {
        let index = index();
        assert_eq!(index.node_at(260.0, 200.0, 3.0), None);
        assert_eq!(index.node_at(255.0, 60.0, 4.0), None);
        assert_eq!(index.node_at(255.0, 60.0, 6.0), Some("a"));
    }

    #[test]
    fn test_clear() {
        let mut index = index();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.node_at(250.0, 250.0, 10.0), None);
    }
}
