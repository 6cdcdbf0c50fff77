//! ChartEngine - the render pipeline and its dataset snapshot.
//!
//! `csv text -> records -> Hierarchy -> RadialLayout -> Scene`
//!
//! All errors are handled here, before a primitive is emitted:
//! - Data load and malformed hierarchy errors abort the pass, clear the scene
//!   and leave a user-visible status message.
//! - Invalid geometry falls back to a single-point layout.

use tracing::{info, instrument, warn};

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::hierarchy::{Hierarchy, Record, parse_records};
use crate::layout::{ClusterLayout, RadialLayout};
use crate::overlay::{ContactForm, NodeClick, OverlayEvent, OverlayState};
use crate::render::{Scene, SceneRenderer};
use crate::spatial::SpatialIndex;

/// Owns the current dataset and everything derived from it.
pub struct ChartEngine {
    config: ChartConfig,
    layout_engine: ClusterLayout,
    renderer: SceneRenderer,
    form: ContactForm,
    spatial: SpatialIndex,
    hierarchy: Option<Hierarchy>,
    layout: Option<RadialLayout>,
    status: Option<String>,
}

impl ChartEngine {
    /// Create a chart with the given configuration. Nothing is drawn until
    /// data is loaded.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            layout_engine: ClusterLayout::new(config.layout.clone()),
            renderer: SceneRenderer::new(
                config.render.clone(),
                config.columns.label_column.clone(),
            ),
            form: ContactForm::new(config.trigger_id.clone()),
            spatial: SpatialIndex::new(),
            hierarchy: None,
            layout: None,
            status: None,
            config,
        }
    }

    /// Create a chart with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ChartConfig::default())
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parse CSV text and render it.
    ///
    /// On failure the error is also recorded as the status message and the
    /// scene is left empty.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn load_csv(&mut self, text: &str) -> Result<(), ChartError> {
        let records = match parse_records(text, &self.config.columns) {
            Ok(records) => records,
            Err(error) => {
                let error = ChartError::from(error);
                self.record_failure(&error);
                return Err(error);
            }
        };
        self.load_records(records)
    }

    /// Build, lay out and render a set of records.
    pub fn load_records(&mut self, records: Vec<Record>) -> Result<(), ChartError> {
        match Hierarchy::from_records(records) {
            Ok(hierarchy) => {
                self.hierarchy = Some(hierarchy);
                self.status = None;
                self.rerender();
                Ok(())
            }
            Err(error) => {
                let error = ChartError::from(error);
                self.record_failure(&error);
                Err(error)
            }
        }
    }

    /// Surface a failure: keep a user-visible message and draw nothing.
    pub fn record_failure(&mut self, error: &ChartError) {
        warn!(%error, kind = error.kind(), "render pass failed");
        self.status = Some(error.user_message());
        self.hierarchy = None;
        self.layout = None;
        self.renderer.clear();
        self.spatial.clear();
    }

    /// Recompute layout and scene from the current snapshot.
    ///
    /// Calling this repeatedly yields the same scene.
    pub fn rerender(&mut self) {
        let Some(hierarchy) = &self.hierarchy else {
            return;
        };

        let layout = match self.layout_engine.compute(hierarchy) {
            Ok(layout) => layout,
            Err(error) => {
                warn!(%error, "invalid geometry, collapsing layout to a single point");
                RadialLayout::collapsed(hierarchy)
            }
        };

        let scene = self.renderer.render(hierarchy, &layout);
        self.spatial.rebuild(scene, self.config.centre());

        info!(
            nodes = layout.len(),
            primitives = scene.len(),
            collapsed = layout.is_collapsed(),
            "chart rendered"
        );
        self.layout = Some(layout);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The current scene (empty before a successful load).
    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    /// The current hierarchy, if a load succeeded.
    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.hierarchy.as_ref()
    }

    /// The current layout, if a load succeeded.
    pub fn layout(&self) -> Option<&RadialLayout> {
        self.layout.as_ref()
    }

    /// Message describing the last failure, cleared by a successful load.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The contact form overlay.
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// The current scene as an SVG document.
    pub fn to_svg(&self) -> String {
        self.scene().to_svg(self.config.width, self.config.height)
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Record id of the node drawn at canvas position (`x`, `y`), within the
    /// node radius plus the configured hit tolerance.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
        let reach = self.config.render.node_radius + self.config.hit_tolerance;
        self.spatial.node_at(x, y, reach)
    }

    /// Handle a pointer click at canvas position (`x`, `y`).
    ///
    /// `page_x`/`page_y` are the page coordinates used to place the form.
    /// Clicks that miss every node leave the overlay unchanged.
    pub fn click_at(&mut self, x: f64, y: f64, page_x: f64, page_y: f64) -> OverlayState {
        match self.node_at(x, y).map(str::to_string) {
            Some(node_id) => self.click_node(&node_id, page_x, page_y),
            None => self.form.state(),
        }
    }

    /// Handle a click on the node with record id `node_id`.
    pub fn click_node(&mut self, node_id: &str, page_x: f64, page_y: f64) -> OverlayState {
        self.form.handle(&OverlayEvent::NodeClicked(NodeClick {
            node_id: node_id.to_string(),
            pointer_x: page_x,
            pointer_y: page_y,
        }))
    }

    /// Hide the contact form.
    pub fn dismiss_form(&mut self) -> OverlayState {
        self.form.dismiss()
    }
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Primitive;

    const CSV: &str = "id,parentId\nroot,\nindustry1,root\nindustry2,root\ncompany1,industry1\ncompany2,industry1\ncompany3,industry2\n";

    #[test]
    fn test_load_renders_scene() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();

        assert_eq!(chart.hierarchy().unwrap().len(), 6);
        assert_eq!(chart.scene().count(|p| matches!(p, Primitive::Node { .. })), 6);
        assert!(chart.status().is_none());
    }

    #[test]
    fn test_rerender_does_not_duplicate() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();
        let once = chart.scene().clone();
        chart.rerender();
        chart.rerender();
        assert_eq!(chart.scene().len(), once.len());
        assert_eq!(chart.scene(), &once);
    }

    #[test]
    fn test_malformed_hierarchy_draws_nothing() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();

        let err = chart.load_csv("id,parentId\na,\nb,\n").unwrap_err();
        assert!(matches!(err, ChartError::MalformedHierarchy(_)));
        assert!(chart.scene().is_empty());
        assert!(chart.hierarchy().is_none());
        assert!(chart.status().unwrap().starts_with("malformed hierarchy"));
    }

    #[test]
    fn test_data_load_error_is_surfaced() {
        let mut chart = ChartEngine::with_defaults();
        let err = chart.load_csv("name\nroot\n").unwrap_err();
        assert!(matches!(err, ChartError::DataLoad(_)));
        assert_eq!(chart.status(), Some("data load error: missing required column: id"));
        assert!(chart.scene().is_empty());
    }

    #[test]
    fn test_successful_load_clears_status() {
        let mut chart = ChartEngine::with_defaults();
        let _ = chart.load_csv("id,parentId\n");
        assert!(chart.status().is_some());
        chart.load_csv(CSV).unwrap();
        assert!(chart.status().is_none());
    }

    #[test]
    fn test_single_node_collapses_without_nan() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv("id,parentId\nsolo,\n").unwrap();

        let layout = chart.layout().unwrap();
        assert!(layout.is_collapsed());
        for node in layout.nodes() {
            assert!(node.angle.is_finite() && node.radius.is_finite());
        }
        assert!(!chart.to_svg().contains("NaN"));
    }

    #[test]
    fn test_zero_radius_falls_back_to_collapsed_layout() {
        let mut config = ChartConfig::default();
        config.layout.max_radius = 0.0;
        let mut chart = ChartEngine::new(config);
        chart.load_csv(CSV).unwrap();

        let layout = chart.layout().unwrap();
        assert!(layout.is_collapsed());
        assert!(layout.nodes().iter().all(|n| n.radius == 0.0 && n.angle == 0.0));
        assert_eq!(chart.scene().count(|p| matches!(p, Primitive::Node { .. })), 6);
    }

    #[test]
    fn test_click_designated_node_opens_form() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();

        let state = chart.click_node("industry2", 50.0, 50.0);
        assert_eq!(state, OverlayState::Hidden);

        let state = chart.click_node("industry1", 50.0, 50.0);
        assert_eq!(state, OverlayState::Visible { left: 60.0, top: 40.0 });

        assert_eq!(chart.dismiss_form(), OverlayState::Hidden);
    }

    #[test]
    fn test_click_at_hits_rendered_node() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();

        let hierarchy = chart.hierarchy().unwrap();
        let trigger = hierarchy.find("industry1").unwrap();
        let p = chart.layout().unwrap().node(trigger).unwrap().point();
        let (cx, cy) = chart.config().centre();

        let state = chart.click_at(cx + p.x + 1.0, cy + p.y, 300.0, 200.0);
        assert_eq!(state, OverlayState::Visible { left: 310.0, top: 190.0 });
    }

    #[test]
    fn test_node_at_finds_rendered_marker() {
        let mut chart = ChartEngine::with_defaults();
        assert_eq!(chart.node_at(250.0, 250.0), None);

        chart.load_csv(CSV).unwrap();
        assert_eq!(chart.node_at(250.0, 250.0), Some("root"));
        assert_eq!(chart.node_at(1.0, 1.0), None);

        // A malformed load clears the markers
        let _ = chart.load_csv("id,parentId\na,\nb,\n");
        assert_eq!(chart.node_at(250.0, 250.0), None);
    }

    #[test]
    fn test_click_on_empty_canvas_is_noop() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(CSV).unwrap();
        assert_eq!(chart.click_at(1.0, 1.0, 1.0, 1.0), OverlayState::Hidden);
    }
}
