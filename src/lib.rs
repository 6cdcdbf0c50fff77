//! Radial Dendrogram - WASM Module
//!
//! This module renders hierarchical CSV data as a radial tree (dendrogram)
//! and drives a small contact form overlay. It is compiled to WebAssembly and
//! exposes a JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `hierarchy`: CSV ingestion and the flat-records-to-tree builder
//! - `layout`: Radial cluster layout and radial link curves
//! - `render`: Scene primitives, depth-based styling and SVG export
//! - `spatial`: R-tree hit testing for pointer clicks
//! - `overlay`: Contact form component and its state machine
//! - `chart`: The pipeline tying these together around a dataset snapshot

use tracing::Level;
use wasm_bindgen::prelude::*;

pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod hierarchy;
pub mod layout;
pub mod logging;
pub mod overlay;
pub mod render;
pub mod spatial;

use chart::ChartEngine;
use config::ChartConfig;
use error::ChartError;
use overlay::OverlayState;

/// Initialize the WASM module: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(Level::DEBUG);
}

/// Main entry point for the chart.
///
/// This struct wraps the internal ChartEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct RadialTreeWasm {
    engine: ChartEngine,
}

#[wasm_bindgen]
impl RadialTreeWasm {
    /// Create a chart with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: ChartEngine::with_defaults(),
        }
    }

    /// Create a chart from a (possibly partial) configuration object.
    ///
    /// `undefined` or `null` selects the defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<RadialTreeWasm, JsValue> {
        let config: ChartConfig = if config.is_undefined() || config.is_null() {
            ChartConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            engine: ChartEngine::new(config),
        })
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load CSV text and render it.
    ///
    /// Returns false on failure; the reason is available from `statusMessage`.
    #[wasm_bindgen(js_name = loadCsv)]
    pub fn load_csv(&mut self, text: &str) -> bool {
        self.engine.load_csv(text).is_ok()
    }

    /// Message describing the last failed load, if any.
    #[wasm_bindgen(js_name = statusMessage)]
    pub fn status_message(&self) -> Option<String> {
        self.engine.status().map(str::to_string)
    }

    /// Re-run layout and rendering from the current dataset.
    pub fn rerender(&mut self) {
        self.engine.rerender();
    }

    // =========================================================================
    // Scene Access
    // =========================================================================

    /// The current scene as a standalone SVG document.
    #[wasm_bindgen(js_name = toSvg)]
    pub fn to_svg(&self) -> String {
        self.engine.to_svg()
    }

    /// The current scene as an array of primitive objects.
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.engine.scene().primitives())?)
    }

    /// Number of primitives in the current scene.
    #[wasm_bindgen(js_name = primitiveCount)]
    pub fn primitive_count(&self) -> usize {
        self.engine.scene().len()
    }

    /// Number of nodes in the current hierarchy (0 when nothing is loaded).
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.engine.hierarchy().map_or(0, |h| h.len())
    }

    /// Canvas width.
    pub fn width(&self) -> f64 {
        self.engine.config().width
    }

    /// Canvas height.
    pub fn height(&self) -> f64 {
        self.engine.config().height
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Record id of the node under canvas offset (`x`, `y`), if any.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f64, y: f64) -> Option<String> {
        self.engine.node_at(x, y).map(str::to_string)
    }

    /// Handle a click at canvas offset (`x`, `y`) with page position
    /// (`page_x`, `page_y`). Returns whether the form is visible afterwards.
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&mut self, x: f64, y: f64, page_x: f64, page_y: f64) -> bool {
        self.engine.click_at(x, y, page_x, page_y).is_visible()
    }

    /// Handle a click on the node with the given record id.
    /// Returns whether the form is visible afterwards.
    #[wasm_bindgen(js_name = clickNode)]
    pub fn click_node(&mut self, node_id: &str, page_x: f64, page_y: f64) -> bool {
        self.engine.click_node(node_id, page_x, page_y).is_visible()
    }

    /// Hide the contact form.
    #[wasm_bindgen(js_name = dismissForm)]
    pub fn dismiss_form(&mut self) {
        self.engine.dismiss_form();
    }

    /// Whether the contact form is shown.
    #[wasm_bindgen(js_name = formVisible)]
    pub fn form_visible(&self) -> bool {
        self.engine.form().state().is_visible()
    }

    /// Form left position in page pixels, when visible.
    #[wasm_bindgen(js_name = formLeft)]
    pub fn form_left(&self) -> Option<f64> {
        match self.engine.form().state() {
            OverlayState::Visible { left, .. } => Some(left),
            OverlayState::Hidden => None,
        }
    }

    /// Form top position in page pixels, when visible.
    #[wasm_bindgen(js_name = formTop)]
    pub fn form_top(&self) -> Option<f64> {
        match self.engine.form().state() {
            OverlayState::Visible { top, .. } => Some(top),
            OverlayState::Hidden => None,
        }
    }

    /// The form's fields as `[{ name, kind, display }]`.
    #[wasm_bindgen(js_name = formFields)]
    pub fn form_fields(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.engine.form().fields())?)
    }
}

impl Default for RadialTreeWasm {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a CSV file as text.
#[wasm_bindgen(js_name = fetchCsv)]
pub async fn fetch_csv(url: String) -> Result<String, JsValue> {
    fetch::fetch_text(&url)
        .await
        .map_err(|e| JsValue::from_str(&ChartError::from(e).user_message()))
}

/// Fetch `url`, then build and render a chart from it.
///
/// A failed fetch does not reject: the returned chart is empty and carries
/// the failure in `statusMessage`. Only an invalid `config` rejects.
#[wasm_bindgen(js_name = loadChart)]
pub async fn load_chart(url: String, config: JsValue) -> Result<RadialTreeWasm, JsValue> {
    let mut chart = RadialTreeWasm::with_config(config)?;
    match fetch::fetch_text(&url).await {
        Ok(text) => {
            chart.load_csv(&text);
        }
        Err(error) => chart.engine.record_failure(&error.into()),
    }
    Ok(chart)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::hierarchy::{Hierarchy, Record};
    use crate::layout::ClusterLayout;
    use crate::render::{Primitive, SceneRenderer};
    use std::f64::consts::PI;

    const INDUSTRIES: &str = "\
id,parentId,name
root,,All industries
industry1,root,Manufacturing
industry2,root,Services
industry3,root,Agriculture
company1,industry1,Acme
company2,industry1,Globex
company3,industry2,Initech
company4,industry2,Umbrella
company5,industry2,Hooli
company6,industry3,Soylent
";

    /// Full pipeline: CSV text → hierarchy → layout → scene → SVG,
    /// without wasm_bindgen JS types.
    #[test]
    fn test_csv_to_svg_pipeline() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(INDUSTRIES).unwrap();

        let hierarchy = chart.hierarchy().unwrap();
        assert_eq!(hierarchy.len(), 10);
        assert!(hierarchy.node(hierarchy.root()).parent.is_none());

        let scene = chart.scene();
        // gradient + 9 links + 10 nodes + 10 labels
        assert_eq!(scene.len(), 30);

        let svg = chart.to_svg();
        assert_eq!(svg.matches("<circle").count(), 10);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_three_record_example() {
        let hierarchy = Hierarchy::from_records(vec![
            Record::root("root"),
            Record::child("a", "root"),
            Record::child("b", "root"),
        ])
        .unwrap();
        let root = hierarchy.node(hierarchy.root());
        assert_eq!(root.children.len(), 2);

        let layout = ClusterLayout::with_defaults().compute(&hierarchy).unwrap();
        let a = layout.node(hierarchy.find("a").unwrap()).unwrap();
        let b = layout.node(hierarchy.find("b").unwrap()).unwrap();
        assert!(a.angle.abs() < 1e-9);
        assert!((b.angle - PI).abs() < 1e-9);
        assert_eq!(a.radius, b.radius);
    }

    #[test]
    fn test_repeated_render_keeps_primitive_count() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(INDUSTRIES).unwrap();
        let once = chart.scene().len();
        chart.rerender();
        assert_eq!(chart.scene().len(), once);

        // Reloading the same data also replaces rather than appends
        chart.load_csv(INDUSTRIES).unwrap();
        assert_eq!(chart.scene().len(), once);
    }

    #[test]
    fn test_labels_use_configured_column() {
        let mut config = ChartConfig::default();
        config.columns.label_column = Some("name".to_string());
        let mut chart = ChartEngine::new(config);
        chart.load_csv(INDUSTRIES).unwrap();

        let labels: Vec<&str> = chart
            .scene()
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"Manufacturing"));
        assert!(!labels.contains(&"industry1"));
    }

    #[test]
    fn test_overlay_only_opens_for_trigger() {
        let mut chart = ChartEngine::with_defaults();
        chart.load_csv(INDUSTRIES).unwrap();

        for id in ["root", "industry2", "company1"] {
            assert_eq!(chart.click_node(id, 10.0, 10.0), OverlayState::Hidden);
        }
        assert!(chart.click_node("industry1", 10.0, 10.0).is_visible());
    }

    #[test]
    fn test_config_defaults_fill_partial_input() {
        use serde::Deserialize;
        use serde::de::value::{Error, MapDeserializer};

        // Equivalent to passing `{ width: 800 }` from JavaScript
        let entries = vec![("width", 800.0f64)];
        let config =
            ChartConfig::deserialize(MapDeserializer::<_, Error>::new(entries.into_iter()))
                .unwrap();

        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 500.0);
        assert_eq!(config.trigger_id, "industry1");
        assert_eq!(config.layout.max_radius, 190.0);
    }

    #[test]
    fn test_renderer_is_pure_over_layout() {
        let hierarchy = Hierarchy::from_records(vec![
            Record::root("root"),
            Record::child("a", "root"),
        ])
        .unwrap();
        let layout = ClusterLayout::with_defaults().compute(&hierarchy).unwrap();
        let mut first = SceneRenderer::with_defaults();
        let mut second = SceneRenderer::with_defaults();
        assert_eq!(first.render(&hierarchy, &layout), second.render(&hierarchy, &layout));
    }
}
