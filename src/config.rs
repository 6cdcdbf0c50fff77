//! Chart configuration.
//!
//! One immutable object handed to the chart at construction. Every field has
//! a default, so hosts can pass a partial object from JavaScript.

use serde::{Deserialize, Serialize};

use crate::hierarchy::ColumnConfig;
use crate::layout::ClusterConfig;
use crate::render::RenderConfig;

/// Complete chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Canvas width in logical units.
    pub width: f64,
    /// Canvas height in logical units.
    pub height: f64,
    /// Record id of the node that opens the contact form.
    pub trigger_id: String,
    /// Extra hit radius around node circles for pointer clicks.
    pub hit_tolerance: f64,
    /// CSV column names.
    pub columns: ColumnConfig,
    /// Radial cluster layout settings.
    pub layout: ClusterConfig,
    /// Presentational settings.
    pub render: RenderConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            trigger_id: "industry1".to_string(),
            hit_tolerance: 2.0,
            columns: ColumnConfig::default(),
            layout: ClusterConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Canvas centre, where the tree root is drawn.
    pub fn centre(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
