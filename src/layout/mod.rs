//! Layout algorithms for hierarchical data.
//!
//! This module provides:
//! - Radial cluster layout (dendrogram-style polar positions)
//! - Radial link curves between parent and child positions

pub mod cluster;
pub mod link;

pub use cluster::{ClusterConfig, ClusterLayout, PositionedNode, RadialLayout, Separation};
pub use link::{Link, Point, RadialCurve, point_radial};
