//! Spatial indexing for hit testing.
//!
//! This module provides an R-tree based index that maps a pointer position on
//! the canvas to the node drawn under it.

mod hit;

pub use hit::SpatialIndex;
