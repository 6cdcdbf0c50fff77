//! Radial link curves.
//!
//! A link is drawn as a cubic Bézier between two polar positions. Both control
//! points sit on the ring halfway between the endpoints' radii: the first at
//! the source angle, the second at the target angle. Near the centre the curve
//! leaves the parent radially, then sweeps around to the child's angle.

use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

use super::cluster::PositionedNode;
use crate::hierarchy::NodeId;

/// A parent-child edge of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Parent node.
    pub source: NodeId,
    /// Child node.
    pub target: NodeId,
}

/// A Cartesian point relative to the chart centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert polar coordinates to Cartesian, with angle 0 pointing up.
#[inline]
pub fn point_radial(angle: f64, radius: f64) -> Point {
    let theta = angle - FRAC_PI_2;
    Point::new(radius * theta.cos(), radius * theta.sin())
}

/// Cubic Bézier segment of a radial link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl RadialCurve {
    /// Curve from `source` to `target`.
    pub fn between(source: &PositionedNode, target: &PositionedNode) -> Self {
        let mid = (source.radius + target.radius) / 2.0;
        Self {
            start: point_radial(source.angle, source.radius),
            control1: point_radial(source.angle, mid),
            control2: point_radial(target.angle, mid),
            end: point_radial(target.angle, target.radius),
        }
    }

    /// SVG path data, e.g. `M0,0C0,-47.5,47.5,0,95,0`.
    pub fn to_path_data(&self) -> String {
        format!(
            "M{},{}C{},{},{},{},{},{}",
            coord(self.start.x),
            coord(self.start.y),
            coord(self.control1.x),
            coord(self.control1.y),
            coord(self.control2.x),
            coord(self.control2.y),
            coord(self.end.x),
            coord(self.end.y),
        )
    }
}

/// Format a coordinate with at most three decimals and no negative zero.
pub(crate) fn coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
