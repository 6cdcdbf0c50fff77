//! Scene rendering.
//!
//! Maps a `RadialLayout` to drawable primitives (gradient, link paths, node
//! circles, labels) with depth-based styling, and serializes scenes to SVG.

mod config;
mod export;
mod renderer;
mod scene;

pub use config::{LinkGradient, NodePalette, Palette, RenderConfig, TextPalette};
pub use renderer::{SceneRenderer, label_placement, label_transform, node_transform};
pub use scene::{NodeTier, Primitive, Scene, TextAnchor};
