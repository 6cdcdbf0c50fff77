//! Interaction overlay.
//!
//! A single contact form, hidden until the designated node is clicked.
//! State changes go through a pure transition function; the form component
//! owns its current state.

mod form;
mod state;

pub use form::{ContactForm, FieldKind, FormField};
pub use state::{NodeClick, OverlayEvent, OverlayState, transition};
