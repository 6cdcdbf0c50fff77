//! Contact form component.

use serde::Serialize;
use tracing::{debug, info};

use super::state::{OverlayEvent, OverlayState, transition};

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
}

/// One labelled input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Input name.
    pub name: String,
    /// Input type.
    pub kind: FieldKind,
    /// Label shown before the input.
    pub display: String,
}

impl FormField {
    pub fn text(name: &str, display: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
            display: display.to_string(),
        }
    }
}

/// The reusable contact form overlay.
///
/// Submission is not wired to anything; the host renders the Submit button
/// but only Dismiss changes state.
#[derive(Debug, Clone)]
pub struct ContactForm {
    trigger_id: String,
    fields: Vec<FormField>,
    state: OverlayState,
}

impl ContactForm {
    /// Create a hidden form opened by clicks on `trigger_id`.
    pub fn new(trigger_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            fields: vec![
                FormField::text("name", "Name: "),
                FormField::text("email", "Email: "),
            ],
            state: OverlayState::Hidden,
        }
    }

    /// Ordered form fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Current state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Apply an event and return the new state.
    pub fn handle(&mut self, event: &OverlayEvent) -> OverlayState {
        let next = transition(self.state, event, &self.trigger_id);
        if next != self.state {
            info!(from = ?self.state, to = ?next, "contact form state changed");
        } else {
            debug!(?event, "contact form ignored event");
        }
        self.state = next;
        next
    }

    /// Shorthand for `handle(&OverlayEvent::Dismiss)`.
    pub fn dismiss(&mut self) -> OverlayState {
        self.handle(&OverlayEvent::Dismiss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::NodeClick;

    #[test]
    fn test_starts_hidden_with_fields() {
        let form = ContactForm::new("industry1");
        assert_eq!(form.state(), OverlayState::Hidden);
        let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email"]);
    }

    #[test]
    fn test_open_and_dismiss() {
        let mut form = ContactForm::new("industry1");
        let state = form.handle(&OverlayEvent::NodeClicked(NodeClick {
            node_id: "industry1".to_string(),
            pointer_x: 20.0,
            pointer_y: 20.0,
        }));
        assert!(state.is_visible());
        assert_eq!(form.dismiss(), OverlayState::Hidden);
    }
}
