//! Overlay state machine.
//!
//! `Hidden -> (designated node clicked) -> Visible(at pointer) -> (dismiss) -> Hidden`
//!
//! A designated click while visible moves the form to the new pointer
//! position. Everything else leaves the state unchanged.

use serde::Serialize;

/// Horizontal offset of the form from the pointer.
const OFFSET_LEFT: f64 = 10.0;
/// Vertical offset of the form from the pointer.
const OFFSET_TOP: f64 = -10.0;

/// Where the overlay is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OverlayState {
    #[default]
    Hidden,
    /// Shown with its top-left corner at (`left`, `top`) in page coordinates.
    Visible { left: f64, top: f64 },
}

impl OverlayState {
    /// Check if the overlay is shown.
    pub fn is_visible(self) -> bool {
        matches!(self, OverlayState::Visible { .. })
    }
}

/// A click on a rendered node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeClick {
    /// Record id of the clicked node.
    pub node_id: String,
    /// Pointer X in page coordinates.
    pub pointer_x: f64,
    /// Pointer Y in page coordinates.
    pub pointer_y: f64,
}

/// Inputs to the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    NodeClicked(NodeClick),
    Dismiss,
}

/// Next overlay state for `event`, given the designated trigger node id.
pub fn transition(state: OverlayState, event: &OverlayEvent, trigger_id: &str) -> OverlayState {
    match event {
        OverlayEvent::NodeClicked(click) if click.node_id == trigger_id => OverlayState::Visible {
            left: click.pointer_x + OFFSET_LEFT,
            top: click.pointer_y + OFFSET_TOP,
        },
        OverlayEvent::NodeClicked(_) => state,
        OverlayEvent::Dismiss => OverlayState::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(id: &str, x: f64, y: f64) -> OverlayEvent {
        OverlayEvent::NodeClicked(NodeClick {
            node_id: id.to_string(),
            pointer_x: x,
            pointer_y: y,
        })
    }

    #[test]
    fn test_other_node_is_noop() {
        let next = transition(OverlayState::Hidden, &click("a", 5.0, 5.0), "industry1");
        assert_eq!(next, OverlayState::Hidden);

        let shown = OverlayState::Visible { left: 1.0, top: 2.0 };
        assert_eq!(transition(shown, &click("a", 5.0, 5.0), "industry1"), shown);
    }

    #[test]
    fn test_trigger_shows_at_pointer() {
        let next = transition(OverlayState::Hidden, &click("industry1", 100.0, 40.0), "industry1");
        assert_eq!(next, OverlayState::Visible { left: 110.0, top: 30.0 });
        assert!(next.is_visible());
    }

    #[test]
    fn test_trigger_while_visible_repositions() {
        let shown = OverlayState::Visible { left: 110.0, top: 30.0 };
        let next = transition(shown, &click("industry1", 0.0, 0.0), "industry1");
        assert_eq!(next, OverlayState::Visible { left: 10.0, top: -10.0 });
    }

    #[test]
    fn test_dismiss_hides() {
        let shown = OverlayState::Visible { left: 110.0, top: 30.0 };
        assert_eq!(transition(shown, &OverlayEvent::Dismiss, "industry1"), OverlayState::Hidden);
        assert_eq!(
            transition(OverlayState::Hidden, &OverlayEvent::Dismiss, "industry1"),
            OverlayState::Hidden
        );
    }
}
