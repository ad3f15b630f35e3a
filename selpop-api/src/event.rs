//! Popup events emitted by the tracker to subscribers (presenters, logs, tests).

use serde::{Deserialize, Serialize};

use crate::{Point, Rect};

/// Why the popup was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HideReason {
    /// The live selection became empty or lost its range.
    SelectionCleared,
    /// A pointer went down outside the popup.
    OutsideClick,
    /// The window scrolled; the placement would be stale.
    Scroll,
    /// An action was invoked from the popup.
    ActionInvoked,
    /// The popup instance was torn down.
    Teardown,
}

/// Events emitted by the selection popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PopupEvent {
    /// The popup was placed next to a completed selection.
    Shown {
        text: String,
        /// Selection bounds in viewport coordinates.
        rect: Rect,
        /// Popup top-left in document coordinates.
        position: Point,
    },

    /// A visible popup was hidden.
    Hidden { reason: HideReason },

    /// An action ran against the tracked selection.
    ActionInvoked { action: String, succeeded: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_event_serializes_reason() {
        let event = PopupEvent::Hidden {
            reason: HideReason::OutsideClick,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"hidden","reason":"outside_click"}"#);
    }
}
