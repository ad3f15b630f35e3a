//! Input signals delivered by the host environment.
//!
//! Signals carry no selection payload: the tracker re-reads the live
//! selection itself when a debounced evaluation fires.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Usually the left button. The only button that starts a drag.
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

impl MouseButton {
    pub fn is_primary(self) -> bool {
        matches!(self, MouseButton::Primary)
    }
}

/// A discrete notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// A pointer button went down at `position` (viewport coordinates).
    PointerDown { button: MouseButton, position: Point },
    /// A pointer button was released at `position` (viewport coordinates).
    PointerUp { button: MouseButton, position: Point },
    /// The document selection changed in any way.
    SelectionChange,
    /// The window scrolled.
    Scroll,
}

impl Signal {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Signal::PointerDown {
            button: MouseButton::Primary,
            position: Point::new(x, y),
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Signal::PointerUp {
            button: MouseButton::Primary,
            position: Point::new(x, y),
        }
    }
}
