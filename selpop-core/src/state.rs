//! Tracker state: what is selected, whether the primary button is held, and
//! the phase derived from both.

use selpop_api::Rect;
use serde::Serialize;

/// The selection the popup is currently displayed for.
///
/// `is_active` implies a non-empty `text`; hiding always resets to the
/// default (empty, inactive) state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionState {
    pub text: String,
    pub rect: Option<Rect>,
    pub is_active: bool,
}

impl SelectionState {
    /// Record a displayed selection. Empty text never activates.
    pub(crate) fn activate(&mut self, text: String, rect: Rect) {
        self.is_active = !text.is_empty();
        self.text = text;
        self.rect = Some(rect);
    }

    /// Reset to empty and inactive. Returns true if it was active.
    pub(crate) fn clear(&mut self) -> bool {
        let was_active = self.is_active;
        self.text.clear();
        self.rect = None;
        self.is_active = false;
        was_active
    }
}

/// Transient pointer state, reset on button release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub is_primary_button_down: bool,
}

/// The tracker's phase, derived from pointer and selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No drag, nothing displayed.
    Idle,
    /// The primary button is held; selection-change noise is ignored.
    Dragging,
    /// A popup is displayed for a completed selection.
    Shown,
}

impl TrackerPhase {
    pub fn from_state(pointer: &PointerState, selection: &SelectionState) -> Self {
        if pointer.is_primary_button_down {
            TrackerPhase::Dragging
        } else if selection.is_active {
            TrackerPhase::Shown
        } else {
            TrackerPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_inactive() {
        let state = SelectionState::default();
        assert!(state.text.is_empty());
        assert!(!state.is_active);
        assert!(state.rect.is_none());
    }

    #[test]
    fn test_activate_with_empty_text_stays_inactive() {
        let mut state = SelectionState::default();
        state.activate(String::new(), Rect::ZERO);
        assert!(!state.is_active);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut state = SelectionState::default();
        state.activate("hello".into(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(state.clear());
        assert!(!state.clear());
        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn test_phase_dragging_wins_over_shown() {
        let pointer = PointerState { is_primary_button_down: true };
        let mut selection = SelectionState::default();
        selection.activate("x".into(), Rect::ZERO);
        assert_eq!(TrackerPhase::from_state(&pointer, &selection), TrackerPhase::Dragging);
    }

    #[test]
    fn test_phase_shown_and_idle() {
        let pointer = PointerState::default();
        let mut selection = SelectionState::default();
        assert_eq!(TrackerPhase::from_state(&pointer, &selection), TrackerPhase::Idle);

        selection.activate("x".into(), Rect::ZERO);
        assert_eq!(TrackerPhase::from_state(&pointer, &selection), TrackerPhase::Shown);
    }
}
