//! The selection popup: one owned instance tying the tracker to its actions.
//!
//! There is no process-wide popup: each `SelectionPopup` owns its host
//! capabilities and action registry, and `teardown()` (or drop) releases
//! them together with any pending evaluations.

use std::time::Instant;

use selpop_api::{Capabilities, HideReason, PopupEvent, Signal};
use tokio::sync::broadcast;

use crate::actions::{Action, ActionId, ActionRegistry};
use crate::config::PopupOptions;
use crate::debounce::TriggerSource;
use crate::error::PopupError;
use crate::state::{SelectionState, TrackerPhase};
use crate::tracker::{Evaluation, SelectionTracker};

/// What `invoke_action` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// The handler ran with the tracked text and the popup was hidden.
    Invoked,
    /// No selection is tracked; nothing ran.
    NoSelection,
}

pub struct SelectionPopup {
    tracker: SelectionTracker,
    actions: ActionRegistry,
    torn_down: bool,
}

impl SelectionPopup {
    /// Create a popup over the given host capabilities.
    pub fn new(
        options: PopupOptions,
        caps: Capabilities,
        actions: ActionRegistry,
    ) -> Result<(Self, broadcast::Receiver<PopupEvent>), PopupError> {
        options.validate()?;
        let (tracker, rx) = SelectionTracker::new(options, caps);
        let popup = Self {
            tracker,
            actions,
            torn_down: false,
        };
        Ok((popup, rx))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PopupEvent> {
        self.tracker.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<PopupEvent> {
        self.tracker.event_sender()
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn state(&self) -> SelectionState {
        self.tracker.state()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.tracker.phase()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        self.tracker.next_deadline()
    }

    // =====================================================================
    // Signals and timers
    // =====================================================================

    pub fn handle_signal(&mut self, signal: Signal, now: Instant) {
        if self.torn_down {
            tracing::debug!(?signal, "signal after teardown ignored");
            return;
        }
        self.tracker.handle_signal(signal, now);
    }

    /// Run every debounced evaluation due at `now`.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        if self.torn_down {
            return 0;
        }
        self.tracker.fire_due(now)
    }

    /// Evaluate the live selection immediately, bypassing the debounce.
    pub fn evaluate_now(&mut self, source: TriggerSource) -> Option<Evaluation> {
        if self.torn_down {
            return None;
        }
        Some(self.tracker.evaluate(source))
    }

    pub fn hide(&mut self) {
        if !self.torn_down {
            self.tracker.hide(HideReason::SelectionCleared);
        }
    }

    // =====================================================================
    // Actions
    // =====================================================================

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn add_action(&mut self, action: Action) -> Result<(), PopupError> {
        self.actions.register(action)
    }

    pub fn remove_action(&mut self, id: &ActionId) -> Option<Action> {
        self.actions.remove(id)
    }

    /// Run an action against the tracked selection, then hide.
    ///
    /// The popup hides whether or not the handler succeeds; a handler error
    /// is returned to the caller as `ActionFailed`.
    pub fn invoke_action(&mut self, id: &ActionId) -> Result<InvokeOutcome, PopupError> {
        if self.torn_down {
            return Err(PopupError::TornDown);
        }
        let action = self
            .actions
            .get(id)
            .ok_or_else(|| PopupError::UnknownAction(id.to_string()))?;

        let text = self.tracker.selection().text.clone();
        if text.is_empty() {
            return Ok(InvokeOutcome::NoSelection);
        }

        let result = action.run(&text);
        let succeeded = result.is_ok();
        if let Err(e) = &result {
            tracing::warn!("Action {} failed: {:#}", id, e);
        }

        self.tracker.hide(HideReason::ActionInvoked);
        self.tracker.emit(PopupEvent::ActionInvoked {
            action: id.to_string(),
            succeeded,
        });

        result
            .map(|()| InvokeOutcome::Invoked)
            .map_err(|e| PopupError::ActionFailed {
                action: id.to_string(),
                reason: format!("{e:#}"),
            })
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    /// Cancel pending evaluations, hide, and release the presenter.
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let dropped = self.tracker.cancel_pending();
        self.tracker.hide(HideReason::Teardown);
        self.tracker.capabilities_mut().presenter.release();
        self.torn_down = true;
        tracing::debug!(dropped, "selection popup torn down");
    }
}

impl Drop for SelectionPopup {
    fn drop(&mut self) {
        self.teardown();
    }
}
