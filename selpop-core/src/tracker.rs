//! Selection tracker. Decides when the popup shows, moves and hides.
//!
//! Two signal sources can trigger an evaluation of the live selection:
//!
//! - **Pointer release**: authoritative, but blind to keyboard or
//!   programmatic selection changes. Debounced by `debounce_delay_ms`.
//! - **Selection change**: sees every change, but fires on each
//!   micro-adjustment of a drag. Ignored while the primary button is held,
//!   debounced by [`SELECTION_CHANGE_DELAY`] otherwise.
//!
//! Each source has its own single-slot debounce, so a drag produces exactly
//! one evaluation. Outside clicks and scrolling hide synchronously.

use std::time::Instant;

use selpop_api::{Capabilities, HideReason, MouseButton, Point, PopupEvent, Rect, Signal};
use tokio::sync::broadcast;

use crate::config::{PopupOptions, SELECTION_CHANGE_DELAY};
use crate::debounce::{PendingTriggers, TriggerSource};
use crate::placement::compute_position;
use crate::state::{PointerState, SelectionState, TrackerPhase};

/// Capacity of the popup event channel.
const EVENT_CAPACITY: usize = 256;

/// Result of one debounced evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// The popup was placed at this document position.
    Shown(Point),
    /// The selection was empty or unmeasurable; the popup is hidden.
    Hidden,
    /// A selection change arrived while the popup was already visible.
    Unchanged,
}

pub struct SelectionTracker {
    options: PopupOptions,
    caps: Capabilities,
    selection: SelectionState,
    pointer: PointerState,
    pending: PendingTriggers,
    event_tx: broadcast::Sender<PopupEvent>,
}

impl SelectionTracker {
    /// Create a tracker together with a receiver for its events.
    pub fn new(options: PopupOptions, caps: Capabilities) -> (Self, broadcast::Receiver<PopupEvent>) {
        let (event_tx, event_rx) = broadcast::channel(EVENT_CAPACITY);
        let tracker = Self {
            options,
            caps,
            selection: SelectionState::default(),
            pointer: PointerState::default(),
            pending: PendingTriggers::new(),
            event_tx,
        };
        (tracker, event_rx)
    }

    /// Subscribe to popup events.
    pub fn subscribe(&self) -> broadcast::Receiver<PopupEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<PopupEvent> {
        self.event_tx.clone()
    }

    pub(crate) fn emit(&self, event: PopupEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn options(&self) -> &PopupOptions {
        &self.options
    }

    /// Snapshot of the tracked selection.
    pub fn state(&self) -> SelectionState {
        self.selection.clone()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn phase(&self) -> TrackerPhase {
        TrackerPhase::from_state(&self.pointer, &self.selection)
    }

    pub fn pending(&self) -> &PendingTriggers {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.pending_count()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.next_deadline()
    }

    pub(crate) fn capabilities_mut(&mut self) -> &mut Capabilities {
        &mut self.caps
    }

    // =====================================================================
    // Signals
    // =====================================================================

    pub fn handle_signal(&mut self, signal: Signal, now: Instant) {
        match signal {
            Signal::PointerDown { button, position } => self.on_pointer_down(button, position),
            Signal::PointerUp { button, position } => self.on_pointer_up(button, position, now),
            Signal::SelectionChange => self.on_selection_change(now),
            Signal::Scroll => self.on_scroll(),
        }
    }

    fn on_pointer_down(&mut self, button: MouseButton, position: Point) {
        if button.is_primary() {
            self.pointer.is_primary_button_down = true;
        }

        let presenter = &self.caps.presenter;
        if presenter.is_popup_visible() && !presenter.is_point_inside_popup(position) {
            tracing::debug!(x = position.x, y = position.y, "pointer down outside popup");
            self.hide(HideReason::OutsideClick);
            self.caps.selection.clear_selection();
        }
    }

    fn on_pointer_up(&mut self, button: MouseButton, position: Point, now: Instant) {
        if !button.is_primary() {
            return;
        }
        self.pointer.is_primary_button_down = false;

        let presenter = &self.caps.presenter;
        if presenter.is_popup_visible() && presenter.is_point_inside_popup(position) {
            // Clicks on the popup's own buttons are not selections.
            return;
        }

        let delay = self.options.debounce_delay();
        if self.pending.schedule(TriggerSource::PointerRelease, now, delay) {
            tracing::debug!("pointer release replaced a pending evaluation");
        }
    }

    fn on_selection_change(&mut self, now: Instant) {
        if self.pointer.is_primary_button_down {
            return;
        }
        self.pending
            .schedule(TriggerSource::SelectionChange, now, SELECTION_CHANGE_DELAY);
    }

    fn on_scroll(&mut self) {
        let dropped = self.pending.cancel_all();
        if dropped > 0 {
            tracing::debug!(dropped, "scroll cancelled pending evaluations");
        }
        self.hide(HideReason::Scroll);
    }

    // =====================================================================
    // Debounced evaluation
    // =====================================================================

    /// Evaluate every trigger that is due at `now`. Returns how many ran.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(trigger) = self.pending.take_due(now) {
            self.evaluate(trigger.source);
            fired += 1;
        }
        fired
    }

    /// Read the live selection and show, hide or leave the popup.
    pub fn evaluate(&mut self, source: TriggerSource) -> Evaluation {
        let text = self.caps.selection.selection_text().trim().to_string();
        if text.is_empty() {
            self.hide(HideReason::SelectionCleared);
            return Evaluation::Hidden;
        }

        if source == TriggerSource::SelectionChange && self.caps.presenter.is_popup_visible() {
            // Keep the popup where it is, but act on what is selected now.
            if self.selection.is_active {
                self.selection.text = text;
            }
            return Evaluation::Unchanged;
        }

        let Some(rect) = self.caps.selection.bounding_rect() else {
            tracing::debug!("selection has no range, treating as empty");
            self.hide(HideReason::SelectionCleared);
            return Evaluation::Hidden;
        };

        let position = self.place(rect);
        self.caps.presenter.show_popup_at(position);
        tracing::info!(
            x = position.x,
            y = position.y,
            chars = text.chars().count(),
            ?source,
            "showing selection popup"
        );

        self.selection.activate(text.clone(), rect);
        self.emit(PopupEvent::Shown { text, rect, position });
        Evaluation::Shown(position)
    }

    fn place(&self, rect: Rect) -> Point {
        compute_position(
            rect,
            self.caps.presenter.popup_size(),
            self.caps.viewport.viewport_size(),
            self.caps.viewport.scroll_offset(),
            self.options.offset(),
        )
    }

    // =====================================================================
    // Hiding
    // =====================================================================

    /// Hide the popup and forget the tracked selection. Idempotent.
    pub fn hide(&mut self, reason: HideReason) {
        if self.caps.presenter.is_popup_visible() {
            self.caps.presenter.hide_popup();
        }
        if self.selection.clear() {
            tracing::debug!(?reason, "popup hidden");
            self.emit(PopupEvent::Hidden { reason });
        }
    }

    /// Drop every pending evaluation. Returns how many were dropped.
    pub fn cancel_pending(&mut self) -> usize {
        self.pending.cancel_all()
    }
}
