//! Per-source debounce register.
//!
//! Each trigger source owns a single slot. Scheduling for a source replaces
//! whatever that source had pending (cancel-and-reschedule), so a burst of
//! signals from one source collapses into one evaluation at the last
//! deadline. Sources never cancel each other.
//!
//! This is a pure data structure: callers pass `now` explicitly and poll
//! `take_due()`; the async driver turns `next_deadline()` into a sleep.

use std::time::{Duration, Instant};

/// Where a pending evaluation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    /// A primary-button release. Authoritative: may reposition a visible popup.
    PointerRelease,
    /// A selection-change notification outside of a drag.
    SelectionChange,
}

impl TriggerSource {
    const ALL: [TriggerSource; 2] = [TriggerSource::PointerRelease, TriggerSource::SelectionChange];

    fn slot(self) -> usize {
        match self {
            TriggerSource::PointerRelease => 0,
            TriggerSource::SelectionChange => 1,
        }
    }
}

/// A scheduled evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTrigger {
    pub source: TriggerSource,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
pub struct PendingTriggers {
    slots: [Option<Instant>; 2],
}

impl PendingTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an evaluation for `source` at `now + delay`.
    ///
    /// Returns true if a previously pending trigger for the same source was
    /// replaced.
    pub fn schedule(&mut self, source: TriggerSource, now: Instant, delay: Duration) -> bool {
        self.slots[source.slot()].replace(now + delay).is_some()
    }

    /// Cancel the pending trigger for `source`. Returns true if one existed.
    pub fn cancel(&mut self, source: TriggerSource) -> bool {
        self.slots[source.slot()].take().is_some()
    }

    /// Cancel every pending trigger. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        self.slots.iter_mut().filter_map(Option::take).count()
    }

    pub fn is_pending(&self, source: TriggerSource) -> bool {
        self.slots[source.slot()].is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().min().copied()
    }

    /// Remove and return the earliest trigger whose deadline has passed.
    ///
    /// Call repeatedly until `None` to drain everything that is due; each
    /// trigger is returned exactly once.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingTrigger> {
        let source = TriggerSource::ALL
            .into_iter()
            .filter_map(|source| {
                self.slots[source.slot()]
                    .filter(|deadline| *deadline <= now)
                    .map(|deadline| (deadline, source))
            })
            .min_by_key(|(deadline, _)| *deadline)
            .map(|(_, source)| source)?;

        let deadline = self.slots[source.slot()].take()?;
        Some(PendingTrigger { source, deadline })
    }
}
