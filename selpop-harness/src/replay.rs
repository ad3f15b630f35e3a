//! Scenario replay.
//!
//! `replay_virtual` steps a manual clock: before each step every debounce
//! deadline that falls at or before the step's time fires at its exact
//! deadline. `replay_realtime` hands the popup to a `PopupDriver` and sleeps
//! between steps for real.

use std::io::Write;
use std::time::{Duration, Instant};

use selpop_api::{Point, PopupEvent, Size};
use selpop_core::{
    ActionId, ActionRegistry, HeadlessHost, PopupDriver, SelectionPopup, SELECTION_CHANGE_DELAY,
};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::scenario::{Op, Scenario, Step};

/// One line of harness output.
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    at_ms: u64,
    #[serde(flatten)]
    event: &'a PopupEvent,
}

fn write_event(out: &mut impl Write, at_ms: u64, event: &PopupEvent) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, &EventLine { at_ms, event })?;
    writeln!(out)?;
    Ok(())
}

fn elapsed_ms(start: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(start).as_millis() as u64
}

fn host_for(scenario: &Scenario) -> HeadlessHost {
    HeadlessHost::new(scenario.viewport, scenario.popup)
}

/// Apply a document-side operation to the host. Returns false for operations
/// that go through the popup instead.
fn apply_to_host(host: &HeadlessHost, op: &Op) -> bool {
    match op {
        Op::Select { text, rect } => host.select(text.clone(), *rect),
        Op::ClearSelection => host.deselect(),
        Op::ScrollTo { x, y } => host.scroll_to(Point::new(*x, *y)),
        Op::ResizeViewport { width, height } => host.set_viewport(Size::new(*width, *height)),
        Op::ResizePopup { width, height } => host.set_popup_size(Size::new(*width, *height)),
        Op::Signal { .. } | Op::Invoke { .. } => return false,
    }
    true
}

// =============================================================================
// Virtual clock
// =============================================================================

struct VirtualReplay<'o, W: Write> {
    popup: SelectionPopup,
    host: HeadlessHost,
    rx: broadcast::Receiver<PopupEvent>,
    start: Instant,
    out: &'o mut W,
    emitted: usize,
    /// Latest time anything happened.
    last: Instant,
}

impl<W: Write> VirtualReplay<'_, W> {
    fn flush(&mut self, now: Instant) -> anyhow::Result<()> {
        self.last = self.last.max(now);
        let at_ms = elapsed_ms(self.start, now);
        while let Ok(event) = self.rx.try_recv() {
            write_event(&mut *self.out, at_ms, &event)?;
            self.emitted += 1;
        }
        Ok(())
    }

    /// Fire every deadline up to and including `until`, each at its own time.
    fn advance(&mut self, until: Option<Instant>) -> anyhow::Result<()> {
        while let Some(deadline) = self.popup.next_deadline() {
            if until.is_some_and(|until| deadline > until) {
                break;
            }
            self.popup.fire_due(deadline);
            self.flush(deadline)?;
        }
        Ok(())
    }

    fn step(&mut self, step: &Step) -> anyhow::Result<()> {
        let now = self.start + Duration::from_millis(step.at_ms);
        self.advance(Some(now))?;

        if !apply_to_host(&self.host, &step.op) {
            match &step.op {
                Op::Signal { signal } => self.popup.handle_signal(*signal, now),
                Op::Invoke { action } => invoke(&mut self.popup, action),
                _ => {}
            }
        }
        self.flush(now)
    }
}

fn invoke(popup: &mut SelectionPopup, action: &str) {
    match popup.invoke_action(&ActionId::from(action)) {
        Ok(outcome) => tracing::debug!(action, ?outcome, "action invoked"),
        Err(e) => tracing::warn!("invoke {} failed: {}", action, e),
    }
}

/// Replay on a virtual clock. Returns the number of events written.
pub fn replay_virtual(
    scenario: &Scenario,
    actions: ActionRegistry,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let host = host_for(scenario);
    let (popup, rx) = SelectionPopup::new(scenario.options.clone(), host.capabilities(), actions)?;
    let start = Instant::now();
    let mut replay = VirtualReplay {
        popup,
        host,
        rx,
        start,
        out,
        emitted: 0,
        last: start,
    };

    for step in &scenario.steps {
        replay.step(step)?;
    }
    // Let trailing debounces settle.
    replay.advance(None)?;

    let end = replay.last.max(replay.start + Duration::from_millis(scenario.duration_ms()));
    replay.popup.teardown();
    replay.flush(end)?;

    tracing::info!(
        steps = scenario.steps.len(),
        events = replay.emitted,
        shows = replay.host.show_count(),
        "replay finished"
    );
    Ok(replay.emitted)
}

// =============================================================================
// Real time
// =============================================================================

/// Replay through the async driver with real sleeps. Must run inside a
/// `LocalSet`.
pub async fn replay_realtime(scenario: &Scenario, actions: ActionRegistry) -> anyhow::Result<usize> {
    let host = host_for(scenario);
    let (popup, _rx) = SelectionPopup::new(scenario.options.clone(), host.capabilities(), actions)?;
    let (driver, handle) = PopupDriver::new(popup);

    let start = tokio::time::Instant::now();
    let mut events = handle.subscribe();
    let printer = tokio::task::spawn_local(async move {
        let mut emitted = 0;
        let mut stdout = std::io::stdout();
        loop {
            match events.recv().await {
                Ok(event) => {
                    let at_ms = elapsed_ms(start.into_std(), Instant::now());
                    if let Err(e) = write_event(&mut stdout, at_ms, &event) {
                        tracing::warn!("failed to write event: {}", e);
                    }
                    emitted += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "event printer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        emitted
    });
    let running = tokio::task::spawn_local(driver.run());

    for step in &scenario.steps {
        tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
        if apply_to_host(&host, &step.op) {
            continue;
        }
        match &step.op {
            Op::Signal { signal } => handle.signal(*signal)?,
            Op::Invoke { action } => match handle.invoke(action.as_str()).await {
                Ok(outcome) => tracing::debug!(action, ?outcome, "action invoked"),
                Err(e) => tracing::warn!("invoke {} failed: {}", action, e),
            },
            _ => {}
        }
    }

    // Long enough for either debounce to fire after the last step.
    let settle = scenario.options.debounce_delay().max(SELECTION_CHANGE_DELAY);
    tokio::time::sleep(settle + Duration::from_millis(10)).await;

    handle.shutdown();
    drop(handle);
    let popup = running.await?;
    drop(popup);

    let emitted = printer.await?;
    tracing::info!(steps = scenario.steps.len(), events = emitted, "replay finished");
    Ok(emitted)
}
