//! Async driver for a [`SelectionPopup`].
//!
//! The popup itself is synchronous and clock-agnostic; the driver feeds it
//! signals from a channel and sleeps until the next debounce deadline. Host
//! capabilities are usually not `Send`, so `run()` is meant for a
//! current-thread runtime or a `LocalSet`. The [`DriverHandle`] is `Send`
//! and can be cloned freely.

use std::future;

use selpop_api::{PopupEvent, Signal};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::actions::ActionId;
use crate::error::PopupError;
use crate::popup::{InvokeOutcome, SelectionPopup};

type InvokeReply = oneshot::Sender<Result<InvokeOutcome, PopupError>>;

enum DriverCommand {
    Signal(Signal),
    Invoke { id: ActionId, reply: InvokeReply },
}

/// Owns a popup and runs its timers.
pub struct PopupDriver {
    popup: SelectionPopup,
    cmd_rx: mpsc::UnboundedReceiver<DriverCommand>,
    token: CancellationToken,
}

/// Cloneable, thread-safe handle to a running driver.
#[derive(Clone)]
pub struct DriverHandle {
    cmd_tx: mpsc::UnboundedSender<DriverCommand>,
    token: CancellationToken,
    events: broadcast::Sender<PopupEvent>,
}

impl PopupDriver {
    pub fn new(popup: SelectionPopup) -> (Self, DriverHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let handle = DriverHandle {
            cmd_tx,
            token: token.clone(),
            events: popup.event_sender(),
        };
        let driver = Self { popup, cmd_rx, token };
        (driver, handle)
    }

    /// Run until shut down or every handle is dropped. The popup is torn
    /// down and handed back.
    pub async fn run(self) -> SelectionPopup {
        let Self {
            mut popup,
            mut cmd_rx,
            token,
        } = self;
        tracing::debug!("popup driver starting");

        loop {
            let deadline = popup.next_deadline();
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::debug!("popup driver cancelled");
                    break;
                }

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(DriverCommand::Signal(signal)) => {
                            popup.handle_signal(signal, Instant::now().into_std());
                        }
                        Some(DriverCommand::Invoke { id, reply }) => {
                            let _ = reply.send(popup.invoke_action(&id));
                        }
                        None => {
                            tracing::debug!("all driver handles dropped");
                            break;
                        }
                    }
                }

                _ = sleep_until(deadline) => {
                    popup.fire_due(Instant::now().into_std());
                }
            }
        }

        popup.teardown();
        popup
    }
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}

impl DriverHandle {
    /// Queue a host signal.
    pub fn signal(&self, signal: Signal) -> Result<(), PopupError> {
        self.cmd_tx
            .send(DriverCommand::Signal(signal))
            .map_err(|_| PopupError::TornDown)
    }

    /// Invoke an action on the driver's popup and wait for the outcome.
    pub async fn invoke(&self, id: impl Into<ActionId>) -> Result<InvokeOutcome, PopupError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(DriverCommand::Invoke { id: id.into(), reply })
            .map_err(|_| PopupError::TornDown)?;
        rx.await.map_err(|_| PopupError::TornDown)?
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PopupEvent> {
        self.events.subscribe()
    }

    /// Stop the driver. Pending evaluations are dropped.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }
}
