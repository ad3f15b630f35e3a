//! Integration tests for the async popup driver.
//!
//! The driver runs on a `LocalSet` (host capabilities are not `Send`) with
//! tokio's clock paused, so debounce deadlines are exact.

use std::time::Duration;

use selpop_api::{HideReason, PopupEvent, Rect, Signal, Size};
use selpop_core::{
    Action, ActionRegistry, HeadlessHost, InvokeOutcome, PopupDriver, PopupError, PopupOptions,
    SelectionPopup,
};
use tokio::task::LocalSet;
use tokio::time::sleep;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn popup(actions: ActionRegistry) -> (SelectionPopup, HeadlessHost) {
    let host = HeadlessHost::new(Size::new(800.0, 600.0), Size::new(150.0, 50.0));
    let (popup, _rx) = SelectionPopup::new(PopupOptions::default(), host.capabilities(), actions)
        .expect("Failed to create popup");
    (popup, host)
}

#[tokio::test(start_paused = true)]
async fn test_driver_fires_release_debounce() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (popup, host) = popup(ActionRegistry::new());
            let (driver, handle) = PopupDriver::new(popup);
            let mut events = handle.subscribe();
            let task = tokio::task::spawn_local(driver.run());

            handle.signal(Signal::pointer_down(100.0, 100.0)).unwrap();
            host.select("hello", Rect::new(100.0, 100.0, 200.0, 120.0));
            handle.signal(Signal::pointer_up(200.0, 120.0)).unwrap();

            sleep(ms(49)).await;
            assert_eq!(host.show_count(), 0);

            sleep(ms(2)).await;
            assert_eq!(host.show_count(), 1);
            assert!(matches!(
                events.recv().await.unwrap(),
                PopupEvent::Shown { text, .. } if text == "hello"
            ));

            handle.shutdown();
            let popup = task.await.unwrap();
            assert!(popup.is_torn_down());
            assert!(host.is_released());
            assert_eq!(
                events.recv().await.unwrap(),
                PopupEvent::Hidden {
                    reason: HideReason::Teardown
                }
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_driver_coalesces_selection_changes() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (popup, host) = popup(ActionRegistry::new());
            let (driver, handle) = PopupDriver::new(popup);
            let task = tokio::task::spawn_local(driver.run());

            for i in 0..5 {
                host.select(format!("word{i}"), Rect::new(10.0, 10.0, 60.0, 30.0));
                handle.signal(Signal::SelectionChange).unwrap();
                sleep(ms(40)).await;
            }
            // Last change at 160ms, still waiting on its 100ms window.
            assert_eq!(host.show_count(), 0);

            sleep(ms(100)).await;
            assert_eq!(host.show_count(), 1);
            assert_eq!(host.current_text(), "word4");

            drop(handle);
            let popup = task.await.unwrap();
            assert!(popup.is_torn_down());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_driver_scroll_cancels_pending() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (popup, host) = popup(ActionRegistry::new());
            let (driver, handle) = PopupDriver::new(popup);
            let task = tokio::task::spawn_local(driver.run());

            host.select("hello", Rect::new(100.0, 100.0, 200.0, 120.0));
            handle.signal(Signal::pointer_up(200.0, 120.0)).unwrap();
            sleep(ms(10)).await;
            handle.signal(Signal::Scroll).unwrap();

            sleep(ms(1_000)).await;
            assert_eq!(host.show_count(), 0);

            handle.shutdown();
            task.await.unwrap();
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_driver_invoke_round_trip() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut actions = ActionRegistry::new();
            actions
                .register(Action::new("noop", "Noop", |_: &str| Ok(())))
                .unwrap();
            let (popup, host) = popup(actions);
            let (driver, handle) = PopupDriver::new(popup);
            let task = tokio::task::spawn_local(driver.run());

            assert_eq!(handle.invoke("noop").await.unwrap(), InvokeOutcome::NoSelection);

            host.select("hello", Rect::new(100.0, 100.0, 200.0, 120.0));
            handle.signal(Signal::pointer_up(200.0, 120.0)).unwrap();
            sleep(ms(60)).await;

            assert_eq!(handle.invoke("noop").await.unwrap(), InvokeOutcome::Invoked);
            assert_eq!(host.popup_position(), None);
            assert!(matches!(
                handle.invoke("missing").await,
                Err(PopupError::UnknownAction(_))
            ));

            handle.shutdown();
            task.await.unwrap();
            assert!(handle.is_shutdown());
            assert!(matches!(handle.invoke("noop").await, Err(PopupError::TornDown)));
            assert!(handle.signal(Signal::Scroll).is_err());
        })
        .await;
}
