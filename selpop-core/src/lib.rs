//! Selpop Core - The selection popup engine.
//!
//! This crate contains everything between host signals and the popup:
//! - Selection tracking (pointer and selection-change debouncing)
//! - Placement (flip-and-clamp positioning against the viewport)
//! - Actions (ordered registry of popup buttons)
//! - The owned popup instance and its async driver
//! - A headless host for scripting and tests

pub mod actions;
pub mod debounce;
pub mod driver;
pub mod headless;
pub mod placement;
pub mod tracker;

mod config;
mod error;
mod popup;
mod state;

pub use actions::{Action, ActionHandler, ActionId, ActionRegistry};
pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_OFFSET, PopupOptions, SELECTION_CHANGE_DELAY};
pub use debounce::TriggerSource;
pub use driver::{DriverHandle, PopupDriver};
pub use error::PopupError;
pub use headless::HeadlessHost;
pub use placement::compute_position;
pub use popup::{InvokeOutcome, SelectionPopup};
pub use state::{PointerState, SelectionState, TrackerPhase};
pub use tracker::{Evaluation, SelectionTracker};
