//! Popup actions.
//!
//! Each popup button is an [`Action`]: an id, a label, and a handler that
//! receives the tracked selection text. The core never performs copy,
//! search or translate itself; it only runs the handler and hides.

mod registry;
mod types;

pub use registry::ActionRegistry;
pub use types::{Action, ActionHandler, ActionId};
