//! Selpop API - Shared types and host capabilities for the selection popup.
//!
//! Everything the core needs from its host environment is expressed here:
//! geometry, input signals, the events the popup emits, and the capability
//! traits a host implements to expose its live selection, viewport and popup.

mod capability;
mod event;
mod geometry;
mod signal;

pub use capability::*;
pub use event::*;
pub use geometry::*;
pub use signal::*;
