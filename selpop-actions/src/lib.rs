//! Selpop Actions - Built-in popup buttons.
//!
//! Copy, web search and translate, each expressed as a
//! [`selpop_core::ActionHandler`] over a small side-effect trait so hosts
//! and tests can swap the system clipboard or browser for their own sink.

mod builtin;
mod clipboard;
mod error;
mod opener;
mod urls;

pub use builtin::{builtin_registry, CopyAction, SearchAction, TranslateAction};
pub use clipboard::{ClipboardSink, RecordingClipboard, SystemClipboard};
pub use error::ActionError;
pub use opener::{RecordingOpener, SystemOpener, UrlOpener};
pub use urls::{ActionUrls, DEFAULT_SEARCH_URL, DEFAULT_TRANSLATE_URL, TEXT_PLACEHOLDER};
