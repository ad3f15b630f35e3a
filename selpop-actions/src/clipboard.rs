//! Clipboard sinks for the copy button.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ActionError;

pub trait ClipboardSink {
    fn set_text(&self, text: &str) -> Result<(), ActionError>;
}

/// The system clipboard via `arboard`. A handle is opened per copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ActionError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Keeps every copied string in memory. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.copied.borrow().last().cloned()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), ActionError> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}
