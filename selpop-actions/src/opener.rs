//! URL openers for the search and translate buttons.

use std::cell::RefCell;
use std::process::Command;
use std::rc::Rc;

use crate::error::ActionError;

pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<(), ActionError>;
}

/// Opens URLs in the default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), ActionError> {
        let (program, mut cmd) = open_command();
        cmd.arg(url);
        cmd.spawn()
            .map_err(|source| ActionError::Launch { program, source })?;
        tracing::debug!(url, program, "opened url");
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn open_command() -> (&'static str, Command) {
    ("open", Command::new("open"))
}

#[cfg(target_os = "linux")]
fn open_command() -> (&'static str, Command) {
    ("xdg-open", Command::new("xdg-open"))
}

#[cfg(target_os = "windows")]
fn open_command() -> (&'static str, Command) {
    let mut cmd = Command::new("cmd");
    // `start` takes the first quoted argument as a window title.
    cmd.args(["/C", "start", ""]);
    ("cmd", cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn open_command() -> (&'static str, Command) {
    ("open", Command::new("open"))
}

/// Keeps every opened URL in memory. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), ActionError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
