//! Popup options.
//!
//! Options deserialize with `#[serde(default)]`, so a partial user document
//! is merged field by field over the defaults.

use std::path::Path;
use std::time::Duration;

use selpop_api::Offset;
use serde::{Deserialize, Serialize};

use crate::error::PopupError;

/// Default margin between selection and popup, in pixels.
pub const DEFAULT_OFFSET: f32 = 5.0;

/// Default pointer-release debounce, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Debounce applied to selection-change notifications. Not configurable.
pub const SELECTION_CHANGE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    /// Horizontal margin around the popup.
    pub offset_x: f32,
    /// Vertical margin around the popup.
    pub offset_y: f32,
    /// Delay between a primary-button release and the selection evaluation.
    pub debounce_delay_ms: u64,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            offset_x: DEFAULT_OFFSET,
            offset_y: DEFAULT_OFFSET,
            debounce_delay_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl PopupOptions {
    /// Parse options from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PopupError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PopupError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), PopupError> {
        for (name, value) in [("offset_x", self.offset_x), ("offset_y", self.offset_y)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PopupError::InvalidOptions(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.offset_x, self.offset_y)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }
}
