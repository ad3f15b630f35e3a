//! Scenario files: a scripted document plus timed input.

use std::path::Path;

use anyhow::Context;
use selpop_actions::ActionUrls;
use selpop_api::{Rect, Signal, Size};
use selpop_core::PopupOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub viewport: Size,
    pub popup: Size,
    #[serde(default)]
    pub options: PopupOptions,
    #[serde(default)]
    pub urls: ActionUrls,
    pub steps: Vec<Step>,
}

/// One scripted operation at `at_ms` after the start of the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub op: Op,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Replace the document selection.
    Select { text: String, rect: Rect },
    ClearSelection,
    ScrollTo { x: f32, y: f32 },
    /// Resize the window.
    ResizeViewport { width: f32, height: f32 },
    /// Change the popup's rendered size (e.g. after adding a button).
    ResizePopup { width: f32, height: f32 },
    Signal { signal: Signal },
    /// Press a popup button.
    Invoke { action: String },
}

impl Scenario {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let scenario: Self = serde_json::from_str(json).context("invalid scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&contents).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.options.validate()?;
        self.urls.validate()?;
        if let Some(pair) = self.steps.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            anyhow::bail!(
                "steps out of order: {}ms follows {}ms",
                pair[1].at_ms,
                pair[0].at_ms
            );
        }
        Ok(())
    }

    /// Time of the last step.
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selpop_api::MouseButton;

    const SCENARIO: &str = r#"{
        "viewport": {"width": 800, "height": 600},
        "popup": {"width": 150, "height": 50},
        "options": {"debounce_delay_ms": 80},
        "steps": [
            {"at_ms": 0, "op": "signal", "signal": {"type": "pointer_down", "button": "primary", "position": {"x": 10, "y": 10}}},
            {"at_ms": 5, "op": "select", "text": "hi", "rect": {"left": 10, "top": 10, "right": 40, "bottom": 30}},
            {"at_ms": 200, "op": "scroll_to", "x": 0, "y": 120},
            {"at_ms": 300, "op": "invoke", "action": "copy"},
            {"at_ms": 400, "op": "clear_selection"},
            {"at_ms": 450, "op": "resize_viewport", "width": 640, "height": 480},
            {"at_ms": 460, "op": "resize_popup", "width": 200, "height": 40}
        ]
    }"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_json_str(SCENARIO).unwrap();
        assert_eq!(scenario.viewport, Size::new(800.0, 600.0));
        assert_eq!(scenario.options.debounce_delay_ms, 80);
        assert_eq!(scenario.options.offset_x, 5.0);
        assert_eq!(scenario.urls, ActionUrls::default());
        assert_eq!(scenario.steps.len(), 7);
        assert_eq!(scenario.duration_ms(), 460);

        assert!(matches!(
            scenario.steps[0].op,
            Op::Signal {
                signal: Signal::PointerDown {
                    button: MouseButton::Primary,
                    ..
                }
            }
        ));
        assert!(matches!(&scenario.steps[1].op, Op::Select { text, .. } if text == "hi"));
        assert!(matches!(scenario.steps[2].op, Op::ScrollTo { x, y } if x == 0.0 && y == 120.0));
        assert!(matches!(scenario.steps[4].op, Op::ClearSelection));
        assert!(matches!(
            scenario.steps[5].op,
            Op::ResizeViewport { width, height } if width == 640.0 && height == 480.0
        ));
        assert!(matches!(scenario.steps[6].op, Op::ResizePopup { width, .. } if width == 200.0));
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let json = r#"{
            "viewport": {"width": 800, "height": 600},
            "popup": {"width": 150, "height": 50},
            "steps": [
                {"at_ms": 100, "op": "clear_selection"},
                {"at_ms": 50, "op": "clear_selection"}
            ]
        }"#;
        let err = Scenario::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_unknown_op_rejected() {
        let json = r#"{
            "viewport": {"width": 800, "height": 600},
            "popup": {"width": 150, "height": 50},
            "steps": [{"at_ms": 0, "op": "teleport"}]
        }"#;
        assert!(Scenario::from_json_str(json).is_err());
    }
}
