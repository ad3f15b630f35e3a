//! Capability traits implemented by the host environment.
//!
//! The core never touches a document, window or widget directly. A host
//! (browser bridge, native toolkit, headless test double) implements these
//! traits and hands boxed instances to the popup, which owns them until
//! teardown.

use crate::{Point, Rect, Size};

/// Read access to the live document selection.
pub trait SelectionSource {
    /// The selected text, untrimmed. Empty when nothing is selected.
    fn selection_text(&self) -> String;

    /// Bounding box of the selection's first range, in viewport
    /// coordinates. `None` when the selection has no range.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Drop the native selection.
    fn clear_selection(&mut self);
}

/// The popup surface.
pub trait PresentationSink {
    /// Show the popup with its top-left at `position` (document coordinates).
    fn show_popup_at(&mut self, position: Point);

    fn hide_popup(&mut self);

    fn is_popup_visible(&self) -> bool;

    /// Current rendered size of the popup.
    fn popup_size(&self) -> Size;

    /// Whether a pointer at `point` (viewport coordinates) hits the popup.
    fn is_point_inside_popup(&self, point: Point) -> bool;

    /// Release the popup surface. Called once on teardown.
    fn release(&mut self) {}
}

/// Geometry of the visible window area.
pub trait ViewportSource {
    fn viewport_size(&self) -> Size;

    /// Current document scroll position.
    fn scroll_offset(&self) -> Point;
}

/// The capability bundle a popup instance owns.
pub struct Capabilities {
    pub selection: Box<dyn SelectionSource>,
    pub presenter: Box<dyn PresentationSink>,
    pub viewport: Box<dyn ViewportSource>,
}

impl Capabilities {
    pub fn new(
        selection: Box<dyn SelectionSource>,
        presenter: Box<dyn PresentationSink>,
        viewport: Box<dyn ViewportSource>,
    ) -> Self {
        Self {
            selection,
            presenter,
            viewport,
        }
    }
}
