//! Headless host: an in-memory document, viewport and popup.
//!
//! Implements every capability trait over shared state so a script (the
//! harness) or a test can mutate the "document" while the popup holds its
//! own boxed handles to the same host.

use std::cell::RefCell;
use std::rc::Rc;

use selpop_api::{Capabilities, Point, PresentationSink, Rect, SelectionSource, Size, ViewportSource};

#[derive(Debug, Default)]
struct HostState {
    text: String,
    rect: Option<Rect>,
    viewport: Size,
    scroll: Point,
    popup_size: Size,
    /// Document position of the popup while it is visible.
    popup_position: Option<Point>,
    show_count: usize,
    hide_count: usize,
    selection_clears: usize,
    released: bool,
}

/// Cloneable handle to one scripted host. All clones share state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    inner: Rc<RefCell<HostState>>,
}

impl HeadlessHost {
    pub fn new(viewport: Size, popup_size: Size) -> Self {
        let host = Self::default();
        {
            let mut state = host.inner.borrow_mut();
            state.viewport = viewport;
            state.popup_size = popup_size;
        }
        host
    }

    /// Capability bundle backed by this host.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
    }

    // =====================================================================
    // Scripting
    // =====================================================================

    /// Replace the live selection.
    pub fn select(&self, text: impl Into<String>, rect: Rect) {
        let mut state = self.inner.borrow_mut();
        state.text = text.into();
        state.rect = Some(rect);
    }

    /// Selection text with no range to measure (e.g. a collapsed range).
    pub fn select_without_range(&self, text: impl Into<String>) {
        let mut state = self.inner.borrow_mut();
        state.text = text.into();
        state.rect = None;
    }

    /// Drop the live selection without counting it as a popup-driven clear.
    pub fn deselect(&self) {
        let mut state = self.inner.borrow_mut();
        state.text.clear();
        state.rect = None;
    }

    pub fn scroll_to(&self, scroll: Point) {
        self.inner.borrow_mut().scroll = scroll;
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.borrow_mut().viewport = viewport;
    }

    pub fn set_popup_size(&self, size: Size) {
        self.inner.borrow_mut().popup_size = size;
    }

    // =====================================================================
    // Inspection
    // =====================================================================

    pub fn popup_position(&self) -> Option<Point> {
        self.inner.borrow().popup_position
    }

    pub fn current_text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn show_count(&self) -> usize {
        self.inner.borrow().show_count
    }

    pub fn hide_count(&self) -> usize {
        self.inner.borrow().hide_count
    }

    /// How many times the popup asked the host to drop the native selection.
    pub fn selection_clears(&self) -> usize {
        self.inner.borrow().selection_clears
    }

    pub fn is_released(&self) -> bool {
        self.inner.borrow().released
    }

    /// Popup bounds in viewport coordinates, if visible.
    pub fn popup_client_rect(&self) -> Option<Rect> {
        let state = self.inner.borrow();
        state
            .popup_position
            .map(|pos| Rect::from_origin_size(pos - state.scroll, state.popup_size))
    }
}

impl SelectionSource for HeadlessHost {
    fn selection_text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    fn bounding_rect(&self) -> Option<Rect> {
        self.inner.borrow().rect
    }

    fn clear_selection(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.text.clear();
        state.rect = None;
        state.selection_clears += 1;
    }
}

impl PresentationSink for HeadlessHost {
    fn show_popup_at(&mut self, position: Point) {
        let mut state = self.inner.borrow_mut();
        state.popup_position = Some(position);
        state.show_count += 1;
    }

    fn hide_popup(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.popup_position = None;
        state.hide_count += 1;
    }

    fn is_popup_visible(&self) -> bool {
        self.inner.borrow().popup_position.is_some()
    }

    fn popup_size(&self) -> Size {
        self.inner.borrow().popup_size
    }

    fn is_point_inside_popup(&self, point: Point) -> bool {
        self.popup_client_rect().is_some_and(|rect| rect.contains(point))
    }

    fn release(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.popup_position = None;
        state.released = true;
    }
}

impl ViewportSource for HeadlessHost {
    fn viewport_size(&self) -> Size {
        self.inner.borrow().viewport
    }

    fn scroll_offset(&self) -> Point {
        self.inner.borrow().scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HeadlessHost {
        HeadlessHost::new(Size::new(800.0, 600.0), Size::new(150.0, 50.0))
    }

    #[test]
    fn test_clones_share_state() {
        let a = host();
        let b = a.clone();
        a.select("hello", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(b.selection_text(), "hello");
    }

    #[test]
    fn test_show_and_hide_track_visibility() {
        let mut h = host();
        assert!(!h.is_popup_visible());

        h.show_popup_at(Point::new(10.0, 20.0));
        assert!(h.is_popup_visible());
        assert_eq!(h.popup_position(), Some(Point::new(10.0, 20.0)));

        h.hide_popup();
        assert!(!h.is_popup_visible());
        assert_eq!(h.show_count(), 1);
        assert_eq!(h.hide_count(), 1);
    }

    #[test]
    fn test_inside_popup_accounts_for_scroll() {
        let mut h = host();
        h.scroll_to(Point::new(0.0, 1000.0));
        h.show_popup_at(Point::new(100.0, 1100.0));

        // Client coordinates: popup spans x 100..250, y 100..150.
        assert!(h.is_point_inside_popup(Point::new(120.0, 120.0)));
        assert!(!h.is_point_inside_popup(Point::new(120.0, 1120.0)));
    }

    #[test]
    fn test_hidden_popup_contains_nothing() {
        let h = host();
        assert!(!h.is_point_inside_popup(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_clear_selection_counts() {
        let mut h = host();
        h.select("text", Rect::ZERO);
        h.clear_selection();
        assert_eq!(h.selection_text(), "");
        assert_eq!(h.bounding_rect(), None);
        assert_eq!(h.selection_clears(), 1);
    }
}
