//! Viewport-aware popup placement.
//!
//! The popup prefers the bottom-right corner of the selection. When that
//! would overflow the viewport it flips to the opposite side of the
//! selection, and a final clamp keeps it inside the visible area whenever it
//! fits there at all.

use selpop_api::{Offset, Point, Rect, Size};

/// Compute the popup's top-left corner in document coordinates.
///
/// `selection` is in viewport coordinates; `scroll` is the document scroll
/// position. The result is a pure function of the inputs.
pub fn compute_position(
    selection: Rect,
    popup: Size,
    viewport: Size,
    scroll: Point,
    offset: Offset,
) -> Point {
    // Base position: bottom right of the selection.
    let mut left = selection.right + offset.x + scroll.x;
    let mut top = selection.bottom + offset.y + scroll.y;

    if left + popup.width > viewport.width + scroll.x {
        left = selection.left - popup.width - offset.x + scroll.x;
        if left < scroll.x {
            left = scroll.x + offset.x;
        }
    }

    if top + popup.height > viewport.height + scroll.y {
        top = selection.top - popup.height - offset.y + scroll.y;
        if top < scroll.y {
            // No room above either: bottom-align in the viewport.
            top = scroll.y + viewport.height - popup.height - offset.y;
        }
    }

    let left = clamp_lower_wins(
        left,
        scroll.x + offset.x,
        scroll.x + viewport.width - popup.width - offset.x,
    );
    let top = clamp_lower_wins(
        top,
        scroll.y + offset.y,
        scroll.y + viewport.height - popup.height - offset.y,
    );

    Point::new(left, top)
}

/// `max(lo, min(value, hi))`. Unlike `f32::clamp` this tolerates `lo > hi`
/// (a popup larger than the viewport) and resolves it to `lo`.
#[inline]
fn clamp_lower_wins(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}
