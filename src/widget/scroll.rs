//! Scroll state and scrollbar geometry.
//!
//! `ScrollState` tracks the scroll position of a viewport over larger content,
//! clamping every move. `ScrollbarState` turns that into thumb placement on a
//! scrollbar track measured in cells.

use crate::geometry::{Extent, Offset, Orientation, Region};

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// The scroll position of a viewport over its content.
///
/// The offset is always clamped to `[0, max_scroll]` where
/// `max_scroll = content - viewport` (clamped to zero) on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    offset: Offset,
    content: Extent,
    viewport: Extent,
}

impl ScrollState {
    /// Create a scroll state at the origin.
    pub fn new(content: Extent, viewport: Extent) -> Self {
        Self { offset: Offset::ZERO, content, viewport }
    }

    /// The current offset of the viewport into the content.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The content extent.
    pub fn content(&self) -> Extent {
        self.content
    }

    /// The viewport extent.
    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    /// The largest reachable offset on each axis.
    pub fn max_scroll(&self) -> Offset {
        Offset::new(
            (self.content.width - self.viewport.width).max(0),
            (self.content.height - self.viewport.height).max(0),
        )
    }

    /// Scroll to an absolute position, clamped. Returns whether the offset
    /// changed.
    pub fn scroll_to(&mut self, x: i32, y: i32) -> bool {
        let max = self.max_scroll();
        let next = Offset::new(x.clamp(0, max.dx), y.clamp(0, max.dy));
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    /// Scroll by a relative delta, clamped. Returns whether the offset
    /// changed.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> bool {
        self.scroll_to(self.offset.dx.saturating_add(dx), self.offset.dy.saturating_add(dy))
    }

    /// Whether the content overflows the viewport along `orientation`.
    pub fn is_scrollable(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.content.width > self.viewport.width,
            Orientation::Vertical => self.content.height > self.viewport.height,
        }
    }

    /// The part of the content currently visible.
    pub fn visible_region(&self) -> Region {
        Region::new(self.offset.dx, self.offset.dy, self.viewport.width, self.viewport.height)
    }

    /// Update the content extent and re-clamp the offset.
    pub fn set_content(&mut self, content: Extent) {
        self.content = content;
        self.scroll_to(self.offset.dx, self.offset.dy);
    }

    /// Update the viewport extent and re-clamp the offset.
    pub fn set_viewport(&mut self, viewport: Extent) {
        self.viewport = viewport;
        self.scroll_to(self.offset.dx, self.offset.dy);
    }
}

// ---------------------------------------------------------------------------
// ScrollbarState
// ---------------------------------------------------------------------------

/// Thumb placement on a scrollbar.
///
/// `thumb_position` and `thumb_size` are fractions in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarState {
    /// 0.0 at the start of the track, 1.0 at the end.
    pub thumb_position: f32,
    /// Viewport / content ratio.
    pub thumb_size: f32,
}

impl ScrollbarState {
    /// Compute scrollbar state for one axis.
    pub fn from_scroll_state(state: &ScrollState, orientation: Orientation) -> Self {
        let (content, viewport, offset) = match orientation {
            Orientation::Horizontal => (state.content.width, state.viewport.width, state.offset.dx),
            Orientation::Vertical => (state.content.height, state.viewport.height, state.offset.dy),
        };

        if content <= 0 || viewport <= 0 {
            return ScrollbarState { thumb_position: 0.0, thumb_size: 1.0 };
        }

        let thumb_size = (viewport as f32 / content as f32).clamp(0.0, 1.0);
        let max_scroll = (content - viewport).max(0);
        let thumb_position = if max_scroll > 0 { offset as f32 / max_scroll as f32 } else { 0.0 };

        ScrollbarState { thumb_position: thumb_position.clamp(0.0, 1.0), thumb_size }
    }

    /// The thumb as `(start, length)` in cells on a track of `track` cells.
    ///
    /// The thumb is at least one cell long and always lies inside the track.
    pub fn thumb_cells(&self, track: i32) -> (i32, i32) {
        if track <= 0 {
            return (0, 0);
        }
        let len = ((self.thumb_size * track as f32).round() as i32).clamp(1, track);
        let start = ((track - len) as f32 * self.thumb_position).round() as i32;
        (start.clamp(0, track - len), len)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScrollState {
        ScrollState::new(Extent::new(100, 200), Extent::new(40, 30))
    }

    // ── Clamping ─────────────────────────────────────────────────────

    #[test]
    fn max_scroll_per_axis() {
        assert_eq!(state().max_scroll(), Offset::new(60, 170));
        let small = ScrollState::new(Extent::new(10, 10), Extent::new(40, 30));
        assert_eq!(small.max_scroll(), Offset::ZERO);
    }

    #[test]
    fn scroll_to_clamps_and_reports_effect() {
        let mut s = state();
        assert!(s.scroll_to(20, 50));
        assert_eq!(s.offset(), Offset::new(20, 50));
        assert!(!s.scroll_to(20, 50));

        assert!(s.scroll_to(999, 999));
        assert_eq!(s.offset(), Offset::new(60, 170));
        assert!(!s.scroll_to(1000, 1000));

        assert!(s.scroll_to(-10, -5));
        assert_eq!(s.offset(), Offset::ZERO);
    }

    #[test]
    fn scroll_by_is_relative() {
        let mut s = state();
        assert!(s.scroll_by(5, 7));
        assert!(s.scroll_by(5, 7));
        assert_eq!(s.offset(), Offset::new(10, 14));
        assert!(s.scroll_by(-50, 0));
        assert_eq!(s.offset().dx, 0);
    }

    #[test]
    fn shrinking_content_reclamps() {
        let mut s = state();
        s.scroll_to(60, 170);
        s.set_content(Extent::new(50, 40));
        assert_eq!(s.offset(), Offset::new(10, 10));
        s.set_viewport(Extent::new(50, 40));
        assert_eq!(s.offset(), Offset::ZERO);
        assert!(!s.is_scrollable(Orientation::Vertical));
    }

    #[test]
    fn visible_region_follows_offset() {
        let mut s = state();
        s.scroll_to(3, 4);
        assert_eq!(s.visible_region(), Region::new(3, 4, 40, 30));
    }

    // ── Scrollbar ────────────────────────────────────────────────────

    #[test]
    fn scrollbar_fractions() {
        let mut s = ScrollState::new(Extent::new(10, 40), Extent::new(10, 10));
        let bar = ScrollbarState::from_scroll_state(&s, Orientation::Vertical);
        assert_eq!(bar.thumb_position, 0.0);
        assert_eq!(bar.thumb_size, 0.25);

        s.scroll_to(0, 30);
        let bar = ScrollbarState::from_scroll_state(&s, Orientation::Vertical);
        assert_eq!(bar.thumb_position, 1.0);
    }

    #[test]
    fn thumb_cells_stay_on_track() {
        let mut s = ScrollState::new(Extent::new(10, 40), Extent::new(10, 10));
        let bar = ScrollbarState::from_scroll_state(&s, Orientation::Vertical);
        assert_eq!(bar.thumb_cells(10), (0, 3));

        s.scroll_to(0, 30);
        let bar = ScrollbarState::from_scroll_state(&s, Orientation::Vertical);
        assert_eq!(bar.thumb_cells(10), (7, 3));

        let huge = ScrollState::new(Extent::new(1, 10_000), Extent::new(1, 5));
        let bar = ScrollbarState::from_scroll_state(&huge, Orientation::Vertical);
        assert_eq!(bar.thumb_cells(5), (0, 1));
        assert_eq!(bar.thumb_cells(0), (0, 0));
    }

    #[test]
    fn no_content_is_full_thumb() {
        let s = ScrollState::default();
        let bar = ScrollbarState::from_scroll_state(&s, Orientation::Horizontal);
        assert_eq!(bar, ScrollbarState { thumb_position: 0.0, thumb_size: 1.0 });
    }
}
