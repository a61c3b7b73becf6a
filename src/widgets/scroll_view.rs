//! ScrollView widget: a viewport over content larger than itself.
//!
//! The content keeps its own size. The view shows the part of it selected by
//! the scroll offset and overlays scrollbars on its last column and row when
//! the content overflows on that axis. Scrollbars are drawn after the
//! content, so they stay on top.

use std::any::Any;

use tracing::trace;

use crate::config::Theme;
use crate::error::Result;
use crate::event::input::{InputEvent, InputKind};
use crate::event::message::Scrolled;
use crate::geometry::{Extent, Offset, Orientation, Point, Region};
use crate::render::cell::Cell;
use crate::render::visual::Visual;
use crate::widget::{Context, ScrollState, ScrollbarState, Slots, Widget, WidgetId, WidgetTree};

const TRACK: char = '░';
const THUMB: char = '█';

/// A single-child scrolling viewport.
#[derive(Default)]
pub struct ScrollView {
    state: ScrollState,
    size: Extent,
}

impl ScrollView {
    /// An empty scroll view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scroll state.
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// The current scroll offset.
    pub fn offset(&self) -> Offset {
        self.state.offset()
    }

    /// Scroll horizontally by `dx`. Returns whether the view moved.
    pub fn scroll_x(&mut self, cx: &mut Context<'_>, dx: i32) -> bool {
        self.scroll_by(cx, dx, 0)
    }

    /// Scroll vertically by `dy`. Returns whether the view moved.
    pub fn scroll_y(&mut self, cx: &mut Context<'_>, dy: i32) -> bool {
        self.scroll_by(cx, 0, dy)
    }

    /// Scroll by a delta on both axes. Returns whether the view moved.
    pub fn scroll_by(&mut self, cx: &mut Context<'_>, dx: i32, dy: i32) -> bool {
        let moved = self.state.scroll_by(dx, dy);
        self.moved(cx, moved)
    }

    /// Scroll to an absolute offset, clamped. Returns whether the view moved.
    pub fn scroll_to(&mut self, cx: &mut Context<'_>, x: i32, y: i32) -> bool {
        let moved = self.state.scroll_to(x, y);
        self.moved(cx, moved)
    }

    fn moved(&mut self, cx: &mut Context<'_>, moved: bool) -> bool {
        if moved {
            trace!(id = ?cx.id(), offset = ?self.state.offset(), "scrolled");
            cx.emit(Scrolled { offset: self.state.offset() });
            cx.invalidate();
        }
        moved
    }

    fn shows_bar(&self, orientation: Orientation) -> bool {
        self.state.is_scrollable(orientation)
    }

    /// Whether `point` (in view coordinates) lies on a visible scrollbar.
    fn on_scrollbar(&self, point: Point) -> bool {
        (self.shows_bar(Orientation::Vertical) && point.x == self.size.width - 1)
            || (self.shows_bar(Orientation::Horizontal) && point.y == self.size.height - 1)
    }

    fn draw_scrollbars(&self, visual: &mut Visual, theme: &Theme) {
        let (w, h) = (visual.width(), visual.height());
        let vertical = self.shows_bar(Orientation::Vertical);
        let horizontal = self.shows_bar(Orientation::Horizontal);
        let track = Cell::styled(TRACK, theme.scrollbar_track);
        let thumb = Cell::styled(THUMB, theme.scrollbar_thumb);

        if vertical {
            let len = if horizontal { h - 1 } else { h };
            visual.fill_cell(Region::new(w - 1, 0, 1, len), track);
            let (start, size) = ScrollbarState::from_scroll_state(&self.state, Orientation::Vertical).thumb_cells(len);
            visual.fill_cell(Region::new(w - 1, start, 1, size), thumb);
        }
        if horizontal {
            let len = if vertical { w - 1 } else { w };
            visual.fill_cell(Region::new(0, h - 1, len, 1), track);
            let (start, size) =
                ScrollbarState::from_scroll_state(&self.state, Orientation::Horizontal).thumb_cells(len);
            visual.fill_cell(Region::new(start, h - 1, size, 1), thumb);
        }
    }

    fn sync_extents(&mut self, cx: &Context<'_>) {
        self.size = Extent::new(cx.width(), cx.height());
        let content = cx
            .children()
            .first()
            .and_then(|&c| cx.child_bounds(c))
            .map_or(Extent::ZERO, |b| Extent::new(b.width(), b.height()));
        self.state.set_content(content);
        self.state.set_viewport(content_viewport(self.size, content));
    }
}

/// The part of a `size` view left for content once the scrollbars it needs
/// are drawn over its last column and row. A horizontal bar can make the
/// vertical one necessary and vice versa, so this iterates to a fixed point.
fn content_viewport(size: Extent, content: Extent) -> Extent {
    let mut viewport = size;
    loop {
        let vertical = content.height > viewport.height;
        let horizontal = content.width > viewport.width;
        let next = Extent::new(
            (size.width - i32::from(vertical)).max(0),
            (size.height - i32::from(horizontal)).max(0),
        );
        if next == viewport {
            return viewport;
        }
        viewport = next;
    }
}

impl Widget for ScrollView {
    fn widget_type(&self) -> &str {
        "ScrollView"
    }

    fn slots(&self) -> Slots {
        Slots::Single
    }

    fn on_resize(&mut self, cx: &mut Context<'_>) -> Result<()> {
        self.sync_extents(cx);
        Ok(())
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let theme = *cx.theme();
        if let Some(visual) = cx.visual_mut() {
            visual.clear(Cell::blank(theme.base));
        }
        let offset = -self.state.offset();
        for child in cx.children() {
            cx.merge_child(child, offset);
        }
        if let Some(visual) = cx.visual_mut() {
            self.draw_scrollbars(visual, &theme);
        }
        Ok(())
    }

    fn on_input(&mut self, cx: &mut Context<'_>, event: &mut InputEvent) -> Result<()> {
        if event.handled {
            return Ok(());
        }
        if let InputKind::Scroll { dx, dy } = event.kind {
            if self.scroll_by(cx, dx, dy) {
                event.mark_handled();
            }
        }
        Ok(())
    }

    fn on_child_resized(&mut self, cx: &mut Context<'_>, _child: WidgetId) -> Result<()> {
        self.sync_extents(cx);
        Ok(())
    }

    fn on_child_rendered(&mut self, cx: &mut Context<'_>, _child: WidgetId) -> Result<()> {
        self.refresh_visual(cx)
    }

    fn child_offset(&self, _tree: &WidgetTree, _id: WidgetId, _child: WidgetId) -> Offset {
        -self.state.offset()
    }

    fn hovered_child(&self, tree: &WidgetTree, id: WidgetId, point: Point) -> Option<WidgetId> {
        if self.on_scrollbar(point) {
            return None;
        }
        let child = *tree.children(id).first()?;
        let region = tree.bounds(child)?.region_at(Point::ORIGIN).translate(self.child_offset(tree, id, child));
        region.contains(point).then_some(child)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRect;
    use crate::testing::visual_to_string;
    use crate::widgets::Label;
    use pretty_assertions::assert_eq;

    fn scroll_to(tree: &mut WidgetTree, view: WidgetId, x: i32, y: i32) {
        tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_to(cx, x, y))).unwrap();
    }

    fn scroller(content_w: i32, content_h: i32, text: &str) -> (WidgetTree, WidgetId, WidgetId) {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let view = tree.insert(ScrollView::new(), LayoutRect::fixed(4, 3)).unwrap();
        let label = tree.insert(Label::new(&theme, text), LayoutRect::fixed(content_w, content_h)).unwrap();
        tree.set_content(view, label).unwrap();
        (tree, view, label)
    }

    // ── Scrolling ────────────────────────────────────────────────────

    #[test]
    fn content_keeps_its_size() {
        let (tree, view, label) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        assert_eq!(tree.bounds(label).unwrap().height(), 6);
        let state = *tree.widget::<ScrollView>(view).unwrap().state();
        assert_eq!(state.max_scroll(), Offset::new(0, 3));
    }

    #[test]
    fn scroll_commands_clamp_and_report() {
        let (mut tree, view, _) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        let moved = tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_y(cx, 2))).unwrap();
        assert!(moved);
        let moved = tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_to(cx, 0, 99))).unwrap();
        assert!(moved);
        assert_eq!(tree.widget::<ScrollView>(view).unwrap().offset(), Offset::new(0, 3));
        let moved = tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_y(cx, 1))).unwrap();
        assert!(!moved);
        let scrolled = tree.drain_messages().into_iter().filter(|e| e.is::<Scrolled>()).count();
        assert_eq!(scrolled, 2);
    }

    #[test]
    fn visible_rows_follow_offset() {
        let (mut tree, view, _) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        assert_eq!(visual_to_string(tree.visual(view).unwrap()), "a  █\nb  █\nc  ░");
        tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_to(cx, 0, 3))).unwrap();
        assert_eq!(visual_to_string(tree.visual(view).unwrap()), "d  ░\ne  █\nf  █");
    }

    #[test]
    fn no_bars_when_content_fits() {
        let (tree, view, _) = scroller(2, 2, "ab");
        assert_eq!(visual_to_string(tree.visual(view).unwrap()), "ab  \n    \n    ");
    }

    #[test]
    fn bars_shrink_the_viewport() {
        assert_eq!(content_viewport(Extent::new(4, 3), Extent::new(3, 6)), Extent::new(3, 3));
        assert_eq!(content_viewport(Extent::new(4, 3), Extent::new(4, 3)), Extent::new(4, 3));
        // The vertical bar pushes 4-wide content into overflow.
        assert_eq!(content_viewport(Extent::new(4, 3), Extent::new(4, 4)), Extent::new(3, 2));
        assert_eq!(content_viewport(Extent::new(1, 1), Extent::new(5, 5)), Extent::new(0, 0));
    }

    #[test]
    fn content_under_bars_is_reachable() {
        let (mut tree, view, _) = scroller(5, 6, "a1234\nb\nc\nd\ne\nZZZZZ");
        let state = *tree.widget::<ScrollView>(view).unwrap().state();
        assert_eq!(state.viewport(), Extent::new(3, 2));
        assert_eq!(state.max_scroll(), Offset::new(2, 4));

        scroll_to(&mut tree, view, 99, 0);
        assert_eq!(visual_to_string(tree.visual(view).unwrap()).lines().next(), Some("234█"));
        scroll_to(&mut tree, view, 99, 99);
        assert_eq!(visual_to_string(tree.visual(view).unwrap()), "   ░\nZZZ█\n░██ ");
    }

    // ── Input ────────────────────────────────────────────────────────

    #[test]
    fn unhandled_scroll_moves_view() {
        let (mut tree, view, label) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        let mut event = InputEvent::at(InputKind::Scroll { dx: 0, dy: 1 }, Point::new(0, 0));
        tree.handle_input(label, &mut event).unwrap();
        assert!(event.handled);
        assert_eq!(tree.widget::<ScrollView>(view).unwrap().offset(), Offset::new(0, 1));
        assert_eq!(visual_to_string(tree.visual(view).unwrap()).lines().next(), Some("b  █"));
    }

    #[test]
    fn handled_scroll_is_ignored() {
        let (mut tree, view, label) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        let mut event = InputEvent::at(InputKind::Scroll { dx: 0, dy: 1 }, Point::new(0, 0));
        event.mark_handled();
        tree.handle_input(label, &mut event).unwrap();
        assert_eq!(tree.widget::<ScrollView>(view).unwrap().offset(), Offset::ZERO);
    }

    #[test]
    fn scrollbar_is_not_content() {
        let (mut tree, view, label) = scroller(3, 6, "a\nb\nc\nd\ne\nf");
        let hit = |tree: &WidgetTree, p| tree.with_widget(view, |w| w.hovered_child(tree, view, p)).flatten();
        assert_eq!(hit(&tree, Point::new(0, 0)), Some(label));
        assert_eq!(hit(&tree, Point::new(3, 0)), None);
        tree.with_widget_mut::<ScrollView, _>(view, |v, cx| Ok(v.scroll_y(cx, 3))).unwrap();
        assert_eq!(tree.child_offset(view, label), Offset::new(0, -3));
        assert_eq!(hit(&tree, Point::new(1, 2)), Some(label));
    }
}
