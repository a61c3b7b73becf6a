//! Frame widget: a border around a single piece of content.

use std::any::Any;

use crate::error::Result;
use crate::geometry::Offset;
use crate::layout::LayoutRect;
use crate::render::cell::{overlay, Cell, ColorPair};
use crate::render::visual::Visual;
use crate::widget::{Context, Slots, Widget, WidgetId, WidgetTree};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// A single-child container that draws a one-cell border, with an optional
/// title in the top edge. The content is inset by one cell on every side.
#[derive(Default)]
pub struct Frame {
    title: Option<String>,
}

impl Frame {
    /// A frame without a title.
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()) }
    }

    /// The title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace the title. Takes effect on the next refresh.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// The bounds the content gets inside a frame with `bounds`.
    pub fn content_bounds(bounds: &LayoutRect) -> LayoutRect {
        LayoutRect::new(bounds.width_size().with_relative_size(-2), bounds.height_size().with_relative_size(-2))
    }
}

fn draw_border(visual: &mut Visual, colors: ColorPair) {
    let (w, h) = (visual.width(), visual.height());
    let mut put = |x: i32, y: i32, glyph: char| {
        if let Some(below) = visual.get(x, y).copied() {
            visual.set(x, y, overlay(below, Cell::styled(glyph, colors)));
        }
    };
    for x in 1..w - 1 {
        put(x, 0, HORIZONTAL);
        put(x, h - 1, HORIZONTAL);
    }
    for y in 1..h - 1 {
        put(0, y, VERTICAL);
        put(w - 1, y, VERTICAL);
    }
    put(0, 0, TOP_LEFT);
    put(w - 1, 0, TOP_RIGHT);
    put(0, h - 1, BOTTOM_LEFT);
    put(w - 1, h - 1, BOTTOM_RIGHT);
}

impl Widget for Frame {
    fn widget_type(&self) -> &str {
        "Frame"
    }

    fn slots(&self) -> Slots {
        Slots::Single
    }

    fn on_resize(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let inner = Self::content_bounds(&cx.bounds());
        for child in cx.children() {
            cx.set_child_bounds(child, inner)?;
        }
        Ok(())
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let theme = *cx.theme();
        if let Some(visual) = cx.visual_mut() {
            visual.clear(Cell::blank(theme.base));
            draw_border(visual, theme.border);
            if let Some(title) = &self.title {
                let room = (visual.width() - 4).max(0) as usize;
                let shown: String = title.chars().take(room).collect();
                visual.write_str(2, 0, &shown, theme.base.overlay(theme.border));
            }
        }
        for child in cx.children() {
            cx.merge_child(child, Offset::new(1, 1));
        }
        Ok(())
    }

    fn child_offset(&self, _tree: &WidgetTree, _id: WidgetId, _child: WidgetId) -> Offset {
        Offset::new(1, 1)
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
    use crate::config::Theme;
    use crate::error::UiError;
    use crate::layout::Size;
    use crate::testing::visual_to_string;
    use crate::widgets::Label;
    use pretty_assertions::assert_eq;

    // ── Layout ───────────────────────────────────────────────────────

    #[test]
    fn content_is_inset() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new(), LayoutRect::fixed(6, 4)).unwrap();
        let label = tree.insert(Label::new(&theme, "hi"), LayoutRect::fixed(1, 1)).unwrap();
        tree.set_content(frame, label).unwrap();
        assert_eq!(tree.bounds(label).unwrap().width(), 4);
        assert_eq!(tree.bounds(label).unwrap().height(), 2);
        assert_eq!(visual_to_string(tree.visual(frame).unwrap()), "┌────┐\n│hi  │\n│    │\n└────┘");
    }

    #[test]
    fn flexible_frame_keeps_flexible_content() {
        let outer = LayoutRect::new(Size::flex(10, 4).unwrap(), Size::fixed(3));
        let inner = Frame::content_bounds(&outer);
        assert_eq!(inner.width(), 8);
        assert_eq!(inner.width_size().min(), 2);
        assert_eq!(inner.height(), 1);
    }

    #[test]
    fn content_set_once() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new(), LayoutRect::fixed(6, 4)).unwrap();
        let a = tree.insert(Label::new(&theme, "a"), LayoutRect::fixed(1, 1)).unwrap();
        let b = tree.insert(Label::new(&theme, "b"), LayoutRect::fixed(1, 1)).unwrap();
        tree.set_content(frame, a).unwrap();
        assert!(matches!(tree.set_content(frame, b), Err(UiError::ContentAlreadySet { .. })));
    }

    // ── Title ────────────────────────────────────────────────────────

    #[test]
    fn title_is_clipped_into_top_edge() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::titled("settings"), LayoutRect::fixed(8, 3)).unwrap();
        let top = visual_to_string(tree.visual(frame).unwrap()).lines().next().unwrap().to_owned();
        assert_eq!(top, "┌─sett─┐");
    }
}
