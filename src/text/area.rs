//! TextArea: a [`TextSpan`] wrapped at a width, with cached display lines.
//!
//! Every mutation re-derives the lines. Mutators return `Some(height)` only
//! when the number of lines changed, which is the signal text widgets use to
//! grow or shrink themselves.

use std::ops::Range;

use crate::render::cell::ColorPair;

use super::span::TextSpan;
use super::wrap::{wrap, DisplayLine};

/// Wrapped, colored text with index/position mapping.
#[derive(Clone, Debug)]
pub struct TextArea {
    span: TextSpan,
    width: i32,
    lines: Vec<DisplayLine>,
}

impl TextArea {
    /// Wrap `span` at `width`.
    pub fn new(span: TextSpan, width: i32) -> Self {
        let lines = wrap(span.chars(), width);
        Self { span, width, lines }
    }

    /// An empty area in the given root color.
    pub fn empty(colors: ColorPair, width: i32) -> Self {
        Self::new(TextSpan::empty(colors), width)
    }

    // -- accessors ----------------------------------------------------------

    /// The underlying span.
    pub fn span(&self) -> &TextSpan {
        &self.span
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.span.text()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Whether there is no text.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Wrap width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of display lines (at least 1).
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// The cached display lines.
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// Visible text of one display line.
    pub fn line_text(&self, row: usize) -> Option<String> {
        self.lines.get(row).map(|line| self.span.slice(line.visible()))
    }

    /// Visible text of one display line, with its colors.
    pub fn line_span(&self, row: usize) -> Option<TextSpan> {
        self.lines.get(row).map(|line| self.span.sub_span(line.visible()))
    }

    // -- mutation -----------------------------------------------------------

    /// Replace the text, keeping the root color.
    pub fn set_text(&mut self, text: &str) -> Option<usize> {
        self.span.set_text(text);
        self.rewrap()
    }

    /// Replace the whole span.
    pub fn set_span(&mut self, span: TextSpan) -> Option<usize> {
        self.span = span;
        self.rewrap()
    }

    /// Append text in the color in effect at the end.
    pub fn push_str(&mut self, text: &str) -> Option<usize> {
        self.span.push_str(text);
        self.rewrap()
    }

    /// Append text in its own color.
    pub fn push_colored(&mut self, text: &str, colors: ColorPair) -> Option<usize> {
        self.span.push_colored(text, colors);
        self.rewrap()
    }

    /// Insert text at a character index (clamped).
    pub fn insert_str(&mut self, index: usize, text: &str) -> Option<usize> {
        self.span.insert_str(index, text);
        self.rewrap()
    }

    /// Remove a character range (clamped).
    pub fn remove(&mut self, range: Range<usize>) -> Option<usize> {
        self.span.remove(range);
        self.rewrap()
    }

    /// Change the wrap width.
    pub fn set_width(&mut self, width: i32) -> Option<usize> {
        if width == self.width {
            return None;
        }
        self.width = width;
        self.rewrap()
    }

    fn rewrap(&mut self) -> Option<usize> {
        let before = self.lines.len();
        self.lines = wrap(self.span.chars(), self.width);
        (self.lines.len() != before).then_some(self.lines.len())
    }

    // -- mapping ------------------------------------------------------------

    /// The (column, row) at which character `index` is displayed.
    ///
    /// `index` is clamped to `[0, len]`; `len` maps to just past the last
    /// character, which is where a cursor appending text sits.
    pub fn index_to_position(&self, index: usize) -> (usize, usize) {
        let index = index.min(self.len());
        let row = self
            .lines
            .iter()
            .rposition(|line| line.start <= index)
            .unwrap_or(0);
        let line = &self.lines[row];
        (index - line.start, row)
    }

    /// The character index displayed at (column, row), both clamped to the
    /// visible text.
    pub fn position_to_index(&self, col: usize, row: usize) -> usize {
        let row = row.min(self.lines.len().saturating_sub(1));
        let line = &self.lines[row];
        line.start + col.min(line.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell::Color;
    use pretty_assertions::assert_eq;

    fn area(text: &str, width: i32) -> TextArea {
        TextArea::new(TextSpan::new(text, ColorPair::new(Color::White, Color::None)), width)
    }

    fn texts(area: &TextArea) -> Vec<String> {
        (0..area.height()).filter_map(|row| area.line_text(row)).collect()
    }

    // ── Height notification ──────────────────────────────────────────

    #[test]
    fn height_changes_reported_only_on_line_count_change() {
        let mut a = area("hello", 6);
        assert_eq!(a.height(), 1);
        assert_eq!(a.push_str("!"), None);
        assert_eq!(a.push_str(" world"), Some(2));
        assert_eq!(a.push_str("s"), None);
        assert_eq!(a.set_text(""), Some(1));
    }

    #[test]
    fn set_width_rewraps() {
        let mut a = area("hello world foo", 20);
        assert_eq!(a.height(), 1);
        assert_eq!(a.set_width(6), Some(3));
        assert_eq!(texts(&a), vec!["hello", "world", "foo"]);
        assert_eq!(a.set_width(6), None);
        assert_eq!(a.set_width(11), Some(2));
        assert_eq!(texts(&a), vec!["hello world", "foo"]);
    }

    #[test]
    fn insert_and_remove() {
        let mut a = area("ab", 10);
        a.insert_str(1, "\n");
        assert_eq!(texts(&a), vec!["a", "b"]);
        assert_eq!(a.remove(1..2), Some(1));
        assert_eq!(a.text(), "ab");
    }

    // ── Mapping ──────────────────────────────────────────────────────

    #[test]
    fn index_to_position_across_soft_breaks() {
        let a = area("hello world foo", 6);
        assert_eq!(a.index_to_position(0), (0, 0));
        assert_eq!(a.index_to_position(4), (4, 0));
        assert_eq!(a.index_to_position(6), (0, 1));
        assert_eq!(a.index_to_position(12), (0, 2));
        assert_eq!(a.index_to_position(15), (3, 2));
        assert_eq!(a.index_to_position(99), (3, 2));
    }

    #[test]
    fn index_to_position_after_newline() {
        let a = area("ab\n", 10);
        assert_eq!(a.index_to_position(2), (2, 0));
        assert_eq!(a.index_to_position(3), (0, 1));
    }

    #[test]
    fn position_to_index_clamps() {
        let a = area("hello world foo", 6);
        assert_eq!(a.position_to_index(0, 1), 6);
        assert_eq!(a.position_to_index(50, 0), 5);
        assert_eq!(a.position_to_index(1, 50), 13);
    }

    #[test]
    fn line_span_keeps_colors() {
        let mut a = area("hello world", 6);
        let red = ColorPair::new(Color::Red, Color::None);
        let mut span = a.span().clone();
        span.set_color_range(6..8, red);
        a.set_span(span);
        let line = a.line_span(1).unwrap();
        assert_eq!(line.text(), "world");
        assert_eq!(line.color_at(0), red);
        assert_eq!(line.color_at(2).fore, Color::White);
    }
}
