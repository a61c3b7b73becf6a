//! TextInput widget: a focusable, editable text field.
//!
//! The text is wrapped at the field's width like a label. The cursor is a
//! character index in `[0, len]`; every command that takes an index clamps
//! it. Clicking the field claims focus and places the cursor under the
//! pointer. While focused, typed characters are inserted at the cursor and the
//! cursor cell is highlighted. Enter emits [`Submitted`]; every edit emits
//! [`TextChanged`].

use std::any::Any;

use tracing::trace;

use crate::config::Theme;
use crate::error::Result;
use crate::event::input::{InputEvent, InputKind, Key, KeyEvent};
use crate::event::message::{Submitted, TextChanged};
use crate::render::cell::{overlay, Cell, Color, ColorPair};
use crate::text::TextArea;
use crate::widget::{Context, Widget};

/// An editable text field.
///
/// # Examples
///
/// ```ignore
/// let input = TextInput::new(&theme).with_placeholder("name");
/// let id = tree.insert(input, LayoutRect::fixed(20, 1))?;
/// tree.with_widget_mut::<TextInput, _>(id, |t, cx| t.set_text(cx, "Alice"))?;
/// ```
pub struct TextInput {
    area: TextArea,
    cursor: usize,
    focused: bool,
    /// First display row shown; follows the cursor.
    top: usize,
    placeholder: String,
    theme: Theme,
}

impl TextInput {
    /// An empty field.
    pub fn new(theme: &Theme) -> Self {
        Self {
            area: TextArea::empty(ColorPair::new(theme.base.fore, Color::None), 1),
            cursor: 0,
            focused: false,
            top: 0,
            placeholder: String::new(),
            theme: *theme,
        }
    }

    /// Start with `text`, cursor at the end (builder).
    pub fn with_text(mut self, text: &str) -> Self {
        self.area.set_text(text);
        self.cursor = self.area.len();
        self
    }

    /// Text shown while the field is empty (builder).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.area.text()
    }

    /// The cursor index.
    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    /// Whether the field holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the text. The cursor is clamped to the new length.
    pub fn set_text(&mut self, cx: &mut Context<'_>, text: &str) {
        self.area.set_text(text);
        self.cursor = self.cursor.min(self.area.len());
        self.changed(cx);
    }

    /// Append text; the cursor moves to the end.
    pub fn write(&mut self, cx: &mut Context<'_>, text: &str) {
        self.area.push_str(text);
        self.cursor = self.area.len();
        self.changed(cx);
    }

    /// Move the cursor, clamped to `[0, len]`. Returns whether it moved.
    pub fn set_cursor_index(&mut self, index: usize) -> bool {
        let index = index.min(self.area.len());
        let moved = index != self.cursor;
        self.cursor = index;
        moved
    }

    /// Clear the text.
    pub fn clear(&mut self, cx: &mut Context<'_>) {
        self.set_text(cx, "");
        self.cursor = 0;
    }

    fn changed(&mut self, cx: &mut Context<'_>) {
        cx.emit(TextChanged { text: self.area.text() });
        cx.invalidate();
    }

    fn insert_char(&mut self, cx: &mut Context<'_>, ch: char) {
        let mut buf = [0u8; 4];
        self.area.insert_str(self.cursor, ch.encode_utf8(&mut buf));
        self.cursor += 1;
        self.changed(cx);
    }

    fn backspace(&mut self, cx: &mut Context<'_>) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.area.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.changed(cx);
        true
    }

    fn delete_forward(&mut self, cx: &mut Context<'_>) -> bool {
        if self.cursor >= self.area.len() {
            return false;
        }
        self.area.remove(self.cursor..self.cursor + 1);
        self.changed(cx);
        true
    }

    fn move_rows(&mut self, rows: isize) -> bool {
        let (col, row) = self.area.index_to_position(self.cursor);
        let Some(target) = row.checked_add_signed(rows) else {
            return false;
        };
        if target >= self.area.height() {
            return false;
        }
        self.set_cursor_index(self.area.position_to_index(col, target))
    }

    /// Apply a key. Returns whether the key was consumed.
    fn edit(&mut self, cx: &mut Context<'_>, key: KeyEvent) -> bool {
        if let Some(ch) = key.typed_char() {
            self.insert_char(cx, ch);
            return true;
        }
        match key.code {
            Key::Enter => {
                cx.emit(Submitted { text: self.area.text() });
                true
            }
            Key::Backspace => self.backspace(cx),
            Key::Delete => self.delete_forward(cx),
            Key::Left => self.cursor > 0 && self.set_cursor_index(self.cursor - 1),
            Key::Right => self.set_cursor_index(self.cursor + 1),
            Key::Home => self.set_cursor_index(0),
            Key::End => self.set_cursor_index(self.area.len()),
            Key::Up => self.move_rows(-1),
            Key::Down => self.move_rows(1),
            _ => false,
        }
    }

    /// Cursor cell in display coordinates, before scrolling.
    fn cursor_cell(&self, width: i32) -> (i32, usize) {
        let (col, row) = self.area.index_to_position(self.cursor);
        let col = i32::try_from(col).unwrap_or(i32::MAX);
        let line_len = self.area.lines().get(row).map_or(0, |l| l.len);
        if col < width {
            (col, row)
        } else if col == width && usize::try_from(col).is_ok_and(|c| c == line_len) {
            // Just past a full line: start of the next row.
            (0, row + 1)
        } else {
            // Inside or past a word wider than the field.
            ((width - 1).max(0), row)
        }
    }

    fn follow_cursor(&mut self, width: i32, height: i32) {
        let (_, row) = self.cursor_cell(width);
        let visible = height.max(1) as usize;
        if row < self.top {
            self.top = row;
        } else if row >= self.top + visible {
            self.top = row + 1 - visible;
        }
    }
}

impl Widget for TextInput {
    fn widget_type(&self) -> &str {
        "TextInput"
    }

    fn focusable(&self) -> bool {
        true
    }

    fn on_resize(&mut self, cx: &mut Context<'_>) -> Result<()> {
        self.area.set_width(cx.width());
        Ok(())
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let (width, height) = (cx.width(), cx.height());
        self.follow_cursor(width, height);
        let background = if self.focused { self.theme.focus } else { self.theme.base };
        let Some(visual) = cx.visual_mut() else {
            return Ok(());
        };
        visual.clear(Cell::blank(background));

        if self.area.is_empty() {
            let shown: String = self.placeholder.chars().take(width.max(0) as usize).collect();
            let dim = background.overlay(ColorPair::new(Color::DarkGrey, Color::None));
            visual.write_str(0, 0, &shown, dim);
            return Ok(());
        }

        let chars = self.area.span().chars();
        for (y, line) in self.area.lines().iter().skip(self.top).take(height.max(0) as usize).enumerate() {
            for (range, colors) in self.area.span().sub_span(line.visible()).runs() {
                let text: String = chars[line.start + range.start..line.start + range.end].iter().collect();
                visual.write_str(range.start as i32, y as i32, &text, background.overlay(colors));
            }
        }
        Ok(())
    }

    fn draw(&mut self, cx: &mut Context<'_>) -> Result<()> {
        if !self.focused {
            return Ok(());
        }
        let (col, row) = self.cursor_cell(cx.width());
        let y = row as i32 - self.top as i32;
        let cursor = self.theme.cursor;
        if let Some(visual) = cx.visual_mut() {
            if let Some(below) = visual.get(col, y).copied() {
                visual.set(col, y, overlay(below, Cell::new(None, cursor.fore, cursor.back)));
            }
        }
        Ok(())
    }

    fn on_input(&mut self, cx: &mut Context<'_>, event: &mut InputEvent) -> Result<()> {
        match event.kind {
            InputKind::Focus => {
                self.focused = true;
                cx.invalidate();
            }
            InputKind::Unfocus => {
                self.focused = false;
                cx.invalidate();
            }
            InputKind::LeftClick if !event.handled => {
                if let Some(at) = event.location {
                    let row = self.top + at.y.max(0) as usize;
                    self.set_cursor_index(self.area.position_to_index(at.x.max(0) as usize, row));
                }
                cx.claim_focus();
                cx.invalidate();
                event.mark_handled();
            }
            InputKind::Key(key) if !event.handled && self.focused => {
                if self.edit(cx, key) {
                    trace!(id = ?cx.id(), cursor = self.cursor, "edited");
                    cx.invalidate();
                    event.mark_handled();
                }
            }
            _ => {}
        }
        Ok(())
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
