//! Button widget: a clickable, hover-highlighted label.
//!
//! Renders its caption centered within its bounds. A left click that no
//! descendant handled emits [`Clicked`].

use std::any::Any;

use crate::config::Theme;
use crate::error::Result;
use crate::event::input::{InputEvent, InputKind, Key};
use crate::event::message::Clicked;
use crate::render::cell::Cell;
use crate::widget::{Context, Widget};

use super::label::Justify;

/// A clickable button.
///
/// # Examples
///
/// ```ignore
/// let ok = tree.insert(Button::new(&theme, "OK"), LayoutRect::fixed(6, 1))?;
/// ```
pub struct Button {
    caption: String,
    hovered: bool,
    disabled: bool,
    theme: Theme,
}

impl Button {
    /// A button with the given caption.
    pub fn new(theme: &Theme, caption: impl Into<String>) -> Self {
        Self { caption: caption.into(), hovered: false, disabled: false, theme: *theme }
    }

    /// Set whether the button is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The caption.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Replace the caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Whether the pointer is over the button.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn focusable(&self) -> bool {
        !self.disabled
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let (width, height) = (cx.width(), cx.height());
        let colors = if self.hovered && !self.disabled { self.theme.hover } else { self.theme.button };
        let Some(visual) = cx.visual_mut() else {
            return Ok(());
        };
        visual.clear(Cell::blank(colors));
        let caption: String = self.caption.chars().take(width.max(0) as usize).collect();
        let x = Justify::Center.start(caption.chars().count() as i32, width);
        visual.write_str(x, (height - 1) / 2, &caption, colors);
        Ok(())
    }

    fn on_input(&mut self, cx: &mut Context<'_>, event: &mut InputEvent) -> Result<()> {
        match event.kind {
            InputKind::MouseEnter => {
                self.hovered = true;
                cx.invalidate();
            }
            InputKind::MouseLeave => {
                self.hovered = false;
                cx.invalidate();
            }
            InputKind::LeftClick if !event.handled && !self.disabled => {
                cx.emit(Clicked);
                event.mark_handled();
            }
            InputKind::Key(key) if !event.handled && !self.disabled && key.code == Key::Enter => {
                cx.emit(Clicked);
                event.mark_handled();
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
