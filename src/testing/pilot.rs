//! Pilot: programmatic interaction with a headless interface.
//!
//! The `Pilot` wraps an [`Interface`] presenting to a [`RecordingSink`] and
//! provides methods to simulate user input (pointer moves, clicks, scrolls,
//! key presses, resize) and read the presented screen back as text.

use crate::config::InterfaceConfig;
use crate::error::Result;
use crate::event::input::{Key, KeyEvent, Modifiers, MouseButton};
use crate::event::message::Envelope;
use crate::geometry::Point;
use crate::interface::Interface;
use crate::widget::{WidgetId, WidgetTree};

use super::snapshot::{visual_to_string, RecordingSink};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless interface driver for testing.
///
/// Build the widget tree through [`tree_mut`](Self::tree_mut), bind its root
/// with [`set_root`](Self::set_root), then drive it.
///
/// # Examples
///
/// ```ignore
/// use cellframe::testing::Pilot;
///
/// let mut pilot = Pilot::new(20, 3);
/// let input = pilot.tree_mut().insert(TextInput::new(&theme), LayoutRect::fixed(20, 3))?;
/// pilot.set_root(input)?;
/// pilot.click(0, 0)?;
/// pilot.type_text("hello")?;
/// assert!(pilot.screen_text().starts_with("hello"));
/// ```
pub struct Pilot {
    interface: Interface<RecordingSink>,
    width: i32,
    height: i32,
}

impl Pilot {
    /// A headless interface of the given size with the default configuration.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(width, height, InterfaceConfig::default())
    }

    /// A headless interface of the given size and configuration.
    pub fn with_config(width: i32, height: i32, config: InterfaceConfig) -> Self {
        Self { interface: Interface::new(RecordingSink::new(), config), width, height }
    }

    /// Bind `root` and lay it out at the pilot's size.
    pub fn set_root(&mut self, root: WidgetId) -> Result<()> {
        self.interface.set_root(root, self.width, self.height)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Move the pointer to (x, y). Returns whether the hovered widget changed.
    pub fn move_mouse(&mut self, x: i32, y: i32) -> Result<bool> {
        self.interface.mouse_move(Point::new(x, y))
    }

    /// Left-click at (x, y).
    pub fn click(&mut self, x: i32, y: i32) -> Result<bool> {
        self.interface.click(Point::new(x, y), MouseButton::Left)
    }

    /// Right-click at (x, y).
    pub fn right_click(&mut self, x: i32, y: i32) -> Result<bool> {
        self.interface.click(Point::new(x, y), MouseButton::Right)
    }

    /// Scroll at (x, y).
    pub fn scroll(&mut self, x: i32, y: i32, dx: i32, dy: i32) -> Result<bool> {
        self.interface.scroll(Point::new(x, y), dx, dy)
    }

    /// Press a key with no modifiers.
    pub fn press_key(&mut self, key: Key) -> Result<bool> {
        self.interface.key(KeyEvent::plain(key))
    }

    /// Press a key with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> Result<bool> {
        self.interface.key(KeyEvent::new(key, modifiers))
    }

    /// Press one key per character of `text`.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            self.press_key(Key::Char(ch))?;
        }
        Ok(())
    }

    /// Resize the interface.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.interface.resize(width, height)
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The last presented frame as text, or an empty string if nothing has
    /// been presented yet.
    pub fn screen_text(&self) -> String {
        self.interface.sink().last_frame().map(visual_to_string).unwrap_or_default()
    }

    /// The recorded frames.
    pub fn sink(&self) -> &RecordingSink {
        self.interface.sink()
    }

    /// Drain queued messages.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.interface.drain_messages()
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        self.interface.tree()
    }

    /// Mutable access to the widget tree. Call [`flush`](Self::flush) to
    /// present changes made through it.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.interface.tree_mut()
    }

    /// Present any frame produced by direct tree changes.
    pub fn flush(&mut self) -> Result<()> {
        self.interface.flush()
    }

    /// The interface being driven.
    pub fn interface(&self) -> &Interface<RecordingSink> {
        &self.interface
    }

    /// Mutable access to the interface being driven.
    pub fn interface_mut(&mut self) -> &mut Interface<RecordingSink> {
        &mut self.interface
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::event::message::{Clicked, Submitted};
    use crate::geometry::Orientation;
    use crate::layout::LayoutRect;
    use crate::widgets::{Button, Label, Stack, TextInput};
    use pretty_assertions::assert_eq;

    /// A 10x3 column: a one-line label, an input, a button.
    fn form() -> (Pilot, WidgetId, WidgetId) {
        let theme = Theme::default();
        let mut pilot = Pilot::new(10, 3);
        let tree = pilot.tree_mut();
        let column = tree.insert(Stack::new(Orientation::Vertical), LayoutRect::fixed(10, 3)).unwrap();
        tree.insert_child(column, Label::new(&theme, "Name:"), LayoutRect::fixed(10, 1)).unwrap();
        let input = tree.insert_child(column, TextInput::new(&theme), LayoutRect::fixed(10, 1)).unwrap();
        let button = tree.insert_child(column, Button::new(&theme, "OK"), LayoutRect::fixed(10, 1)).unwrap();
        pilot.set_root(column).unwrap();
        (pilot, input, button)
    }

    #[test]
    fn presents_on_root_bind() {
        let (pilot, _, _) = form();
        assert_eq!(pilot.sink().frame_count(), 1);
        assert_eq!(pilot.screen_text().lines().next(), Some("Name:     "));
    }

    #[test]
    fn typing_into_clicked_input() {
        let (mut pilot, input, _) = form();
        pilot.click(0, 1).unwrap();
        assert_eq!(pilot.interface().focused(), Some(input));
        pilot.type_text("bob").unwrap();
        pilot.press_key(Key::Enter).unwrap();
        assert_eq!(pilot.tree().widget::<TextInput>(input).unwrap().text(), "bob");
        assert!(pilot.screen_text().lines().nth(1).unwrap().starts_with("bob"));
        let submitted: Vec<_> =
            pilot.drain_messages().into_iter().filter_map(|e| e.downcast_ref::<Submitted>().cloned()).collect();
        assert_eq!(submitted, vec![Submitted { text: "bob".into() }]);
    }

    #[test]
    fn clicking_the_button() {
        let (mut pilot, _, button) = form();
        assert!(pilot.move_mouse(4, 2).unwrap());
        assert!(pilot.tree().widget::<Button>(button).unwrap().is_hovered());
        pilot.click(4, 2).unwrap();
        let clicks = pilot.drain_messages().iter().filter(|e| e.is::<Clicked>() && e.sender == button).count();
        assert_eq!(clicks, 1);
    }

    #[test]
    fn resize_relays_out() {
        let theme = Theme::default();
        let mut pilot = Pilot::new(6, 1);
        let label = pilot.tree_mut().insert(Label::new(&theme, "hey"), LayoutRect::fixed(6, 1)).unwrap();
        pilot.set_root(label).unwrap();
        assert_eq!(pilot.screen_text(), "hey   ");
        pilot.resize(4, 1).unwrap();
        assert_eq!(pilot.screen_text(), "hey ");
    }
}
