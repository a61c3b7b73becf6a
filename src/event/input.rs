//! Input event types.
//!
//! Two layers live here. [`HostEvent`] is what a backend reports: a mouse or
//! keyboard signal with an absolute cell position. [`InputEvent`] is what a
//! widget receives: a normalized kind, a location in that widget's own
//! coordinates and a `handled` flag that travels with it while it bubbles.
//!
//! Crossterm events are converted via [`HostEvent::from_crossterm`] so the rest
//! of the toolkit never depends on crossterm directly.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(code: Key) -> Self {
        Self { code, modifiers: Modifiers::NONE }
    }

    /// The character this key types, if any. Ctrl and Alt chords type nothing.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            Key::Char(c) if !self.modifiers.contains(Modifiers::CTRL) && !self.modifiers.contains(Modifiers::ALT) => {
                Some(c)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// HostEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A backend-level event. Positions are absolute cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The pointer moved (or dragged) to a cell.
    MouseMove(Point),
    /// A mouse button went down.
    MouseDown { button: MouseButton, at: Point },
    /// A wheel step. Positive `dy` scrolls down, positive `dx` right.
    Scroll { dx: i32, dy: i32, at: Point },
    /// A key was pressed.
    Key(KeyEvent),
    /// The backend surface changed size.
    Resize { width: u16, height: u16 },
}

impl HostEvent {
    /// Normalize a crossterm event.
    ///
    /// Returns `None` for events the toolkit does not route: key releases and
    /// repeats, button releases, focus changes, pastes and unmapped keys.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<HostEvent> {
        use crossterm::event::{Event, KeyEventKind, MouseEventKind};

        match event {
            Event::Key(ke) if ke.kind == KeyEventKind::Press => convert_key(ke).map(HostEvent::Key),
            Event::Mouse(me) => {
                let at = Point::new(i32::from(me.column), i32::from(me.row));
                match me.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(HostEvent::MouseMove(at)),
                    MouseEventKind::Down(b) => Some(HostEvent::MouseDown { button: convert_mouse_button(b), at }),
                    MouseEventKind::ScrollUp => Some(HostEvent::Scroll { dx: 0, dy: -1, at }),
                    MouseEventKind::ScrollDown => Some(HostEvent::Scroll { dx: 0, dy: 1, at }),
                    MouseEventKind::ScrollLeft => Some(HostEvent::Scroll { dx: -1, dy: 0, at }),
                    MouseEventKind::ScrollRight => Some(HostEvent::Scroll { dx: 1, dy: 0, at }),
                    MouseEventKind::Up(_) => None,
                }
            }
            Event::Resize(width, height) => Some(HostEvent::Resize { width, height }),
            _ => None,
        }
    }
}

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_key(ct: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode;

    let code = match ct.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(KeyEvent { code, modifiers: convert_modifiers(ct.modifiers) })
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// What happened, from a widget's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    MouseMove,
    MouseEnter,
    MouseLeave,
    LeftClick,
    RightClick,
    Scroll { dx: i32, dy: i32 },
    Key(KeyEvent),
    Focus,
    Unfocus,
}

impl InputKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::MouseMove => "MouseMove",
            InputKind::MouseEnter => "MouseEnter",
            InputKind::MouseLeave => "MouseLeave",
            InputKind::LeftClick => "LeftClick",
            InputKind::RightClick => "RightClick",
            InputKind::Scroll { .. } => "Scroll",
            InputKind::Key(_) => "Key",
            InputKind::Focus => "Focus",
            InputKind::Unfocus => "Unfocus",
        }
    }
}

/// An event delivered to a widget.
///
/// `location` is relative to the widget currently looking at the event; the
/// tree rewrites it as the event bubbles to each ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub location: Option<Point>,
    pub handled: bool,
}

impl InputEvent {
    /// An event without a location (keys, focus changes).
    pub fn new(kind: InputKind) -> Self {
        Self { kind, location: None, handled: false }
    }

    /// A pointer event at `location`.
    pub fn at(kind: InputKind, location: Point) -> Self {
        Self { kind, location: Some(location), handled: false }
    }

    /// A key press.
    pub fn key(key: KeyEvent) -> Self {
        Self::new(InputKind::Key(key))
    }

    /// Mark the event as consumed. Ancestors still see it.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
