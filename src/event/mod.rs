//! Event system: host and widget input, messages, key bindings, keystrokes.

pub mod binding;
pub mod handler;
pub mod input;
pub mod keystroke;
pub mod message;

pub use binding::{BindingAction, KeyBindingRegistry};
pub use handler::{bubble_path, MessageQueue};
pub use input::{HostEvent, InputEvent, InputKind, Key, KeyEvent, Modifiers, MouseButton};
pub use keystroke::{keystroke_channel, KeystrokeReader, KeystrokeSender};
pub use message::{
    Clicked, Custom, Envelope, FocusChanged, HoverChanged, InputReceived, Message, Rendered, Scrolled, Submitted,
    TextChanged,
};
