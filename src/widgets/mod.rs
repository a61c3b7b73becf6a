//! Built-in widgets: Label, Stack, Frame, ScrollView, TextInput, Button.

pub mod button;
pub mod frame;
pub mod label;
pub mod scroll_view;
pub mod stack;
pub mod text_input;

pub use button::Button;
pub use frame::Frame;
pub use label::{Justify, Label};
pub use scroll_view::ScrollView;
pub use stack::Stack;
pub use text_input::TextInput;
