//! Message trait, envelope, and the semantic messages widgets emit.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with the id of the widget that sent it.
//! Applications observe the toolkit by draining these from the interface.

use std::any::Any;

use crate::geometry::Offset;
use crate::widget::node::WidgetId;

use super::input::InputKind;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// All messages must implement `as_any` for downcasting and `message_name`
/// for debug/logging purposes.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

/// Implements [`Message`] for a type, naming it after the type.
macro_rules! message {
    ($ty:ident) => {
        impl Message for $ty {
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn message_name(&self) -> &str {
                stringify!($ty)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The widget that sent this message.
    pub sender: WidgetId,
}

impl Envelope {
    /// Wrap a message.
    pub fn new(message: impl Message, sender: WidgetId) -> Self {
        Self { message: Box::new(message), sender }
    }

    /// Wrap an already boxed message.
    pub fn boxed(message: Box<dyn Message>, sender: WidgetId) -> Self {
        Self { message, sender }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Whether the message is of type `T`.
    pub fn is<T: Message>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// The message name.
    pub fn name(&self) -> &str {
        self.message.message_name()
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// A composed frame reached the interface. Sent by the root widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered;
message!(Rendered);

/// A widget's input hook ran for an event targeted at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReceived {
    pub kind: InputKind,
    pub handled: bool,
}
message!(InputReceived);

/// The text of an editable widget changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    pub text: String,
}
message!(TextChanged);

/// Enter was pressed in a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub text: String,
}
message!(Submitted);

/// A button was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clicked;
message!(Clicked);

/// A scroll view moved to a new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrolled {
    pub offset: Offset,
}
message!(Scrolled);

/// The focused widget changed. Sent by the newly focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChanged {
    pub previous: Option<WidgetId>,
}
message!(FocusChanged);

/// The hovered widget changed. Sent by the newly hovered widget, or by the
/// root when nothing is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChanged {
    pub previous: Option<WidgetId>,
    pub current: Option<WidgetId>,
}
message!(HoverChanged);

/// User-defined string message, typically produced by a key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom(pub String);

impl Custom {
    /// Create a new custom message.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

message!(Custom);

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id() -> WidgetId {
        let mut sm: SlotMap<WidgetId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    // ── Names ────────────────────────────────────────────────────────

    #[test]
    fn message_names_follow_type() {
        assert_eq!(Rendered.message_name(), "Rendered");
        assert_eq!(Clicked.message_name(), "Clicked");
        assert_eq!(TextChanged { text: String::new() }.message_name(), "TextChanged");
        assert_eq!(Custom::new("x").message_name(), "Custom");
    }

    // ── Envelope ─────────────────────────────────────────────────────

    #[test]
    fn envelope_downcast() {
        let id = make_id();
        let env = Envelope::new(Submitted { text: "hi".into() }, id);
        assert_eq!(env.sender, id);
        assert!(env.is::<Submitted>());
        assert!(!env.is::<Clicked>());
        assert_eq!(env.downcast_ref::<Submitted>().unwrap().text, "hi");
    }

    #[test]
    fn envelope_debug_shows_name() {
        let env = Envelope::boxed(Box::new(Clicked), make_id());
        assert!(format!("{env:?}").contains("Clicked"));
        assert_eq!(env.name(), "Clicked");
    }
}
