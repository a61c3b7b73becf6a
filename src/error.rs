//! Error taxonomy for the toolkit.
//!
//! Every variant except [`UiError::Io`] is an invariant violation: a bug in how
//! the widget tree was constructed or driven. They are returned before any
//! state is mutated so the caller can abort loudly. Conditions that the toolkit
//! corrects on its own (scroll offsets, cursor indices) never produce an error.

use std::io;

use crate::widget::node::WidgetId;

/// Errors raised by layout, buffers and the widget tree.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A widget was bound to a second parent.
    #[error("widget {widget:?} already has a parent")]
    AlreadyBound { widget: WidgetId },

    /// A single-child container was given content twice.
    #[error("container {container:?} already has content")]
    ContentAlreadySet { container: WidgetId },

    /// A child was attached to a widget that cannot hold children.
    #[error("widget {widget:?} cannot hold children")]
    NotAContainer { widget: WidgetId },

    /// A flexible size was set below its minimum.
    #[error("size {value} is below the minimum of {min}")]
    BelowMinimum { value: i32, min: i32 },

    /// The minimum sizes of a set of siblings exceed the container extent.
    #[error("the given objects cannot fit: {required} cells required, {available} available")]
    CannotFit { required: i64, available: i32 },

    /// A visual was requested with a zero or negative dimension.
    #[error("Visual cannot have size less than 1 (got {width}x{height})")]
    InvalidVisualSize { width: i32, height: i32 },

    /// A visual was requested with more cells than can be addressed.
    #[error("Visual of {width}x{height} is too large")]
    VisualTooLarge { width: i32, height: i32 },

    /// A justification name did not match any known value.
    #[error("unknown justification `{0}`")]
    UnknownJustification(String),

    /// Binding would make a widget its own ancestor.
    #[error("binding {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: WidgetId, child: WidgetId },

    /// A hook was invoked on a widget whose own hook is still running.
    #[error("widget {widget:?} is already running a hook")]
    Reentrant { widget: WidgetId },

    /// Typed access named the wrong widget type.
    #[error("widget {widget:?} is not a {expected}")]
    TypeMismatch { widget: WidgetId, expected: &'static str },

    /// A widget id does not refer to a live node.
    #[error("widget {widget:?} does not exist")]
    UnknownWidget { widget: WidgetId },

    /// The rendering backend failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_size_message() {
        let err = UiError::InvalidVisualSize { width: 0, height: 3 };
        assert!(err.to_string().starts_with("Visual cannot have size less than 1"));
    }

    #[test]
    fn cannot_fit_message() {
        let err = UiError::CannotFit { required: 12, available: 10 };
        assert!(err.to_string().contains("cannot fit"));
    }

    #[test]
    fn io_converts() {
        let err: UiError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, UiError::Io(_)));
    }
}
