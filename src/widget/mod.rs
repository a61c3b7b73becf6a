//! Widget system: arena, trait, hook context, scrolling.

pub mod context;
pub mod node;
pub mod scroll;
pub mod traits;
pub mod tree;

pub use context::Context;
pub use node::{Parent, WidgetId, WidgetNode};
pub use scroll::{ScrollState, ScrollbarState};
pub use traits::{Slots, Widget};
pub use tree::WidgetTree;
