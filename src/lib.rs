//! # cellframe
//!
//! A retained-mode widget toolkit over character-cell buffers.
//!
//! Widgets live in a slotmap-backed tree. Each one owns a [`Visual`], a grid
//! of cells it redraws itself; containers compose their children's visuals
//! into their own, and a finished frame bubbles up to the [`Interface`], which
//! hands it to a [`RenderSink`]. Input flows the other way: the interface
//! tracks hover and focus, routes pointer events to the widget under the
//! pointer and keys to the focused widget, and every event bubbles back up
//! through the ancestors.
//!
//! ## Core Systems
//!
//! - **[`layout`]**: Fixed and flexible sizes, and the allocator that shares
//!   space among siblings
//! - **[`render`]**: Cells, visuals, overlay compositing, crossterm driver
//! - **[`text`]**: Color runs and greedy word wrap
//! - **[`widget`]**: Widget trait, tree arena, hook context, scroll state
//! - **[`widgets`]**: Built-in widgets: Label, Stack, Frame, ScrollView,
//!   TextInput, Button
//! - **[`event`]**: Host and widget input, messages, key bindings, the
//!   keystroke channel
//! - **[`interface`]**: Hover and focus tracking, input dispatch, frame
//!   forwarding
//! - **[`testing`]**: Headless pilot and snapshot helpers
//! - **[`geometry`]**: Point, Offset, Region, Extent primitives

// Foundation
pub mod config;
pub mod error;
pub mod geometry;

// Core systems
pub mod layout;
pub mod render;
pub mod text;

// Widget system
pub mod widget;
pub mod widgets;

// Events and dispatch
pub mod event;
pub mod interface;

// Headless testing
pub mod testing;

pub use config::{InterfaceConfig, Theme};
pub use error::{Result, UiError};
pub use geometry::{Extent, Offset, Orientation, Point, Region};
pub use interface::{FocusChain, Interface};
pub use layout::{LayoutRect, Size};
pub use render::{Cell, Color, ColorPair, RenderSink, Visual};
pub use widget::{Context, Widget, WidgetId, WidgetTree};
