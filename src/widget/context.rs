//! Context handed to widget hooks.
//!
//! A `Context` pairs the tree with the id of the widget whose hook is running.
//! Through it a widget reads and redraws its own visual, lays out its
//! children, asks to change its own size, claims focus and emits messages.

use crate::config::Theme;
use crate::error::Result;
use crate::event::message::{Envelope, Message};
use crate::geometry::Offset;
use crate::layout::LayoutRect;
use crate::render::visual::Visual;

use super::node::WidgetId;
use super::tree::WidgetTree;

/// Access to the tree from inside a widget hook.
pub struct Context<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, id: WidgetId) -> Self {
        Self { tree, id }
    }

    /// The id of the widget whose hook is running.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Read-only access to the whole tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// The theme the tree was configured with.
    pub fn theme(&self) -> &Theme {
        self.tree.theme()
    }

    /// Allocator pass bound for container layout.
    pub fn max_layout_passes(&self) -> usize {
        self.tree.max_layout_passes()
    }

    // -- own state ----------------------------------------------------------

    /// The widget's bounds.
    pub fn bounds(&self) -> LayoutRect {
        self.tree.bounds(self.id).copied().unwrap_or_default()
    }

    /// Actual width.
    pub fn width(&self) -> i32 {
        self.bounds().width()
    }

    /// Actual height.
    pub fn height(&self) -> i32 {
        self.bounds().height()
    }

    /// The widget's visual.
    pub fn visual(&self) -> Option<&Visual> {
        self.tree.visual(self.id)
    }

    /// Mutable access to the widget's visual.
    pub fn visual_mut(&mut self) -> Option<&mut Visual> {
        self.tree.visual_mut(self.id)
    }

    /// Ask to change this widget's own size.
    ///
    /// The new bounds take effect immediately. Once the running hook returns,
    /// the tree re-runs the resize protocol for this widget and notifies the
    /// parent. Returns whether anything changed.
    pub fn request_size(&mut self, width: i32, height: i32) -> Result<bool> {
        self.tree.set_actual_size(self.id, width, height)
    }

    /// Replace this widget's own bounds, including its size kinds. Same
    /// follow-up as [`request_size`](Self::request_size) when an actual value
    /// changed.
    pub fn request_bounds(&mut self, bounds: LayoutRect) -> Result<bool> {
        self.tree.replace_bounds(self.id, bounds)
    }

    /// Ask for a full refresh of this widget once the running hook returns.
    /// Input hooks call this after changing what the widget shows.
    pub fn invalidate(&mut self) {
        self.tree.invalidate(self.id);
    }

    /// Ask the interface to focus this widget.
    pub fn claim_focus(&mut self) {
        self.tree.claim_focus(self.id);
    }

    /// Queue a message from this widget.
    pub fn emit(&mut self, message: impl Message) {
        self.tree.post(Envelope::new(message, self.id));
    }

    // -- children -----------------------------------------------------------

    /// The children, in insertion order.
    pub fn children(&self) -> Vec<WidgetId> {
        self.tree.children(self.id).to_vec()
    }

    /// A child's bounds.
    pub fn child_bounds(&self, child: WidgetId) -> Option<LayoutRect> {
        self.tree.bounds(child).copied()
    }

    /// Replace a child's bounds, running its resize protocol when an actual
    /// value changed. Returns whether it did.
    pub fn set_child_bounds(&mut self, child: WidgetId, bounds: LayoutRect) -> Result<bool> {
        self.tree.set_bounds(child, bounds)
    }

    /// Overlay a child's visual onto this widget's visual at `offset`.
    /// Zero-sized children contribute nothing.
    pub fn merge_child(&mut self, child: WidgetId, offset: Offset) {
        self.tree.merge_child(self.id, child, offset);
    }
}
