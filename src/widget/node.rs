//! Node types: WidgetId, Parent, WidgetNode.

use slotmap::new_key_type;

use crate::layout::LayoutRect;
use crate::render::visual::Visual;

use super::traits::{Slots, Widget};

new_key_type! {
    /// Unique identifier for a widget in a [`WidgetTree`](super::tree::WidgetTree).
    /// Copy, lightweight (u64), never reused for a different widget.
    pub struct WidgetId;
}

/// Who a widget is bound to. Binding happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent {
    /// Not yet placed in a tree.
    #[default]
    Unbound,
    /// Owned by a container widget.
    Widget(WidgetId),
    /// The root of the tree, bound to the interface.
    Interface,
}

impl Parent {
    /// Whether the widget has been bound.
    pub fn is_bound(&self) -> bool {
        !matches!(self, Parent::Unbound)
    }

    /// The parent widget, if the binding is to a widget.
    pub fn widget(&self) -> Option<WidgetId> {
        match self {
            Parent::Widget(id) => Some(*id),
            _ => None,
        }
    }
}

/// Everything the tree stores about one widget.
pub struct WidgetNode {
    pub(crate) bounds: LayoutRect,
    pub(crate) visual: Visual,
    pub(crate) parent: Parent,
    /// `None` while one of the widget's own hooks is running.
    pub(crate) widget: Option<Box<dyn Widget>>,
    pub(crate) widget_type: String,
    pub(crate) slots: Slots,
}

impl WidgetNode {
    /// The widget's bounds.
    pub fn bounds(&self) -> &LayoutRect {
        &self.bounds
    }

    /// The widget's current visual.
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// The binding state.
    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// The widget type name, recorded at insertion.
    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    /// How many children the widget accepts.
    pub fn slots(&self) -> Slots {
        self.slots
    }

    /// Whether a hook on this widget is currently running.
    pub fn is_busy(&self) -> bool {
        self.widget.is_none()
    }
}

impl std::fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetNode")
            .field("widget_type", &self.widget_type)
            .field("bounds", &self.bounds)
            .field("parent", &self.parent)
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// A blank visual matching `bounds`. Zero extents are clamped to one cell,
/// since a visual cannot be empty.
pub(crate) fn fresh_visual(bounds: &LayoutRect) -> Visual {
    let width = bounds.width().max(1);
    let height = bounds.height().max(1);
    match Visual::new(width, height) {
        Ok(visual) => visual,
        // Unreachable with clamped dimensions; keep a 1x1 visual regardless.
        Err(_) => Visual::unit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_states() {
        assert!(!Parent::Unbound.is_bound());
        assert!(Parent::Interface.is_bound());
        assert_eq!(Parent::Interface.widget(), None);
        assert_eq!(Parent::default(), Parent::Unbound);
    }

    #[test]
    fn fresh_visual_clamps_zero_extent() {
        let visual = fresh_visual(&LayoutRect::fixed(0, 3));
        assert_eq!((visual.width(), visual.height()), (1, 3));
    }
}
