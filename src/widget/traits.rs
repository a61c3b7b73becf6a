//! Widget trait: lifecycle hooks and container queries.
//!
//! The `Widget` trait is the single capability interface for every UI element.
//! Leaves and containers implement the same trait; a container is simply a
//! widget whose [`Widget::slots`] allows children and which overrides the
//! child-related hooks it cares about.
//!
//! Hooks receive a [`Context`] that gives access to the widget's own bounds and
//! visual and to the rest of the tree. While a hook runs the widget is lifted
//! out of its node, so a widget never observes itself through the tree.

use std::any::Any;

use crate::error::Result;
use crate::event::input::InputEvent;
use crate::geometry::{Offset, Point};

use super::context::Context;
use super::node::WidgetId;
use super::tree::WidgetTree;

/// How many children a widget can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slots {
    /// A leaf.
    #[default]
    None,
    /// A single-child container; content can be set once.
    Single,
    /// Any number of children.
    Many,
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widget is object-safe; the tree stores widgets as `Box<dyn Widget>` and
/// typed access goes through `as_any` / `as_any_mut`.
pub trait Widget: 'static {
    /// Type name for logging and debugging (e.g. "Label", "Stack").
    fn widget_type(&self) -> &str;

    /// How many children this widget accepts. Defaults to none.
    fn slots(&self) -> Slots {
        Slots::None
    }

    /// Whether this widget takes part in focus traversal.
    fn focusable(&self) -> bool {
        false
    }

    /// Called after the bounds changed and a fresh visual was allocated.
    ///
    /// Containers re-run layout on their children here; text widgets re-wrap.
    fn on_resize(&mut self, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Rebuild the visual from scratch. The authoritative full redraw.
    fn refresh_visual(&mut self, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Per-frame decoration drawn on top of the refreshed content, such as a
    /// cursor or a hover highlight.
    fn draw(&mut self, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Handle an input event. `event.location` is in this widget's
    /// coordinates. Bubbled events may already be handled; check before acting.
    fn on_input(&mut self, _cx: &mut Context<'_>, _event: &mut InputEvent) -> Result<()> {
        Ok(())
    }

    /// A child changed its own size. Typically re-runs layout.
    fn on_child_resized(&mut self, cx: &mut Context<'_>, _child: WidgetId) -> Result<()> {
        self.on_resize(cx)
    }

    /// A child finished rendering. The default merges the child's visual at
    /// its offset.
    fn on_child_rendered(&mut self, cx: &mut Context<'_>, child: WidgetId) -> Result<()> {
        let offset = self.child_offset(cx.tree(), cx.id(), child);
        cx.merge_child(child, offset);
        Ok(())
    }

    /// Where `child`'s origin sits in this widget's coordinates.
    fn child_offset(&self, _tree: &WidgetTree, _id: WidgetId, _child: WidgetId) -> Offset {
        Offset::ZERO
    }

    /// The child under `point` (in this widget's coordinates), or `None` when
    /// the point hits the widget itself.
    ///
    /// The default picks the last child in insertion order whose placed region
    /// contains the point, matching merge order.
    fn hovered_child(&self, tree: &WidgetTree, id: WidgetId, point: Point) -> Option<WidgetId> {
        tree.children(id).iter().rev().copied().find(|&child| {
            let offset = self.child_offset(tree, id, child);
            tree.bounds(child)
                .map(|b| b.region_at(Point::ORIGIN).translate(offset).contains(point))
                .unwrap_or(false)
        })
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRect;

    struct Leaf;

    impl Widget for Leaf {
        fn widget_type(&self) -> &str {
            "Leaf"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Shelf;

    impl Widget for Shelf {
        fn widget_type(&self) -> &str {
            "Shelf"
        }
        fn slots(&self) -> Slots {
            Slots::Many
        }
        fn child_offset(&self, tree: &WidgetTree, id: WidgetId, child: WidgetId) -> Offset {
            // Children sit side by side.
            let dx = tree
                .children(id)
                .iter()
                .take_while(|&&c| c != child)
                .filter_map(|&c| tree.bounds(c))
                .map(|b| b.width())
                .sum();
            Offset::new(dx, 0)
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    // ── Defaults ─────────────────────────────────────────────────────

    #[test]
    fn leaf_defaults() {
        let leaf = Leaf;
        assert_eq!(leaf.slots(), Slots::None);
        assert!(!leaf.focusable());
        assert!(leaf.as_any().downcast_ref::<Leaf>().is_some());
    }

    #[test]
    fn default_hovered_child_uses_offsets() {
        let mut tree = WidgetTree::new();
        let shelf = tree.insert(Shelf, LayoutRect::fixed(6, 1)).unwrap();
        let a = tree.insert(Leaf, LayoutRect::fixed(2, 1)).unwrap();
        let b = tree.insert(Leaf, LayoutRect::fixed(3, 1)).unwrap();
        tree.add_child(shelf, a).unwrap();
        tree.add_child(shelf, b).unwrap();

        let hit = |x| tree.with_widget(shelf, |w| w.hovered_child(&tree, shelf, Point::new(x, 0))).flatten();
        assert_eq!(hit(1), Some(a));
        assert_eq!(hit(2), Some(b));
        assert_eq!(hit(4), Some(b));
        assert_eq!(hit(5), None);
    }
}
