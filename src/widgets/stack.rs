//! Stack widget: children laid out one after another along an axis.
//!
//! On every resize the main-axis sizes of the children are handed to the
//! allocator, which fills the stack's extent by growing or shrinking the
//! flexible ones. On the cross axis flexible children stretch to fill the
//! stack; fixed children keep their size.

use std::any::Any;

use tracing::trace;

use crate::error::Result;
use crate::geometry::{Offset, Orientation};
use crate::layout::{allocate, Size};
use crate::render::cell::Cell;
use crate::widget::{Context, Slots, Widget, WidgetId, WidgetTree};

/// A multi-child container along one axis.
pub struct Stack {
    orientation: Orientation,
}

impl Stack {
    /// Create an empty stack.
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// A top-to-bottom stack.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// A left-to-right stack.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// The stacking axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Widget for Stack {
    fn widget_type(&self) -> &str {
        "Stack"
    }

    fn slots(&self) -> Slots {
        Slots::Many
    }

    fn on_resize(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let children = cx.children();
        if children.is_empty() {
            return Ok(());
        }
        let axis = self.orientation;
        let own = cx.bounds();
        let extent = own.main(axis).actual();
        let cross = own.cross(axis).actual();

        let mut rects: Vec<_> = children.iter().filter_map(|&c| cx.child_bounds(c)).collect();
        let mut sizes: Vec<Size> = rects
            .iter()
            .map(|r| {
                let mut size = *r.main(axis);
                size.reset_to_preferred();
                size
            })
            .collect();
        allocate(extent, &mut sizes, cx.max_layout_passes())?;
        trace!(id = ?cx.id(), extent, children = children.len(), "stack layout");

        for ((&child, rect), size) in children.iter().zip(rects.iter_mut()).zip(sizes) {
            *rect.main_mut(axis) = size;
            let cross_size = rect.cross_mut(axis);
            if cross_size.is_flexible() {
                cross_size.set_actual(cross.max(cross_size.min()))?;
            }
            cx.set_child_bounds(child, *rect)?;
        }
        Ok(())
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let base = cx.theme().base;
        if let Some(visual) = cx.visual_mut() {
            visual.clear(Cell::blank(base));
        }
        for child in cx.children() {
            let offset = self.child_offset(cx.tree(), cx.id(), child);
            cx.merge_child(child, offset);
        }
        Ok(())
    }

    fn child_offset(&self, tree: &WidgetTree, id: WidgetId, child: WidgetId) -> Offset {
        let axis = self.orientation;
        let main: i32 = tree
            .children(id)
            .iter()
            .take_while(|&&c| c != child)
            .filter_map(|&c| tree.bounds(c))
            .map(|b| b.main(axis).actual())
            .sum();
        axis.offset(main)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
