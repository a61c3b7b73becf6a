//! Message queue and bubble path computation.
//!
//! [`MessageQueue`] collects the [`Envelope`]s widgets emit while the tree is
//! being driven. The `bubble_path` function computes the order in which a
//! notification travels from a widget up to the root.

use std::collections::VecDeque;

use super::message::Envelope;
use crate::widget::node::WidgetId;
use crate::widget::tree::WidgetTree;

// ---------------------------------------------------------------------------
// MessageQueue
// ---------------------------------------------------------------------------

/// FIFO of emitted messages.
///
/// The queue does not route anything itself; the application drains it after
/// driving the interface and reacts to what it finds.
#[derive(Debug, Default)]
pub struct MessageQueue {
    queue: VecDeque<Envelope>,
}

impl MessageQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    /// Enqueue a message envelope.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages in emission order.
    ///
    /// The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// The bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
/// `start` does not exist in the tree.
pub fn bubble_path(tree: &WidgetTree, start: WidgetId) -> Vec<WidgetId> {
    if !tree.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(tree.ancestors(start));
    path
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::message::Custom;
    use crate::layout::LayoutRect;
    use crate::widgets::{Label, Stack};
    use crate::config::Theme;
    use crate::geometry::Orientation;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   /
    ///  c
    /// ```
    fn build_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Stack::new(Orientation::Vertical), LayoutRect::fixed(10, 4)).unwrap();
        let a = tree.insert_child(root, Stack::new(Orientation::Horizontal), LayoutRect::fixed(10, 2)).unwrap();
        let b = tree.insert_child(root, Label::new(&theme, "b"), LayoutRect::fixed(10, 1)).unwrap();
        let c = tree.insert_child(a, Label::new(&theme, "c"), LayoutRect::fixed(3, 1)).unwrap();
        (tree, root, a, b, c)
    }

    // ── Push / Drain ─────────────────────────────────────────────────

    #[test]
    fn push_preserves_order() {
        let (_, root, ..) = build_tree();
        let mut queue = MessageQueue::new();
        queue.push(Envelope::new(Custom::new("first"), root));
        queue.push(Envelope::new(Custom::new("second"), root));
        assert_eq!(queue.pending_count(), 2);

        let messages = queue.drain();
        assert!(queue.is_empty());
        assert_eq!(messages[0].downcast_ref::<Custom>().unwrap().0, "first");
        assert_eq!(messages[1].downcast_ref::<Custom>().unwrap().0, "second");
    }

    // ── Bubble path ──────────────────────────────────────────────────

    #[test]
    fn bubble_path_from_leaf() {
        let (tree, root, a, _, c) = build_tree();
        assert_eq!(bubble_path(&tree, c), vec![c, a, root]);
    }

    #[test]
    fn bubble_path_from_root_and_sibling() {
        let (tree, root, _, b, _) = build_tree();
        assert_eq!(bubble_path(&tree, root), vec![root]);
        assert_eq!(bubble_path(&tree, b), vec![b, root]);
    }

    #[test]
    fn bubble_path_removed_widget() {
        let (mut tree, _, a, _, c) = build_tree();
        tree.remove(a).unwrap();
        assert!(bubble_path(&tree, c).is_empty());
    }
}
