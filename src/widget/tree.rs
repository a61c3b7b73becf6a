//! WidgetTree: the arena that owns every widget and runs the lifecycle
//! protocol.
//!
//! All nodes live in a single `SlotMap`. Child lists are stored in a secondary
//! map and are the only record of child order; merge order, hit-test order
//! and focus order all derive from it.
//!
//! The protocol, per widget:
//!
//! - **resize**: update bounds, allocate a fresh visual, run `on_resize`,
//!   then refresh.
//! - **refresh**: run `refresh_visual`, then render.
//! - **render**: run `draw`, then bubble "rendered" to every ancestor, each of
//!   which runs `on_child_rendered` before passing it on. When it reaches the
//!   interface the frame is marked ready.
//! - **input**: run `on_input`, record an [`InputReceived`] message, then hand
//!   the event to every ancestor with its location translated.
//!
//! A widget is lifted out of its node while one of its hooks runs. Anything
//! that bubbles into such a busy ancestor is parked and delivered once the
//! hook returns.

use std::any::type_name;
use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use crate::config::{InterfaceConfig, Theme};
use crate::error::{Result, UiError};
use crate::event::handler::{bubble_path, MessageQueue};
use crate::event::input::InputEvent;
use crate::event::message::{Envelope, InputReceived};
use crate::geometry::{Offset, Point};
use crate::layout::{LayoutRect, DEFAULT_MAX_PASSES};
use crate::render::visual::Visual;

use super::context::Context;
use super::node::{fresh_visual, Parent, WidgetId, WidgetNode};
use super::traits::{Slots, Widget};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// A notification that reached an ancestor while its hook was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parked {
    Rendered { parent: WidgetId, child: WidgetId },
    Resized { parent: WidgetId, child: WidgetId },
}

impl Parked {
    fn parent(&self) -> WidgetId {
        match *self {
            Parked::Rendered { parent, .. } | Parked::Resized { parent, .. } => parent,
        }
    }

    fn child(&self) -> WidgetId {
        match *self {
            Parked::Rendered { child, .. } | Parked::Resized { child, .. } => child,
        }
    }
}

/// The widget arena.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    root: Option<WidgetId>,
    theme: Theme,
    max_layout_passes: usize,
    messages: MessageQueue,
    focus_claim: Option<WidgetId>,
    frame_ready: bool,
    parked: Vec<Parked>,
    invalidated: Vec<WidgetId>,
}

impl WidgetTree {
    /// Create an empty tree with the default theme.
    pub fn new() -> Self {
        Self::with_theme(Theme::default(), DEFAULT_MAX_PASSES)
    }

    /// Create an empty tree with the given theme and allocator pass bound.
    pub fn with_theme(theme: Theme, max_layout_passes: usize) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            root: None,
            theme,
            max_layout_passes: max_layout_passes.max(1),
            messages: MessageQueue::new(),
            focus_claim: None,
            frame_ready: false,
            parked: Vec::new(),
            invalidated: Vec::new(),
        }
    }

    /// Create an empty tree from an interface configuration.
    pub fn configured(config: &InterfaceConfig) -> Self {
        Self::with_theme(config.theme, config.max_layout_passes)
    }

    // -- accessors ----------------------------------------------------------

    /// The theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Allocator pass bound.
    pub fn max_layout_passes(&self) -> usize {
        self.max_layout_passes
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The widget bound to the interface, if any.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// A node.
    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// Binding state of a widget.
    pub fn parent(&self, id: WidgetId) -> Option<Parent> {
        self.nodes.get(id).map(|n| n.parent)
    }

    /// Children in insertion order. Empty if the widget has none or does not
    /// exist.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    /// A widget's bounds.
    pub fn bounds(&self, id: WidgetId) -> Option<&LayoutRect> {
        self.nodes.get(id).map(|n| &n.bounds)
    }

    /// A widget's visual.
    pub fn visual(&self, id: WidgetId) -> Option<&Visual> {
        self.nodes.get(id).map(|n| &n.visual)
    }

    pub(crate) fn visual_mut(&mut self, id: WidgetId) -> Option<&mut Visual> {
        self.nodes.get_mut(id).map(|n| &mut n.visual)
    }

    /// A widget's type name.
    pub fn widget_type(&self, id: WidgetId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.widget_type.as_str())
    }

    /// Whether a hook on `id` is currently running.
    pub fn is_busy(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(WidgetNode::is_busy)
    }

    /// Whether the widget takes part in focus traversal.
    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.with_widget(id, |w| w.focusable()).unwrap_or(false)
    }

    /// Run `f` against a widget that is not busy.
    pub fn with_widget<R>(&self, id: WidgetId, f: impl FnOnce(&dyn Widget) -> R) -> Option<R> {
        self.nodes.get(id).and_then(|n| n.widget.as_deref()).map(f)
    }

    /// Typed access to a widget.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .and_then(|w| w.as_any().downcast_ref::<T>())
    }

    /// Typed mutable access to a widget, without any follow-up redraw.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)
            .and_then(|n| n.widget.as_deref_mut())
            .and_then(|w| w.as_any_mut().downcast_mut::<T>())
    }

    /// Ancestor widgets, nearest first. The interface is not included.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(Parent::Widget(p)) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Where `child`'s origin sits in `parent`'s coordinates.
    pub fn child_offset(&self, parent: WidgetId, child: WidgetId) -> Offset {
        self.with_widget(parent, |w| w.child_offset(self, parent, child)).unwrap_or_default()
    }

    /// The widget's origin in root coordinates.
    pub fn absolute_origin(&self, id: WidgetId) -> Point {
        let mut origin = Point::ORIGIN;
        let mut current = id;
        while let Some(Parent::Widget(p)) = self.parent(current) {
            origin = origin + self.child_offset(p, current);
            current = p;
        }
        origin
    }

    // -- insertion and binding ----------------------------------------------

    /// Insert an unbound widget with the given bounds.
    ///
    /// The widget's resize protocol runs once so its visual holds its initial
    /// content.
    pub fn insert<W: Widget>(&mut self, widget: W, bounds: LayoutRect) -> Result<WidgetId> {
        self.insert_boxed(Box::new(widget), bounds)
    }

    /// Insert an already boxed widget.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>, bounds: LayoutRect) -> Result<WidgetId> {
        let widget_type = widget.widget_type().to_owned();
        let slots = widget.slots();
        let id = self.nodes.insert(WidgetNode {
            visual: fresh_visual(&bounds),
            bounds,
            parent: Parent::Unbound,
            widget: Some(widget),
            widget_type,
            slots,
        });
        self.children.insert(id, Vec::new());
        trace!(?id, widget_type = %self.nodes[id].widget_type, "inserted widget");
        if let Err(err) = self.run_resize(id) {
            self.unlink(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Insert a widget and bind it under `parent` in one step.
    pub fn insert_child<W: Widget>(&mut self, parent: WidgetId, widget: W, bounds: LayoutRect) -> Result<WidgetId> {
        let id = self.insert(widget, bounds)?;
        if let Err(err) = self.add_child(parent, id) {
            self.unlink(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Bind `child` under `parent`, then reflow the parent.
    ///
    /// Every check runs before anything is mutated.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.check_bind(parent, child)?;
        self.nodes[child].parent = Parent::Widget(parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }
        debug!(?parent, ?child, "bound child");
        if let Err(err) = self.reflow(parent) {
            warn!(?parent, ?child, %err, "layout rejected child, unbinding");
            self.detach(parent, child);
            self.reflow(parent)?;
            return Err(err);
        }
        Ok(())
    }

    fn detach(&mut self, parent: WidgetId, child: WidgetId) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Parent::Unbound;
        }
        if let Some(kids) = self.children.get_mut(parent) {
            kids.retain(|&c| c != child);
        }
    }

    /// Set the content of a single-child container.
    pub fn set_content(&mut self, container: WidgetId, child: WidgetId) -> Result<()> {
        let slots = self.node(container).ok_or(UiError::UnknownWidget { widget: container })?.slots;
        if slots != Slots::Single {
            warn!(?container, "set_content on a widget without a single content slot");
            return Err(UiError::NotAContainer { widget: container });
        }
        self.add_child(container, child)
    }

    /// Bind `id` as the tree root, owned by the interface.
    pub fn bind_root(&mut self, id: WidgetId) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownWidget { widget: id })?;
        if node.parent.is_bound() {
            warn!(?id, "root is already bound");
            return Err(UiError::AlreadyBound { widget: id });
        }
        node.parent = Parent::Interface;
        self.root = Some(id);
        debug!(?id, "bound root to interface");
        Ok(())
    }

    fn check_bind(&self, parent: WidgetId, child: WidgetId) -> Result<()> {
        let child_node = self.nodes.get(child).ok_or(UiError::UnknownWidget { widget: child })?;
        let parent_node = self.nodes.get(parent).ok_or(UiError::UnknownWidget { widget: parent })?;
        if child_node.parent.is_bound() {
            warn!(?child, ?parent, "rejected second binding");
            return Err(UiError::AlreadyBound { widget: child });
        }
        match parent_node.slots {
            Slots::None => {
                warn!(?parent, "rejected child on a leaf widget");
                return Err(UiError::NotAContainer { widget: parent });
            }
            Slots::Single if !self.children(parent).is_empty() => {
                warn!(?parent, "rejected second content");
                return Err(UiError::ContentAlreadySet { container: parent });
            }
            _ => {}
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(UiError::WouldCycle { parent, child });
        }
        Ok(())
    }

    /// Unlink a widget and its subtree. The former parent reflows.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        let node = self.nodes.get(id).ok_or(UiError::UnknownWidget { widget: id })?;
        if node.is_busy() {
            return Err(UiError::Reentrant { widget: id });
        }
        let parent = node.parent;
        self.unlink(id);
        debug!(?id, "removed widget");
        match parent {
            Parent::Widget(p) if !self.is_busy(p) => self.reflow(p),
            _ => Ok(()),
        }
    }

    fn unlink(&mut self, id: WidgetId) {
        if let Some(Parent::Widget(p)) = self.parent(id) {
            if let Some(siblings) = self.children.get_mut(p) {
                siblings.retain(|&c| c != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.nodes.remove(current);
        }
        if self.focus_claim.is_some_and(|f| !self.nodes.contains_key(f)) {
            self.focus_claim = None;
        }
        let nodes = &self.nodes;
        self.parked.retain(|p| nodes.contains_key(p.parent()) && nodes.contains_key(p.child()));
        self.invalidated.retain(|&w| nodes.contains_key(w));
    }

    // -- lifecycle ----------------------------------------------------------

    /// Resize a widget and run its resize protocol.
    pub fn resize(&mut self, id: WidgetId, width: i32, height: i32) -> Result<()> {
        self.set_actual_size(id, width, height)?;
        self.run_resize(id)
    }

    /// Replace a widget's bounds. The resize protocol runs only when an actual
    /// value changed; returns whether it did.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: LayoutRect) -> Result<bool> {
        let changed = self.replace_bounds(id, bounds)?;
        if changed {
            self.run_resize(id)?;
        }
        Ok(changed)
    }

    pub(crate) fn set_actual_size(&mut self, id: WidgetId, width: i32, height: i32) -> Result<bool> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownWidget { widget: id })?;
        node.bounds.set_actual(width, height)
    }

    pub(crate) fn replace_bounds(&mut self, id: WidgetId, bounds: LayoutRect) -> Result<bool> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownWidget { widget: id })?;
        let changed = node.bounds.width() != bounds.width() || node.bounds.height() != bounds.height();
        node.bounds = bounds;
        Ok(changed)
    }

    fn run_resize(&mut self, id: WidgetId) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownWidget { widget: id })?;
        node.visual = fresh_visual(&node.bounds);
        trace!(?id, width = node.bounds.width(), height = node.bounds.height(), "resize");
        self.call(id, |w, cx| w.on_resize(cx))?;
        self.refresh(id)
    }

    /// Re-run layout for a container without changing its bounds.
    pub fn reflow(&mut self, id: WidgetId) -> Result<()> {
        self.call(id, |w, cx| w.on_resize(cx))?;
        self.refresh(id)
    }

    /// Fully redraw a widget, then render it.
    pub fn refresh(&mut self, id: WidgetId) -> Result<()> {
        self.call(id, |w, cx| w.refresh_visual(cx))?;
        self.render(id)
    }

    /// Draw per-frame decoration and bubble "rendered" to the root.
    pub fn render(&mut self, id: WidgetId) -> Result<()> {
        self.call(id, |w, cx| w.draw(cx))?;
        self.bubble_rendered(id)
    }

    fn bubble_rendered(&mut self, from: WidgetId) -> Result<()> {
        let path = bubble_path(self, from);
        for pair in path.windows(2) {
            let (child, p) = (pair[0], pair[1]);
            if !self.contains(p) {
                return Ok(());
            }
            if self.is_busy(p) {
                self.park(Parked::Rendered { parent: p, child });
                return Ok(());
            }
            self.call(p, |w, cx| w.on_child_rendered(cx, child))?;
        }
        if let Some(&top) = path.last() {
            if matches!(self.parent(top), Some(Parent::Interface)) {
                self.frame_ready = true;
            }
        }
        Ok(())
    }

    /// Deliver an input event to `id`, then bubble it to every ancestor.
    ///
    /// The event's location is translated into each ancestor's coordinates on
    /// the way up. Bubbling does not stop when a widget marks the event
    /// handled; it stops only at an ancestor whose hook is already running.
    pub fn handle_input(&mut self, id: WidgetId, event: &mut InputEvent) -> Result<()> {
        self.call(id, |w, cx| w.on_input(cx, event))?;
        self.post(Envelope::new(InputReceived { kind: event.kind, handled: event.handled }, id));

        for pair in bubble_path(self, id).windows(2) {
            let (child, p) = (pair[0], pair[1]);
            if !self.contains(p) || self.is_busy(p) {
                break;
            }
            let offset = self.child_offset(p, child);
            if let Some(location) = event.location.as_mut() {
                *location = *location + offset;
            }
            self.call(p, |w, cx| w.on_input(cx, event))?;
        }
        Ok(())
    }

    /// Run a typed command on a widget, then refresh it.
    ///
    /// This is how applications issue imperative commands (`set_text`,
    /// `scroll_y`, ...) on concrete widgets.
    pub fn with_widget_mut<T, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T, &mut Context<'_>) -> Result<R>,
    ) -> Result<R>
    where
        T: Widget,
    {
        let out = self.call(id, |w, cx| match w.as_any_mut().downcast_mut::<T>() {
            Some(typed) => f(typed, cx),
            None => Err(UiError::TypeMismatch { widget: id, expected: type_name::<T>() }),
        })?;
        self.refresh(id)?;
        Ok(out)
    }

    /// Run one hook with the widget lifted out of its node.
    ///
    /// Afterwards, notifications parked on this widget are delivered. If the
    /// hook changed the widget's own size the resize protocol runs and the
    /// parent is told; otherwise a widget that invalidated itself is
    /// refreshed.
    fn call<R>(&mut self, id: WidgetId, f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> Result<R>) -> Result<R> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownWidget { widget: id })?;
        let mut widget = node.widget.take().ok_or(UiError::Reentrant { widget: id })?;
        let before = (node.bounds.width(), node.bounds.height());

        let result = f(widget.as_mut(), &mut Context::new(self, id));

        let Some(node) = self.nodes.get_mut(id) else {
            // Removed during its own hook.
            return result;
        };
        node.widget = Some(widget);
        let resized = (node.bounds.width(), node.bounds.height()) != before;

        let out = result?;
        self.deliver_parked(id)?;
        let invalidated = self.take_invalidated(id);
        if resized {
            self.after_self_resize(id)?;
        } else if invalidated {
            self.refresh(id)?;
        }
        Ok(out)
    }

    fn park(&mut self, parked: Parked) {
        if !self.parked.contains(&parked) {
            trace!(?parked, "parked notification on busy ancestor");
            self.parked.push(parked);
        }
    }

    fn deliver_parked(&mut self, id: WidgetId) -> Result<()> {
        let mut rendered = false;
        while let Some(pos) = self.parked.iter().position(|p| p.parent() == id) {
            match self.parked.remove(pos) {
                Parked::Rendered { child, .. } => {
                    self.call(id, |w, cx| w.on_child_rendered(cx, child))?;
                }
                Parked::Resized { child, .. } => {
                    self.call(id, |w, cx| w.on_child_resized(cx, child))?;
                    self.call(id, |w, cx| w.refresh_visual(cx))?;
                }
            }
            rendered = true;
        }
        if rendered {
            self.bubble_rendered(id)?;
        }
        Ok(())
    }

    fn after_self_resize(&mut self, id: WidgetId) -> Result<()> {
        debug!(?id, "widget changed its own size");
        self.run_resize(id)?;
        if let Some(Parent::Widget(p)) = self.parent(id) {
            if self.is_busy(p) {
                self.park(Parked::Resized { parent: p, child: id });
            } else {
                self.call(p, |w, cx| w.on_child_resized(cx, id))?;
                self.refresh(p)?;
            }
        }
        Ok(())
    }

    // -- services used by Context and the interface --------------------------

    pub(crate) fn merge_child(&mut self, parent: WidgetId, child: WidgetId, offset: Offset) {
        if parent == child {
            return;
        }
        if let Some([p, c]) = self.nodes.get_disjoint_mut([parent, child]) {
            let (width, height) = (c.bounds.width(), c.bounds.height());
            if width <= 0 || height <= 0 {
                return;
            }
            p.visual.merge(&c.visual, offset.dx, offset.dy, 0, 0, width, height);
        }
    }

    pub(crate) fn claim_focus(&mut self, id: WidgetId) {
        trace!(?id, "focus claimed");
        self.focus_claim = Some(id);
    }

    pub(crate) fn invalidate(&mut self, id: WidgetId) {
        if !self.invalidated.contains(&id) {
            self.invalidated.push(id);
        }
    }

    fn take_invalidated(&mut self, id: WidgetId) -> bool {
        let before = self.invalidated.len();
        self.invalidated.retain(|&w| w != id);
        self.invalidated.len() != before
    }

    /// Take the pending focus claim, if a widget made one.
    pub fn take_focus_claim(&mut self) -> Option<WidgetId> {
        self.focus_claim.take()
    }

    /// Whether a render reached the interface since the last call.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    /// Queue a message.
    pub fn post(&mut self, envelope: Envelope) {
        self.messages.push(envelope);
    }

    /// Drain all queued messages in emission order.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.messages.drain()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
