//! Top-level dispatcher: hover and focus tracking, input routing, frame
//! forwarding.
//!
//! [`Interface`] owns the [`WidgetTree`] and a [`RenderSink`]. It turns
//! [`HostEvent`]s into widget [`InputEvent`]s: pointer events go to the widget
//! under the pointer, keys go to the focused widget. At most one widget is
//! hovered and at most one is focused at any time. [`FocusChain`] keeps the
//! tab order of focusable widgets.
//!
//! After every operation, if a render reached the root since the last one,
//! the root's composed visual is handed to the sink.

use tracing::{debug, trace};

use crate::config::InterfaceConfig;
use crate::error::{Result, UiError};
use crate::event::binding::{BindingAction, KeyBindingRegistry};
use crate::event::input::{HostEvent, InputEvent, InputKind, KeyEvent, MouseButton};
use crate::event::keystroke::{keystroke_channel, KeystrokeReader, KeystrokeSender};
use crate::event::message::{Envelope, FocusChanged, HoverChanged, Rendered};
use crate::geometry::{Offset, Point};
use crate::render::sink::RenderSink;
use crate::widget::{WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Ordered list of focusable widgets for tab navigation.
///
/// The chain is rebuilt from the tree before every traversal. Focus cycles
/// forward (Tab) or backward (BackTab) and wraps around.
#[derive(Debug, Default)]
pub struct FocusChain {
    /// Focusable widgets in depth-first order.
    widgets: Vec<WidgetId>,
    /// Index of the focused widget within `widgets`.
    current: Option<usize>,
}

impl FocusChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the tree rooted at `tree.root()`.
    ///
    /// If the previously current widget is still in the chain it stays
    /// current.
    pub fn rebuild(&mut self, tree: &WidgetTree) {
        let previous = self.current_widget();
        self.widgets.clear();
        self.current = None;
        let Some(root) = tree.root() else {
            return;
        };
        self.widgets.extend(tree.walk_depth_first(root).into_iter().filter(|&id| tree.is_focusable(id)));
        if let Some(previous) = previous {
            self.current = self.widgets.iter().position(|&w| w == previous);
        }
    }

    /// The current widget, if any.
    pub fn current_widget(&self) -> Option<WidgetId> {
        self.current.and_then(|i| self.widgets.get(i).copied())
    }

    /// Advance to the next widget, wrapping. `None` if the chain is empty.
    pub fn next(&mut self) -> Option<WidgetId> {
        if self.widgets.is_empty() {
            return None;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.widgets.len());
        self.current = Some(next);
        self.widgets.get(next).copied()
    }

    /// Step back to the previous widget, wrapping. `None` if the chain is
    /// empty.
    pub fn previous(&mut self) -> Option<WidgetId> {
        if self.widgets.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.widgets.len() - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        self.widgets.get(prev).copied()
    }

    /// Make `id` current. Returns `false` if it is not in the chain.
    pub fn set_current(&mut self, id: WidgetId) -> bool {
        self.current = self.widgets.iter().position(|&w| w == id);
        self.current.is_some()
    }

    /// Focusable widgets in tab order.
    pub fn widgets(&self) -> &[WidgetId] {
        &self.widgets
    }

    /// Number of widgets in the chain.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Interface
// ---------------------------------------------------------------------------

/// The dispatcher between a backend and the widget tree.
pub struct Interface<S: RenderSink> {
    tree: WidgetTree,
    sink: S,
    config: InterfaceConfig,
    bindings: KeyBindingRegistry,
    focus_chain: FocusChain,
    keystrokes: Option<KeystrokeSender>,
    hovered: Option<WidgetId>,
    focused: Option<WidgetId>,
}

impl<S: RenderSink> Interface<S> {
    /// Create an interface presenting frames to `sink`.
    pub fn new(sink: S, config: InterfaceConfig) -> Self {
        let bindings =
            if config.tab_navigation { KeyBindingRegistry::with_focus_traversal() } else { KeyBindingRegistry::new() };
        Self {
            tree: WidgetTree::configured(&config),
            sink,
            config,
            bindings,
            focus_chain: FocusChain::new(),
            keystrokes: None,
            hovered: None,
            focused: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget tree, for building it and issuing
    /// commands. Call [`flush`](Self::flush) afterwards to present the result.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The configuration.
    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    /// The key bindings consulted before keys reach the focused widget.
    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    /// The root widget, if one is set.
    pub fn root(&self) -> Option<WidgetId> {
        self.tree.root()
    }

    /// The widget under the pointer.
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// The widget receiving keys.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// The tab order, as of the last traversal or focus change.
    pub fn focus_chain(&self) -> &FocusChain {
        &self.focus_chain
    }

    /// Drain every message emitted since the last call, in emission order.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.tree.drain_messages()
    }

    // -- keystroke channel --------------------------------------------------

    /// Open a keystroke channel. Every key the interface receives from now on
    /// is offered to the returned reader. Replaces any previous channel, which
    /// cancels a read blocked on it.
    pub fn connect_keystrokes(&mut self) -> KeystrokeReader {
        let (sender, reader) = keystroke_channel();
        self.keystrokes = Some(sender);
        reader
    }

    /// Close the keystroke channel. A blocked reader wakes with `None`.
    pub fn disconnect_keystrokes(&mut self) {
        self.keystrokes = None;
    }

    // -- root and size ------------------------------------------------------

    /// Bind `root` to the interface and lay it out at `width` x `height`.
    pub fn set_root(&mut self, root: WidgetId, width: i32, height: i32) -> Result<()> {
        self.tree.bind_root(root)?;
        self.tree.resize(root, width, height)?;
        self.focus_chain.rebuild(&self.tree);
        self.flush()
    }

    /// Resize the root. No-op without a root.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        let Some(root) = self.tree.root() else {
            return Ok(());
        };
        debug!(width, height, "interface resize");
        self.tree.resize(root, width, height)?;
        self.flush()
    }

    /// Route one backend event. Returns whether it had an effect: a hover
    /// change for pointer moves, delivery to a widget for buttons, scrolls and
    /// keys, and always for resizes.
    pub fn handle_host_event(&mut self, event: HostEvent) -> Result<bool> {
        trace!(?event, "host event");
        match event {
            HostEvent::MouseMove(at) => self.mouse_move(at),
            HostEvent::MouseDown { button, at } => self.click(at, button),
            HostEvent::Scroll { dx, dy, at } => self.scroll(at, dx, dy),
            HostEvent::Key(key) => self.key(key),
            HostEvent::Resize { width, height } => {
                self.resize(i32::from(width), i32::from(height))?;
                Ok(true)
            }
        }
    }

    // -- pointer ------------------------------------------------------------

    /// The widget under `point` (root coordinates).
    ///
    /// Descends from the root, asking each widget for the child under the
    /// point and translating the point into that child's coordinates, until a
    /// widget answers with no child.
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        let root = self.tree.root()?;
        if !self.tree.bounds(root)?.region_at(Point::ORIGIN).contains(point) {
            return None;
        }
        let mut current = root;
        let mut local = point;
        loop {
            let next = self.tree.with_widget(current, |w| w.hovered_child(&self.tree, current, local)).flatten();
            match next {
                Some(child) if child != current => {
                    local = local - self.tree.child_offset(current, child);
                    current = child;
                }
                _ => return Some(current),
            }
        }
    }

    /// `point` in root coordinates, expressed in `id`'s coordinates.
    fn local_point(&self, id: WidgetId, point: Point) -> Point {
        let origin = self.tree.absolute_origin(id);
        point - Offset::new(origin.x, origin.y)
    }

    /// Track the pointer. Delivers leave to the old hovered widget strictly
    /// before enter to the new one, then a move event to whichever widget is
    /// hovered. Returns whether the hovered widget changed.
    pub fn mouse_move(&mut self, point: Point) -> Result<bool> {
        self.forget_removed();
        let target = self.hit_test(point);
        let changed = target != self.hovered;
        if changed {
            let previous = self.hovered;
            debug!(?previous, current = ?target, "hover changed");
            if let Some(old) = previous {
                self.deliver(old, InputEvent::new(InputKind::MouseLeave))?;
            }
            self.hovered = target;
            if let Some(new) = target {
                self.deliver(new, InputEvent::at(InputKind::MouseEnter, self.local_point(new, point)))?;
            }
            if let Some(sender) = target.or(self.tree.root()) {
                self.tree.post(Envelope::new(HoverChanged { previous, current: target }, sender));
            }
        }
        if let Some(hovered) = self.hovered {
            self.deliver(hovered, InputEvent::at(InputKind::MouseMove, self.local_point(hovered, point)))?;
        }
        self.settle()?;
        Ok(changed)
    }

    /// Press a mouse button at `point`. Returns whether a widget received it.
    /// The middle button is not routed.
    pub fn click(&mut self, point: Point, button: MouseButton) -> Result<bool> {
        let kind = match button {
            MouseButton::Left => InputKind::LeftClick,
            MouseButton::Right => InputKind::RightClick,
            MouseButton::Middle => return Ok(false),
        };
        self.pointer_event(point, kind)
    }

    /// Scroll at `point`. Returns whether a widget received it.
    pub fn scroll(&mut self, point: Point, dx: i32, dy: i32) -> Result<bool> {
        self.pointer_event(point, InputKind::Scroll { dx, dy })
    }

    fn pointer_event(&mut self, point: Point, kind: InputKind) -> Result<bool> {
        self.mouse_move(point)?;
        let Some(target) = self.hovered else {
            return Ok(false);
        };
        self.deliver(target, InputEvent::at(kind, self.local_point(target, point)))?;
        self.settle()?;
        Ok(true)
    }

    // -- keyboard -----------------------------------------------------------

    /// Route a key. Bindings run first and consume the key; otherwise the key
    /// is offered to the keystroke channel and delivered to the focused
    /// widget. Returns whether a binding or widget received it.
    pub fn key(&mut self, key: KeyEvent) -> Result<bool> {
        self.forget_removed();
        if let Some(action) = self.bindings.resolve(&key).copied() {
            trace!(?key, ?action, "key binding");
            match action {
                BindingAction::FocusNext => {
                    self.focus_next()?;
                }
                BindingAction::FocusPrevious => {
                    self.focus_previous()?;
                }
                BindingAction::Emit(factory) => {
                    let message = factory();
                    if let Some(root) = self.tree.root() {
                        self.tree.post(Envelope::boxed(message, root));
                    }
                }
            }
            return Ok(true);
        }

        if let Some(sender) = &self.keystrokes {
            sender.offer(key);
        }
        let Some(target) = self.focused else {
            return Ok(false);
        };
        self.deliver(target, InputEvent::key(key))?;
        self.settle()?;
        Ok(true)
    }

    // -- focus --------------------------------------------------------------

    /// Focus `id`. The previously focused widget (if any) gets `Unfocus`
    /// before `id` gets `Focus`. The pair fires even when `id` is already
    /// focused.
    pub fn focus(&mut self, id: WidgetId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(UiError::UnknownWidget { widget: id });
        }
        self.forget_removed();
        let previous = self.focused;
        debug!(?previous, current = ?id, "focus changed");
        if let Some(old) = previous {
            self.deliver(old, InputEvent::new(InputKind::Unfocus))?;
        }
        self.focused = Some(id);
        self.focus_chain.rebuild(&self.tree);
        self.focus_chain.set_current(id);
        self.deliver(id, InputEvent::new(InputKind::Focus))?;
        self.tree.post(Envelope::new(FocusChanged { previous }, id));
        self.settle()
    }

    /// What a widget's focus claim amounts to. Same as [`focus`](Self::focus).
    pub fn claim_focus(&mut self, id: WidgetId) -> Result<()> {
        self.focus(id)
    }

    /// Drop focus. The focused widget gets `Unfocus`.
    pub fn clear_focus(&mut self) -> Result<()> {
        self.forget_removed();
        if let Some(old) = self.focused.take() {
            self.deliver(old, InputEvent::new(InputKind::Unfocus))?;
        }
        self.settle()
    }

    /// Focus the next widget in tab order. Returns it.
    pub fn focus_next(&mut self) -> Result<Option<WidgetId>> {
        self.focus_chain.rebuild(&self.tree);
        self.sync_chain();
        let next = self.focus_chain.next();
        if let Some(id) = next {
            self.focus(id)?;
        }
        Ok(next)
    }

    /// Focus the previous widget in tab order. Returns it.
    pub fn focus_previous(&mut self) -> Result<Option<WidgetId>> {
        self.focus_chain.rebuild(&self.tree);
        self.sync_chain();
        let previous = self.focus_chain.previous();
        if let Some(id) = previous {
            self.focus(id)?;
        }
        Ok(previous)
    }

    fn sync_chain(&mut self) {
        if let Some(id) = self.focused {
            self.focus_chain.set_current(id);
        }
    }

    // -- internals ----------------------------------------------------------

    fn deliver(&mut self, id: WidgetId, mut event: InputEvent) -> Result<()> {
        trace!(?id, kind = event.kind.name(), "deliver");
        self.tree.handle_input(id, &mut event)
    }

    /// Honour a pending focus claim, then present the frame if one is ready.
    fn settle(&mut self) -> Result<()> {
        if let Some(claim) = self.tree.take_focus_claim() {
            if self.tree.contains(claim) {
                self.focus(claim)?;
            }
        }
        self.flush()
    }

    /// Present the root visual if a render reached the root since the last
    /// flush. Returns without doing anything otherwise.
    pub fn flush(&mut self) -> Result<()> {
        if !self.tree.take_frame_ready() {
            return Ok(());
        }
        let Some(root) = self.tree.root() else {
            return Ok(());
        };
        if let Some(visual) = self.tree.visual(root) {
            trace!(width = visual.width(), height = visual.height(), "forwarding frame");
            self.sink.set_visual(visual)?;
            self.tree.post(Envelope::new(Rendered, root));
        }
        Ok(())
    }

    fn forget_removed(&mut self) {
        if self.hovered.is_some_and(|h| !self.tree.contains(h)) {
            self.hovered = None;
        }
        if self.focused.is_some_and(|f| !self.tree.contains(f)) {
            self.focused = None;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
