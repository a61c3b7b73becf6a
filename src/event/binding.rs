//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`BindingAction`]s.
//! The interface consults it before delivering a key to the focused widget; a
//! matched binding consumes the key.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};
use super::message::Message;

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Clone, Copy)]
pub enum BindingAction {
    /// Move focus to the next widget in the focus chain.
    FocusNext,
    /// Move focus to the previous widget in the focus chain.
    FocusPrevious,
    /// Queue a message produced by a factory function. The root is the
    /// sender.
    Emit(fn() -> Box<dyn Message>),
}

impl std::fmt::Debug for BindingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FocusNext => write!(f, "FocusNext"),
            Self::FocusPrevious => write!(f, "FocusPrevious"),
            Self::Emit(_) => write!(f, "Emit(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Create a registry with focus traversal bindings.
    ///
    /// - `Tab` -> FocusNext
    /// - `BackTab` -> FocusPrevious (with or without Shift, since terminals
    ///   differ in whether they report the modifier)
    pub fn with_focus_traversal() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusNext);
        registry.bind(Key::BackTab, Modifiers::NONE, BindingAction::FocusPrevious);
        registry.bind(Key::BackTab, Modifiers::SHIFT, BindingAction::FocusPrevious);
        registry
    }

    /// Register a key binding, replacing any existing one for the same
    /// combination.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding, returning it if present.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a key event. Key and modifiers must match
    /// exactly.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::message::Custom;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let reg = KeyBindingRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn focus_traversal_defaults() {
        let reg = KeyBindingRegistry::with_focus_traversal();
        assert_eq!(reg.len(), 3);
        assert!(matches!(reg.resolve(&KeyEvent::plain(Key::Tab)), Some(BindingAction::FocusNext)));
        assert!(matches!(reg.resolve(&KeyEvent::plain(Key::BackTab)), Some(BindingAction::FocusPrevious)));
        assert!(matches!(
            reg.resolve(&KeyEvent::new(Key::BackTab, Modifiers::SHIFT)),
            Some(BindingAction::FocusPrevious)
        ));
        assert!(reg.resolve(&KeyEvent::new(Key::Tab, Modifiers::CTRL)).is_none());
    }

    // ── Bind / Unbind ────────────────────────────────────────────────

    #[test]
    fn modifiers_must_match_exactly() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Char('n'), Modifiers::CTRL, BindingAction::FocusNext);
        assert!(reg.resolve(&KeyEvent::plain(Key::Char('n'))).is_none());
        assert!(reg.resolve(&KeyEvent::new(Key::Char('n'), Modifiers::CTRL)).is_some());
    }

    #[test]
    fn bind_overwrites_and_unbind_removes() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusNext);
        reg.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusPrevious);
        assert_eq!(reg.len(), 1);
        assert!(matches!(reg.resolve(&KeyEvent::plain(Key::Tab)), Some(BindingAction::FocusPrevious)));

        assert!(reg.unbind(Key::Tab, Modifiers::NONE).is_some());
        assert!(reg.unbind(Key::Tab, Modifiers::NONE).is_none());
        assert!(reg.is_empty());
    }

    // ── Emit ─────────────────────────────────────────────────────────

    #[test]
    fn emit_factory_builds_message() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::F(1), Modifiers::NONE, BindingAction::Emit(|| Box::new(Custom::new("help"))));
        let Some(BindingAction::Emit(factory)) = reg.resolve(&KeyEvent::plain(Key::F(1))) else {
            panic!("expected Emit");
        };
        assert_eq!(factory().message_name(), "Custom");
        assert_eq!(format!("{:?}", BindingAction::Emit(|| Box::new(Custom::new("x")))), "Emit(<fn>)");
    }
}
