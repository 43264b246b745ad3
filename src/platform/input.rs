//! Keyboard state and edge detection
//!
//! Movement keys are level-sensitive and read every frame. The confirm
//! action is edge-triggered: holding the key down fires once.

use crate::settings::KeyBindings;
use crate::sim::TickInput;

/// Held keys plus a latched confirm edge
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    confirm_held: bool,
    confirm_pending: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down by `KeyboardEvent.key` / `code` name
    ///
    /// Returns true if the key is bound to something.
    pub fn key_down(&mut self, key: &str, bindings: &KeyBindings) -> bool {
        if bindings.is_left(key) {
            self.left = true;
        } else if bindings.is_right(key) {
            self.right = true;
        } else if bindings.is_confirm(key) {
            // Auto-repeat arrives as more key-downs while held
            if !self.confirm_held {
                self.confirm_pending = true;
            }
            self.confirm_held = true;
        } else {
            return false;
        }
        true
    }

    /// Record a key-up
    pub fn key_up(&mut self, key: &str, bindings: &KeyBindings) {
        if bindings.is_left(key) {
            self.left = false;
        } else if bindings.is_right(key) {
            self.right = false;
        } else if bindings.is_confirm(key) {
            self.confirm_held = false;
        }
    }

    /// Snapshot for one tick. Consumes the confirm edge.
    pub fn take_input(&mut self) -> TickInput {
        let confirm = std::mem::take(&mut self.confirm_pending);
        TickInput {
            left: self.left,
            right: self.right,
            confirm,
            idle_mode: false,
        }
    }
}
