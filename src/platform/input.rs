//! Keyboard state tracking
//!
//! Hosts forward key-down/key-up events by physical key code (`KeyW`,
//! `ArrowUp`, `Space`, ...). State is kept per code; codes are folded into
//! logical game keys only when building a frame's [`TickInput`]. Once per
//! frame, after the tick, the one-shot presses are cleared.

use std::collections::HashSet;

use crate::sim::{MoveIntent, TickInput};

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Action];

    /// Physical codes bound to this key, primary first
    pub fn codes(self) -> &'static [&'static str] {
        match self {
            Key::Up => &["KeyW", "ArrowUp"],
            Key::Down => &["KeyS", "ArrowDown"],
            Key::Left => &["KeyA", "ArrowLeft"],
            Key::Right => &["KeyD", "ArrowRight"],
            Key::Action => &["Space"],
        }
    }

    /// Map a physical key code to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.codes().contains(&code))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InputState {
    down: HashSet<String>,
    just_pressed: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code went down. Auto-repeat while held does not count as a new press.
    pub fn key_down(&mut self, code: &str) {
        if self.down.insert(code.to_string()) {
            self.just_pressed.insert(code.to_string());
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.down.remove(code);
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.down.contains(code)
    }

    pub fn is_just_pressed(&self, code: &str) -> bool {
        self.just_pressed.contains(code)
    }

    /// Any code bound to `key` is held
    pub fn is_key_down(&self, key: Key) -> bool {
        key.codes().iter().any(|c| self.is_down(c))
    }

    /// Any code bound to `key` went down this frame
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        key.codes().iter().any(|c| self.is_just_pressed(c))
    }

    /// Call once per simulation frame, after the tick
    pub fn clear_just_pressed(&mut self) {
        self.just_pressed.clear();
    }

    /// Held direction; down wins over up and right over left
    pub fn move_intent(&self) -> MoveIntent {
        let mut dx = 0;
        let mut dy = 0;
        if self.is_key_down(Key::Up) {
            dy = -1;
        }
        if self.is_key_down(Key::Down) {
            dy = 1;
        }
        if self.is_key_down(Key::Left) {
            dx = -1;
        }
        if self.is_key_down(Key::Right) {
            dx = 1;
        }
        MoveIntent::new(dx, dy)
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            movement: self.move_intent(),
            up_pressed: self.is_key_just_pressed(Key::Up),
            down_pressed: self.is_key_just_pressed(Key::Down),
            action: self.is_key_just_pressed(Key::Action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::Up));
        assert_eq!(Key::from_code("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_code("Space"), Some(Key::Action));
        assert_eq!(Key::from_code("Enter"), None);
        assert_eq!(Key::Down.codes()[0], "KeyS");
    }

    #[test]
    fn test_just_pressed_once() {
        let mut input = InputState::new();
        input.key_down("Space");
        assert!(input.tick_input().action);
        input.clear_just_pressed();

        // Auto-repeat while held
        input.key_down("Space");
        assert!(input.is_down("Space"));
        assert!(!input.tick_input().action);

        input.key_up("Space");
        input.key_down("Space");
        assert!(input.tick_input().action);
    }

    #[test]
    fn test_move_intent_priority() {
        let mut input = InputState::new();
        input.key_down("KeyW");
        input.key_down("ArrowDown");
        input.key_down("KeyA");
        assert_eq!(input.move_intent(), MoveIntent::new(-1, 1));

        input.key_up("ArrowDown");
        input.key_down("KeyD");
        assert_eq!(input.move_intent(), MoveIntent::new(1, -1));
    }

    #[test]
    fn test_alias_codes_are_independent() {
        let mut input = InputState::new();
        input.key_down("KeyW");
        input.key_down("ArrowUp");
        input.key_up("KeyW");
        // ArrowUp is still physically held
        assert_eq!(input.move_intent(), MoveIntent::new(0, -1));
        assert!(!input.is_down("KeyW"));
        assert!(input.is_down("ArrowUp"));

        input.key_up("ArrowUp");
        assert!(input.move_intent().is_idle());
    }

    #[test]
    fn test_second_alias_press_registers() {
        let mut input = InputState::new();
        input.key_down("KeyS");
        input.clear_just_pressed();
        assert!(!input.tick_input().down_pressed);

        input.key_down("ArrowDown");
        assert!(input.is_just_pressed("ArrowDown"));
        assert!(!input.is_just_pressed("KeyS"));
        assert!(input.tick_input().down_pressed);
    }

    #[test]
    fn test_unbound_codes_are_tracked() {
        let mut input = InputState::new();
        input.key_down("Enter");
        assert!(input.is_down("Enter"));
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_menu_presses() {
        let mut input = InputState::new();
        input.key_down("ArrowDown");
        let frame = input.tick_input();
        assert!(frame.down_pressed);
        assert!(!frame.up_pressed);
        assert_eq!(frame.movement, MoveIntent::new(0, 1));
    }
}
