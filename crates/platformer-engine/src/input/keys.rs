//! Logical keys, bindings, and the per-frame snapshot of held keys.

use std::collections::{HashMap, HashSet};

use crate::input::queue::InputEvent;

/// Logical actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    Left = 0,
    Right = 1,
    Jump = 2,
    Attack = 3,
    Special = 4,
    /// Start from the menu / restart after game over or victory.
    Confirm = 5,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Left,
        Key::Right,
        Key::Jump,
        Key::Attack,
        Key::Special,
        Key::Confirm,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Maps host key codes to logical keys. Several codes may map to one key.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<u32, Key>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(mut self, key_code: u32, key: Key) -> Self {
        self.map.insert(key_code, key);
        self
    }

    pub fn lookup(&self, key_code: u32) -> Option<Key> {
        self.map.get(&key_code).copied()
    }
}

impl Default for KeyBindings {
    /// Browser `keyCode`s: arrows + WASD, space to jump, J/S/down to attack,
    /// V for the special, Enter to confirm.
    fn default() -> Self {
        Self::empty()
            .bind(37, Key::Left)
            .bind(65, Key::Left)
            .bind(39, Key::Right)
            .bind(68, Key::Right)
            .bind(38, Key::Jump)
            .bind(87, Key::Jump)
            .bind(32, Key::Jump)
            .bind(74, Key::Attack)
            .bind(83, Key::Attack)
            .bind(40, Key::Attack)
            .bind(86, Key::Special)
            .bind(13, Key::Confirm)
    }
}

/// Immutable view of the held keys for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    bits: u8,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot directly from logical keys.
    pub fn from_keys(keys: &[Key]) -> Self {
        let bits = keys.iter().fold(0, |acc, k| acc | k.bit());
        Self { bits }
    }

    pub fn held(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    /// -1.0 for left, 1.0 for right, `None` for neither. Left wins a tie.
    pub fn horizontal(&self) -> Option<f32> {
        if self.held(Key::Left) {
            Some(-1.0)
        } else if self.held(Key::Right) {
            Some(1.0)
        } else {
            None
        }
    }
}

/// Held-key state, mutated by input events between frames.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    bindings: KeyBindings,
    held_codes: HashSet<u32>,
    pointer_down: bool,
}

impl KeyState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held_codes: HashSet::new(),
            pointer_down: false,
        }
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.held_codes.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held_codes.remove(&key_code);
            }
            InputEvent::PointerDown { .. } => self.pointer_down = true,
            InputEvent::PointerUp { .. } => self.pointer_down = false,
            InputEvent::FocusLost => self.release_all(),
        }
    }

    /// Snapshot of the logical keys held right now.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut bits = self
            .held_codes
            .iter()
            .filter_map(|code| self.bindings.lookup(*code))
            .fold(0, |acc, k| acc | k.bit());
        if self.pointer_down {
            bits |= Key::Confirm.bit();
        }
        InputSnapshot { bits }
    }

    /// Forget every held key (e.g. when the page loses focus).
    pub fn release_all(&mut self) {
        self.held_codes.clear();
        self.pointer_down = false;
    }
}
