//! Keyboard input
//!
//! The platform only answers "is this key down right now?". Menu actions fire
//! once per press, so the tracker remembers what was held on the previous
//! frame and reports only fresh presses.

use std::collections::HashSet;

/// The fixed key set the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    A,
    D,
    Up,
    Down,
    Left,
    Right,
    Num1,
    Num2,
    Num3,
    P,
    R,
    Enter,
    Escape,
}

impl Key {
    pub const ALL: [Key; 15] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::P,
        Key::R,
        Key::Enter,
        Key::Escape,
    ];

    /// Menu slot for number keys
    pub fn menu_slot(self) -> Option<u8> {
        match self {
            Key::Num1 => Some(1),
            Key::Num2 => Some(2),
            Key::Num3 => Some(3),
            _ => None,
        }
    }
}

/// Live keyboard state supplied by the platform
pub trait Keyboard {
    fn key_pressed(&self, key: Key) -> bool;

    /// Pull pending platform events before the frame is sampled
    fn pump(&mut self) {}
}

/// In-memory keyboard (scripted input, tests)
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
    }
}

impl Keyboard for HeldKeys {
    fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub p1_up: bool,
    pub p1_down: bool,
    pub p2_up: bool,
    pub p2_down: bool,
    /// Keys that went down this frame
    pub pressed: Vec<Key>,
}

impl TickInput {
    /// A frame where exactly these keys were freshly pressed
    pub fn with_presses(keys: &[Key]) -> Self {
        Self {
            pressed: keys.to_vec(),
            ..Default::default()
        }
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Turns raw key state into per-frame `TickInput`
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held_last_frame: HashSet<Key>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the keyboard once for this frame
    pub fn sample(&mut self, keyboard: &impl Keyboard) -> TickInput {
        let mut pressed = Vec::new();
        let mut held = HashSet::new();

        for key in Key::ALL {
            if keyboard.key_pressed(key) {
                if !self.held_last_frame.contains(&key) {
                    pressed.push(key);
                }
                held.insert(key);
            }
        }
        self.held_last_frame = held;

        TickInput {
            p1_up: keyboard.key_pressed(Key::W),
            p1_down: keyboard.key_pressed(Key::S),
            p2_up: keyboard.key_pressed(Key::Up),
            p2_down: keyboard.key_pressed(Key::Down),
            pressed,
        }
    }
}
