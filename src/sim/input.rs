//! Player input
//!
//! Held keys and the primary mouse button are level-triggered: an action is
//! active on every tick it is held. Weapon swap is edge-triggered through
//! [`InputEdges`], which compares the current tick against the previous one.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Abstract actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Melee,
    SwapWeapon,
    Fire,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Melee,
        Action::SwapWeapon,
        Action::Fire,
    ];

    /// Default keyboard mapping (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Action::Up),
            "s" | "arrowdown" => Some(Action::Down),
            "a" | "arrowleft" => Some(Action::Left),
            "d" | "arrowright" => Some(Action::Right),
            "f" => Some(Action::Melee),
            "e" => Some(Action::SwapWeapon),
            _ => None,
        }
    }
}

/// Current input as fed by the host
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Action>,
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
    /// Primary mouse button held; counts as a held `Fire`
    pub primary_button: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Raw key-down; returns false for unmapped keys
    pub fn key_down(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn set_primary_button(&mut self, down: bool) {
        self.primary_button = down;
    }

    /// Level-triggered test
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action) || (action == Action::Fire && self.primary_button)
    }

    /// Builder-style helper, mostly for tests and scripted input
    pub fn with(mut self, action: Action) -> Self {
        self.press(action);
        self
    }

    pub fn with_pointer(mut self, pos: Vec2) -> Self {
        self.pointer = pos;
        self
    }
}

/// Previous-tick input, for detecting presses
#[derive(Debug, Clone, Default)]
pub struct InputEdges {
    previous: HashSet<Action>,
}

impl InputEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Held now but not on the previous committed tick
    pub fn just_pressed(&self, current: &InputState, action: Action) -> bool {
        current.is_held(action) && !self.previous.contains(&action)
    }

    /// Remember `current` as the previous tick's input
    pub fn commit(&mut self, current: &InputState) {
        self.previous = Action::ALL
            .into_iter()
            .filter(|a| current.is_held(*a))
            .collect();
    }
}
