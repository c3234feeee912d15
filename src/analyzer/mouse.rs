//! Mouse button naming and state.

use rustc_hash::FxHashSet as HashSet;
use std::fmt;

use super::key_state::Flash;

/// A DOM `MouseEvent.button` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    Other(i16),
}

impl From<i16> for MouseButton {
    fn from(b: i16) -> Self {
        match b {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            3 => MouseButton::Back,
            4 => MouseButton::Forward,
            n => MouseButton::Other(n),
        }
    }
}

impl MouseButton {
    pub fn index(self) -> i16 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(n) => n,
        }
    }

    /// Parses a button index or one of `left`, `middle`, `right`, `back`, `forward`.
    pub fn from_str_name(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "left" | "l" => MouseButton::Left,
            "middle" | "mid" | "m" => MouseButton::Middle,
            "right" | "r" => MouseButton::Right,
            "back" => MouseButton::Back,
            "forward" | "fwd" => MouseButton::Forward,
            n => MouseButton::from(n.parse::<i16>().ok()?),
        })
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MouseButton::Left => f.write_str("Left Click"),
            MouseButton::Middle => f.write_str("Middle Click"),
            MouseButton::Right => f.write_str("Right Click"),
            MouseButton::Back => f.write_str("Browser Back"),
            MouseButton::Forward => f.write_str("Browser Forward"),
            MouseButton::Other(n) => write!(f, "Button {n}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MouseTracker {
    last: Option<MouseButton>,
    active: Flash<MouseButton>,
    held: HashSet<MouseButton>,
    ever_pressed: HashSet<MouseButton>,
}

impl MouseTracker {
    pub fn new(flash_ms: u64) -> Self {
        Self {
            last: None,
            active: Flash::new(flash_ms),
            held: HashSet::default(),
            ever_pressed: HashSet::default(),
        }
    }

    pub fn button_down(&mut self, button: MouseButton, now: u64) {
        self.last = Some(button);
        self.held.insert(button);
        self.ever_pressed.insert(button);
        self.active.arm(button, now);
    }

    /// Returns false if the button was not held.
    pub fn button_up(&mut self, button: MouseButton) -> bool {
        self.held.remove(&button)
    }

    pub fn expire(&mut self, now: u64) -> bool {
        self.active.expire(now)
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.active.clear();
        self.ever_pressed = self.held.clone();
    }

    pub fn last(&self) -> Option<MouseButton> {
        self.last
    }

    pub fn active(&self) -> Option<MouseButton> {
        self.active.get().copied()
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    pub fn held(&self) -> Vec<MouseButton> {
        let mut v: Vec<_> = self.held.iter().copied().collect();
        v.sort_unstable();
        v
    }

    pub fn ever_pressed(&self) -> Vec<MouseButton> {
        let mut v: Vec<_> = self.ever_pressed.iter().copied().collect();
        v.sort_unstable();
        v
    }
}
