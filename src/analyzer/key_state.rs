//! Tracks which keys are flashing, held, and were ever pressed.
//!
//! All times are milliseconds on the analyzer clock. Nothing here reads a real clock; the caller
//! passes the current time to each operation.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

/// A briefly highlighted item. Arming a new flash replaces the old one together with its expiry,
/// so an earlier expiry can never clear a later flash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash<T> {
    current: Option<(T, u64)>,
    duration_ms: u64,
}

impl<T> Flash<T> {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            current: None,
            duration_ms,
        }
    }

    pub fn arm(&mut self, item: T, now: u64) {
        self.current = Some((item, now.saturating_add(self.duration_ms)));
    }

    /// Returns true if a flash ended.
    pub fn expire(&mut self, now: u64) -> bool {
        match &self.current {
            Some((_, expires_at)) if *expires_at <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref().map(|(item, _)| item)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldKey {
    pub down_at: u64,
    /// Label computed at key-down; reused for the key-up so that releasing a modifier first
    /// does not change how the key is shown.
    pub label: String,
}

/// Result of releasing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRelease {
    /// Label from the matching key-down, if the key was held.
    pub label: Option<String>,
    /// How long this key was held.
    pub delay_ms: Option<u64>,
    /// Set when this release emptied the held set: time since the most recent key-down.
    pub press_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum KeyStatus {
    Active,
    Held,
    EverPressed,
    Never,
}

impl KeyStatus {
    pub fn legend_label(self) -> &'static str {
        match self {
            KeyStatus::Active => "Active",
            KeyStatus::Held | KeyStatus::EverPressed => "Pressed",
            KeyStatus::Never => "Never",
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyStateTracker {
    active: Flash<String>,
    held: HashMap<String, HeldKey>,
    ever_pressed: HashSet<String>,
    last_down_at: Option<u64>,
    last_press_duration: Option<u64>,
}

impl KeyStateTracker {
    pub fn new(flash_ms: u64) -> Self {
        Self {
            active: Flash::new(flash_ms),
            held: HashMap::default(),
            ever_pressed: HashSet::default(),
            last_down_at: None,
            last_press_duration: None,
        }
    }

    /// A fresh (non-repeat) press. A second down for a key that is still held restarts its hold
    /// time; the key-up in between was lost.
    pub fn key_down(&mut self, code: &str, label: String, now: u64) {
        self.held.insert(
            code.to_owned(),
            HeldKey {
                down_at: now,
                label,
            },
        );
        if !self.ever_pressed.contains(code) {
            self.ever_pressed.insert(code.to_owned());
        }
        self.active.arm(code.to_owned(), now);
        self.last_down_at = Some(now);
    }

    /// Auto-repeat only keeps the key lit.
    pub fn key_repeat(&mut self, code: &str, now: u64) {
        self.active.arm(code.to_owned(), now);
    }

    pub fn key_up(&mut self, code: &str, now: u64) -> KeyRelease {
        let Some(held) = self.held.remove(code) else {
            return KeyRelease {
                label: None,
                delay_ms: None,
                press_duration_ms: None,
            };
        };
        let mut press_duration_ms = None;
        if self.held.is_empty() {
            if let Some(down_at) = self.last_down_at {
                let d = now.saturating_sub(down_at);
                self.last_press_duration = Some(d);
                press_duration_ms = Some(d);
            }
        }
        KeyRelease {
            label: Some(held.label),
            delay_ms: Some(now.saturating_sub(held.down_at)),
            press_duration_ms,
        }
    }

    pub fn expire(&mut self, now: u64) -> bool {
        self.active.expire(now)
    }

    /// Drops every held key without timing it. Returns the released codes, sorted.
    pub fn release_all(&mut self) -> Vec<String> {
        let mut codes: Vec<String> = self.held.drain().map(|(code, _)| code).collect();
        codes.sort_unstable();
        codes
    }

    /// Forget history. Keys still physically held stay held and count as pressed.
    pub fn reset(&mut self) {
        self.active.clear();
        self.ever_pressed = self.held.keys().cloned().collect();
        self.last_down_at = None;
        self.last_press_duration = None;
    }

    pub fn status(&self, code: &str) -> KeyStatus {
        if self.active.get().is_some_and(|c| c == code) {
            KeyStatus::Active
        } else if self.held.contains_key(code) {
            KeyStatus::Held
        } else if self.ever_pressed.contains(code) {
            KeyStatus::EverPressed
        } else {
            KeyStatus::Never
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.get().map(String::as_str)
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains_key(code)
    }

    pub fn held_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.held.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn was_ever_pressed(&self, code: &str) -> bool {
        self.ever_pressed.contains(code)
    }

    pub fn ever_pressed_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.ever_pressed.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn last_press_duration(&self) -> Option<u64> {
        self.last_press_duration
    }
}
