//! Decides which default browser actions to suppress so that testing a key does not scroll the
//! page, move focus, navigate back, open dev tools or reload.

use input_analyzer_parser::cfg::Cfg;

use crate::input::{KeyInput, Modifiers, Target};

type HashSet<T> = rustc_hash::FxHashSet<T>;

/// Codes whose default action is suppressed regardless of configuration.
const ALWAYS_PREVENT: &[&str] = &[
    "Space",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "F1",
    "F2",
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
];

/// Keys that trigger a browser shortcut when combined with Ctrl or Meta.
const SHORTCUT_KEYS: &[&str] = &[
    "r", "s", "p", "f", "g", "h", "j", "k", "l", "a", "w", "q", "z", "x", "c", "v", "b", "n", "m",
    "t", "y", "u", "i", "o", "d", "e", "+", "-", "=",
];

const MOUSE_BUTTON_BACK: i16 = 3;
const MOUSE_BUTTON_FORWARD: i16 = 4;

#[derive(Debug, Clone)]
pub struct PreventPolicy {
    prevent_codes: HashSet<&'static str>,
    allow_codes: HashSet<&'static str>,
    prevent_slash: bool,
    prevent_browser_shortcuts: bool,
    prevent_context_menu: bool,
    prevent_mouse_navigation: bool,
}

impl Default for PreventPolicy {
    fn default() -> Self {
        Self::from_cfg(&Cfg::default())
    }
}

impl PreventPolicy {
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let o = &cfg.options;
        let mut prevent_codes: HashSet<&'static str> = ALWAYS_PREVENT.iter().copied().collect();
        for (enabled, code) in [
            (o.prevent_tab, "Tab"),
            (o.prevent_enter, "Enter"),
            (o.prevent_backspace, "Backspace"),
        ] {
            if enabled {
                prevent_codes.insert(code);
            }
        }
        prevent_codes.extend(cfg.prevent_codes.iter().copied());
        Self {
            prevent_codes,
            allow_codes: cfg.allow_codes.iter().copied().collect(),
            prevent_slash: o.prevent_slash,
            prevent_browser_shortcuts: o.prevent_browser_shortcuts,
            prevent_context_menu: o.prevent_context_menu,
            prevent_mouse_navigation: o.prevent_mouse_navigation,
        }
    }

    pub fn should_prevent_key(&self, input: &KeyInput) -> bool {
        if input.target.is_editable() || self.allow_codes.contains(input.code.as_str()) {
            return false;
        }
        if self.prevent_codes.contains(input.code.as_str()) {
            return true;
        }
        if self.prevent_slash && input.key == "/" {
            return true;
        }
        self.prevent_browser_shortcuts
            && input.mods.intersects(Modifiers::CTRL | Modifiers::META)
            && (SHORTCUT_KEYS.contains(&input.key.to_lowercase().as_str())
                || input.code.starts_with("Digit"))
    }

    pub fn should_prevent_context_menu(&self, target: Target) -> bool {
        self.prevent_context_menu && !target.is_editable()
    }

    pub fn should_prevent_mouse_button(&self, button: i16, target: Target) -> bool {
        self.prevent_mouse_navigation
            && !target.is_editable()
            && matches!(button, MOUSE_BUTTON_BACK | MOUSE_BUTTON_FORWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_analyzer_parser::cfg::parse_cfg;

    fn key(code: &str, key: &str) -> KeyInput {
        KeyInput::new(code, key)
    }

    #[test]
    fn scrolling_and_function_keys_are_prevented() {
        let p = PreventPolicy::default();
        assert!(p.should_prevent_key(&key("Space", " ")));
        assert!(p.should_prevent_key(&key("ArrowDown", "ArrowDown")));
        assert!(p.should_prevent_key(&key("F5", "F5")));
        assert!(p.should_prevent_key(&key("Tab", "Tab")));
        assert!(p.should_prevent_key(&key("Backspace", "Backspace")));
        assert!(p.should_prevent_key(&key("Slash", "/")));
        assert!(!p.should_prevent_key(&key("Enter", "Enter")));
        assert!(!p.should_prevent_key(&key("KeyA", "a")));
        assert!(!p.should_prevent_key(&key("Escape", "Escape")));
    }

    #[test]
    fn editable_targets_are_never_prevented() {
        let p = PreventPolicy::default();
        assert!(!p.should_prevent_key(&key("Space", " ").with_target(Target::Editable)));
        assert!(
            !p.should_prevent_key(
                &key("KeyS", "s")
                    .with_mods(Modifiers::CTRL)
                    .with_target(Target::Editable)
            )
        );
        assert!(!p.should_prevent_context_menu(Target::Editable));
        assert!(p.should_prevent_context_menu(Target::Document));
    }

    #[test]
    fn browser_shortcuts_are_prevented() {
        let p = PreventPolicy::default();
        assert!(p.should_prevent_key(&key("KeyR", "r").with_mods(Modifiers::CTRL)));
        assert!(p.should_prevent_key(&key("KeyS", "S").with_mods(Modifiers::META)));
        assert!(p.should_prevent_key(&key("Digit3", "3").with_mods(Modifiers::CTRL)));
        assert!(p.should_prevent_key(&key("Equal", "=").with_mods(Modifiers::CTRL)));
        // not in the shortcut table
        assert!(!p.should_prevent_key(&key("Semicolon", ";").with_mods(Modifiers::CTRL)));
        // alt alone does not make a browser shortcut
        assert!(!p.should_prevent_key(&key("KeyR", "r").with_mods(Modifiers::ALT)));
    }

    #[test]
    fn configuration_adjusts_the_table() {
        let cfg = parse_cfg(
            "(defcfg prevent-tab no prevent-enter yes prevent-slash no
                     prevent-browser-shortcuts no prevent-context-menu no
                     prevent-mouse-navigation yes)
             (defprevent esc)
             (defallow f5)",
            "test",
        )
        .expect("valid cfg");
        let p = PreventPolicy::from_cfg(&cfg);
        assert!(!p.should_prevent_key(&key("Tab", "Tab")));
        assert!(p.should_prevent_key(&key("Enter", "Enter")));
        assert!(!p.should_prevent_key(&key("Slash", "/")));
        assert!(!p.should_prevent_key(&key("KeyR", "r").with_mods(Modifiers::CTRL)));
        assert!(p.should_prevent_key(&key("Escape", "Escape")));
        assert!(!p.should_prevent_key(&key("F5", "F5")));
        assert!(p.should_prevent_key(&key("F6", "F6")));
        assert!(!p.should_prevent_context_menu(Target::Document));
        assert!(p.should_prevent_mouse_button(3, Target::Document));
        assert!(p.should_prevent_mouse_button(4, Target::Document));
        assert!(!p.should_prevent_mouse_button(4, Target::Editable));
        assert!(!p.should_prevent_mouse_button(0, Target::Document));
    }

    #[test]
    fn mouse_navigation_is_allowed_by_default() {
        let p = PreventPolicy::default();
        assert!(!p.should_prevent_mouse_button(3, Target::Document));
    }
}
