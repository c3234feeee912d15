//! The standard full-size keyboard, grouped the way keys sit on the board.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub code: &'static str,
    /// Short keycap text.
    pub label: &'static str,
}

#[derive(Debug)]
pub struct KeyGroup {
    pub name: &'static str,
    pub keys: &'static [KeyDef],
}

const fn k(code: &'static str, label: &'static str) -> KeyDef {
    KeyDef { code, label }
}

pub static LAYOUT: &[KeyGroup] = &[
    KeyGroup {
        name: "function",
        keys: &[
            k("Escape", "Esc"),
            k("F1", "F1"),
            k("F2", "F2"),
            k("F3", "F3"),
            k("F4", "F4"),
            k("F5", "F5"),
            k("F6", "F6"),
            k("F7", "F7"),
            k("F8", "F8"),
            k("F9", "F9"),
            k("F10", "F10"),
            k("F11", "F11"),
            k("F12", "F12"),
        ],
    },
    KeyGroup {
        name: "number",
        keys: &[
            k("Backquote", "`"),
            k("Digit1", "1"),
            k("Digit2", "2"),
            k("Digit3", "3"),
            k("Digit4", "4"),
            k("Digit5", "5"),
            k("Digit6", "6"),
            k("Digit7", "7"),
            k("Digit8", "8"),
            k("Digit9", "9"),
            k("Digit0", "0"),
            k("Minus", "-"),
            k("Equal", "="),
            k("Backspace", "Bksp"),
        ],
    },
    KeyGroup {
        name: "top",
        keys: &[
            k("Tab", "Tab"),
            k("KeyQ", "Q"),
            k("KeyW", "W"),
            k("KeyE", "E"),
            k("KeyR", "R"),
            k("KeyT", "T"),
            k("KeyY", "Y"),
            k("KeyU", "U"),
            k("KeyI", "I"),
            k("KeyO", "O"),
            k("KeyP", "P"),
            k("BracketLeft", "["),
            k("BracketRight", "]"),
            k("Backslash", "\\"),
        ],
    },
    KeyGroup {
        name: "home",
        keys: &[
            k("CapsLock", "Caps"),
            k("KeyA", "A"),
            k("KeyS", "S"),
            k("KeyD", "D"),
            k("KeyF", "F"),
            k("KeyG", "G"),
            k("KeyH", "H"),
            k("KeyJ", "J"),
            k("KeyK", "K"),
            k("KeyL", "L"),
            k("Semicolon", ";"),
            k("Quote", "'"),
            k("Enter", "Enter"),
        ],
    },
    KeyGroup {
        name: "bottom",
        keys: &[
            k("ShiftLeft", "Shift"),
            k("KeyZ", "Z"),
            k("KeyX", "X"),
            k("KeyC", "C"),
            k("KeyV", "V"),
            k("KeyB", "B"),
            k("KeyN", "N"),
            k("KeyM", "M"),
            k("Comma", ","),
            k("Period", "."),
            k("Slash", "/"),
            k("ShiftRight", "Shift"),
        ],
    },
    KeyGroup {
        name: "space",
        keys: &[
            k("ControlLeft", "Ctrl"),
            k("MetaLeft", "Meta"),
            k("AltLeft", "Alt"),
            k("Space", "Space"),
            k("AltRight", "Alt"),
            k("MetaRight", "Meta"),
            k("ContextMenu", "Menu"),
            k("ControlRight", "Ctrl"),
        ],
    },
    KeyGroup {
        name: "system",
        keys: &[
            k("PrintScreen", "PrtSc"),
            k("ScrollLock", "ScrLk"),
            k("Pause", "Pause"),
        ],
    },
    KeyGroup {
        name: "navigation",
        keys: &[
            k("Insert", "Ins"),
            k("Home", "Home"),
            k("PageUp", "PgUp"),
            k("Delete", "Del"),
            k("End", "End"),
            k("PageDown", "PgDn"),
        ],
    },
    KeyGroup {
        name: "arrows",
        keys: &[
            k("ArrowUp", "Up"),
            k("ArrowLeft", "Left"),
            k("ArrowDown", "Down"),
            k("ArrowRight", "Right"),
        ],
    },
    KeyGroup {
        name: "numpad",
        keys: &[
            k("NumLock", "NumLk"),
            k("NumpadDivide", "/"),
            k("NumpadMultiply", "*"),
            k("NumpadSubtract", "-"),
            k("Numpad7", "7"),
            k("Numpad8", "8"),
            k("Numpad9", "9"),
            k("NumpadAdd", "+"),
            k("Numpad4", "4"),
            k("Numpad5", "5"),
            k("Numpad6", "6"),
            k("Numpad1", "1"),
            k("Numpad2", "2"),
            k("Numpad3", "3"),
            k("NumpadEnter", "Enter"),
            k("Numpad0", "0"),
            k("NumpadDecimal", "."),
        ],
    },
];

static CODE_TO_KEYDEF: Lazy<HashMap<&'static str, &'static KeyDef>> = Lazy::new(|| {
    layout_keys().map(|k| (k.code, k)).collect()
});

/// Every key of the standard layout, in board order.
pub fn layout_keys() -> impl Iterator<Item = &'static KeyDef> {
    LAYOUT.iter().flat_map(|g| g.keys.iter())
}

pub fn layout_key(code: &str) -> Option<&'static KeyDef> {
    CODE_TO_KEYDEF.get(code).copied()
}

pub fn layout_key_count() -> usize {
    CODE_TO_KEYDEF.len()
}

#[test]
fn layout_codes_are_unique() {
    assert_eq!(layout_keys().count(), layout_key_count());
    assert_eq!(104, layout_key_count());
}
