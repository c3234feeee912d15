//! Key code tables.
//!
//! Codes are the physical key identifiers browsers report in `KeyboardEvent.code`, e.g. `KeyA`,
//! `Digit1` or `ControlLeft`. The analyzer itself accepts any code string; the tables here exist
//! for the standard layout (coverage reporting), for resolving the short names used in
//! configuration and simulation files, and for deriving the produced key of a simulated press.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap as HashMap;

mod layout;
pub use layout::*;

bitflags::bitflags! {
    /// Modifier flags carried by a keyboard event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 1;
        const META = 1 << 1;
        const ALT = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

/// `KeyboardEvent.key` values of keys that are themselves modifiers.
pub const MODIFIER_KEY_NAMES: [&str; 6] = ["Control", "Alt", "Meta", "Shift", "AltGraph", "OS"];

pub fn is_modifier_key_name(key: &str) -> bool {
    MODIFIER_KEY_NAMES.contains(&key)
}

/// Returns the modifier flag a physical key contributes while it is held.
pub fn code_to_modifier(code: &str) -> Option<Modifiers> {
    Some(match code {
        "ControlLeft" | "ControlRight" => Modifiers::CTRL,
        "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => Modifiers::META,
        "AltLeft" | "AltRight" => Modifiers::ALT,
        "ShiftLeft" | "ShiftRight" => Modifiers::SHIFT,
        _ => return None,
    })
}

const LOWER_LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];
const UPPER_LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];
const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
// US layout
const SHIFTED_DIGITS: [&str; 10] = [")", "!", "@", "#", "$", "%", "^", "&", "*", "("];
const FUNCTION_KEYS: [&str; 24] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14", "F15",
    "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24",
];

fn single_ascii_index(s: &str, base: u8, len: usize) -> Option<usize> {
    match s.as_bytes() {
        [b] if b.wrapping_sub(base) < len as u8 => Some(usize::from(b - base)),
        _ => None,
    }
}

/// Returns the `KeyboardEvent.key` a US layout produces for `code`, or `None` if the code is not
/// in the table.
pub fn code_to_key(code: &str, shift: bool) -> Option<&'static str> {
    if let Some(i) = code.strip_prefix("Key").and_then(|l| single_ascii_index(l, b'A', 26)) {
        return Some(if shift { UPPER_LETTERS[i] } else { LOWER_LETTERS[i] });
    }
    if let Some(i) = code.strip_prefix("Digit").and_then(|d| single_ascii_index(d, b'0', 10)) {
        return Some(if shift { SHIFTED_DIGITS[i] } else { DIGITS[i] });
    }
    if let Some(i) = code.strip_prefix("Numpad").and_then(|d| single_ascii_index(d, b'0', 10)) {
        return Some(DIGITS[i]);
    }
    let (plain, shifted) = match code {
        "Backquote" => ("`", "~"),
        "Minus" => ("-", "_"),
        "Equal" => ("=", "+"),
        "BracketLeft" => ("[", "{"),
        "BracketRight" => ("]", "}"),
        "Backslash" => ("\\", "|"),
        "Semicolon" => (";", ":"),
        "Quote" => ("'", "\""),
        "Comma" => (",", "<"),
        "Period" => (".", ">"),
        "Slash" => ("/", "?"),
        "Space" => (" ", " "),
        _ => {
            let named = named_key(code)?;
            (named, named)
        }
    };
    Some(if shift { shifted } else { plain })
}

fn named_key(code: &str) -> Option<&'static str> {
    if let Some(f) = FUNCTION_KEYS.iter().copied().find(|f| *f == code) {
        return Some(f);
    }
    Some(match code {
        "Escape" => "Escape",
        "Tab" => "Tab",
        "Backspace" => "Backspace",
        "Enter" | "NumpadEnter" => "Enter",
        "CapsLock" => "CapsLock",
        "ShiftLeft" | "ShiftRight" => "Shift",
        "ControlLeft" | "ControlRight" => "Control",
        "AltLeft" | "AltRight" => "Alt",
        "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => "Meta",
        "ContextMenu" => "ContextMenu",
        "PrintScreen" => "PrintScreen",
        "ScrollLock" => "ScrollLock",
        "Pause" => "Pause",
        "Insert" => "Insert",
        "Home" => "Home",
        "PageUp" => "PageUp",
        "Delete" => "Delete",
        "End" => "End",
        "PageDown" => "PageDown",
        "ArrowUp" => "ArrowUp",
        "ArrowDown" => "ArrowDown",
        "ArrowLeft" => "ArrowLeft",
        "ArrowRight" => "ArrowRight",
        "NumLock" => "NumLock",
        "NumpadDivide" => "/",
        "NumpadMultiply" => "*",
        "NumpadSubtract" => "-",
        "NumpadAdd" => "+",
        "NumpadDecimal" => ".",
        _ => return None,
    })
}

static STR_TO_CODE: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut mappings = HashMap::default();
    add_default_str_code_mappings(&mut mappings);
    mappings.shrink_to_fit();
    mappings
});

fn add_default_str_code_mappings(mapping: &mut HashMap<String, &'static str>) {
    const ALIASES: &[(&str, &str)] = &[
        ("esc", "Escape"),
        ("grv", "Backquote"),
        ("`", "Backquote"),
        ("min", "Minus"),
        ("-", "Minus"),
        ("eql", "Equal"),
        ("=", "Equal"),
        ("bspc", "Backspace"),
        ("tab", "Tab"),
        ("[", "BracketLeft"),
        ("]", "BracketRight"),
        ("\\", "Backslash"),
        ("caps", "CapsLock"),
        (";", "Semicolon"),
        ("'", "Quote"),
        ("ret", "Enter"),
        ("enter", "Enter"),
        ("lsft", "ShiftLeft"),
        ("rsft", "ShiftRight"),
        (",", "Comma"),
        (".", "Period"),
        ("/", "Slash"),
        ("lctl", "ControlLeft"),
        ("rctl", "ControlRight"),
        ("lmet", "MetaLeft"),
        ("lwin", "MetaLeft"),
        ("rmet", "MetaRight"),
        ("rwin", "MetaRight"),
        ("lalt", "AltLeft"),
        ("ralt", "AltRight"),
        ("spc", "Space"),
        ("space", "Space"),
        ("menu", "ContextMenu"),
        ("prtsc", "PrintScreen"),
        ("slck", "ScrollLock"),
        ("pause", "Pause"),
        ("ins", "Insert"),
        ("home", "Home"),
        ("pgup", "PageUp"),
        ("del", "Delete"),
        ("end", "End"),
        ("pgdn", "PageDown"),
        ("up", "ArrowUp"),
        ("down", "ArrowDown"),
        ("left", "ArrowLeft"),
        ("right", "ArrowRight"),
        ("nlck", "NumLock"),
        ("kp/", "NumpadDivide"),
        ("kp*", "NumpadMultiply"),
        ("kp-", "NumpadSubtract"),
        ("kp+", "NumpadAdd"),
        ("kprt", "NumpadEnter"),
        ("kp.", "NumpadDecimal"),
    ];
    for key in layout_keys() {
        mapping.insert(key.code.to_owned(), key.code);
        if let Some(letter) = key.code.strip_prefix("Key") {
            mapping.insert(letter.to_ascii_lowercase(), key.code);
        } else if let Some(digit) = key.code.strip_prefix("Digit") {
            mapping.insert(digit.to_owned(), key.code);
        } else if let Some(digit) = key.code.strip_prefix("Numpad") {
            if digit.len() == 1 {
                mapping.insert(format!("kp{digit}"), key.code);
            }
        }
    }
    for f in FUNCTION_KEYS {
        mapping.insert(f.to_owned(), f);
        mapping.insert(f.to_ascii_lowercase(), f);
    }
    for (alias, code) in ALIASES {
        mapping.insert((*alias).to_owned(), code_str(code));
    }
}

/// Interns a code of the standard layout so the alias table can hand out `'static` strings.
fn code_str(code: &str) -> &'static str {
    layout_key(code)
        .map(|k| k.code)
        .unwrap_or_else(|| panic!("alias points to {code}, which is not in the layout"))
}

/// Resolves a code, or one of its short names (`a`, `1`, `lsft`, `spc`, `kp0`, ...), to the
/// canonical code.
pub fn str_to_code(s: &str) -> Option<&'static str> {
    STR_TO_CODE.get(s).copied()
}
