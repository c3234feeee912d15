//! Turns a keyboard event into the label shown to the user, e.g. `Ctrl+S`, `A` or `Space`.

use input_analyzer_parser::keys::is_modifier_key_name;

use crate::input::{KeyInput, Modifiers};

/// Key values browsers report when the produced character is not known yet or not at all.
fn is_unresolved_key(key: &str) -> bool {
    matches!(key, "" | "Dead" | "Unidentified" | "Process")
}

fn base_label(code: &str, key: &str) -> String {
    if code == "Space" {
        "Space".to_owned()
    } else if is_unresolved_key(key) {
        code.to_owned()
    } else if code.starts_with("Key") {
        key.to_uppercase()
    } else {
        key.to_owned()
    }
}

/// Never fails: unknown codes and keys fall back to their raw values.
pub fn display_label(input: &KeyInput) -> String {
    if is_modifier_key_name(&input.key) {
        return input.key.clone();
    }
    let base = base_label(&input.code, &input.key);
    let mut label = String::with_capacity(base.len() + 16);
    if input.mods.contains(Modifiers::CTRL) {
        label.push_str("Ctrl+");
    }
    if input.mods.contains(Modifiers::META) {
        label.push_str("Meta+");
    }
    if input.mods.contains(Modifiers::ALT) {
        label.push_str("Alt+");
    }
    // Shift already shows in a produced character.
    if input.mods.contains(Modifiers::SHIFT) && base.chars().count() > 1 {
        label.push_str("Shift+");
    }
    label.push_str(&base);
    label
}
