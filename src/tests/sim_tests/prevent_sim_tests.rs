use super::*;

#[test]
fn default_table() {
    let result = simulate(
        "",
        "
         d:up u:up d:f1 u:f1 d:f12 u:f12 d:tab u:tab d:bspc u:bspc
         d:/ u:/ d:ret u:ret d:esc u:esc d:pgdn u:pgdn
        ",
    );
    assert_eq!(
        "↓ArrowUp (prevented)\n↑ArrowUp\n↓F1 (prevented)\n↑F1\n↓F12 (prevented)\n↑F12\n\
         ↓Tab (prevented)\n↑Tab\n↓Backspace (prevented)\n↑Backspace\n\
         ↓/ (prevented)\n↑/\n↓Enter\n↑Enter\n↓Escape\n↑Escape\n↓PageDown\n↑PageDown",
        result
    );
}

#[test]
fn browser_shortcuts() {
    let result = simulate(
        "",
        "
         d:lctl d:r u:r d:5 u:5 d:; u:; u:lctl
         d:rmet d:w u:w u:rmet
         d:lalt d:f u:f u:lalt
        ",
    );
    assert_eq!(
        "↓Control\n↓Ctrl+R (prevented)\n↑Ctrl+R\n↓Ctrl+5 (prevented)\n↑Ctrl+5\n↓Ctrl+;\n↑Ctrl+;\n↑Control\n\
         ↓Meta\n↓Meta+W (prevented)\n↑Meta+W\n↑Meta\n\
         ↓Alt\n↓Alt+F\n↑Alt+F\n↑Alt",
        result
    );
}

#[test]
fn shifted_digit_shortcut_is_still_prevented() {
    // the produced key is "!" but the code is a digit
    let result = simulate("", "d:lctl d:lsft d:1");
    assert_eq!("↓Control\n↓Shift\n↓Ctrl+! (prevented)", result);
}

#[test]
fn nothing_is_prevented_in_editable_targets() {
    let result = simulate(
        "",
        "
         focus:editable d:spc u:spc d:tab u:tab d:lctl d:a u:a u:lctl ctx md:back
         focus:document d:spc ctx
        ",
    );
    assert_eq!(
        "↓Space\n↑Space\n↓Tab\n↑Tab\n↓Control\n↓Ctrl+A\n↑Ctrl+A\n↑Control\nctx\n🖰↓Browser Back\n\
         ↓Space (prevented)\nctx (prevented)",
        result
    );
}

#[test]
fn configured_table() {
    let result = simulate(
        "
         (defcfg prevent-enter yes prevent-tab no prevent-context-menu no
                 prevent-mouse-navigation yes prevent-browser-shortcuts no)
         (defprevent esc)
         (defallow spc f5)
        ",
        "
         d:ret d:tab d:esc d:spc d:f5 d:f6 ctx md:back mu:back md:left
         d:lctl d:r
        ",
    );
    assert_eq!(
        "↓Enter (prevented)\n↓Tab\n↓Escape (prevented)\n↓Space\n↓F5\n↓F6 (prevented)\nctx\n\
         🖰↓Browser Back (prevented)\n🖰↑Browser Back (prevented)\n🖰↓Left Click\n\
         ↓Control\n↓Ctrl+R",
        result
    );
}

#[test]
fn repeats_are_prevented_like_presses() {
    let result = simulate("", "d:down t:500 r:down t:33 r:down u:down");
    assert_eq!(
        "↓ArrowDown (prevented)\nt:500ms\n⟳ArrowDown (prevented)\nt:33ms\n⟳ArrowDown (prevented)\n↑ArrowDown",
        result
    );
}
