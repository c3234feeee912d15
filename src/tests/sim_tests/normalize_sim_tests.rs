use super::*;

#[test]
fn basic_labels() {
    let result = simulate(
        "",
        "
         d:spc u:spc d:a u:a d:1 u:1 d:ret u:ret
        ",
    );
    assert_eq!(
        "↓Space (prevented)\n↑Space\n↓A\n↑A\n↓1\n↑1\n↓Enter\n↑Enter",
        result
    );
}

#[test]
fn shift_changes_characters_not_labels() {
    let result = simulate("", "d:rsft d:a u:a d:2 u:2 d:tab u:tab u:rsft");
    assert_eq!(
        "↓Shift\n↓A\n↑A\n↓@\n↑@\n↓Shift+Tab (prevented)\n↑Shift+Tab\n↑Shift",
        result
    );
}

#[test]
fn modifier_order_is_ctrl_meta_alt_shift() {
    let result = simulate("", "d:lalt d:lsft d:lmet d:rctl d:home");
    assert_eq!(
        "↓Alt\n↓Shift\n↓Meta\n↓Control\n↓Ctrl+Meta+Alt+Shift+Home",
        result
    );
}

#[test]
fn key_up_keeps_the_key_down_label() {
    // releasing ctrl first must not turn "Ctrl+S" into "S"
    let result = simulate("", "d:lctl d:s u:lctl u:s");
    assert_eq!("↓Control\n↓Ctrl+S (prevented)\n↑Control\n↑Ctrl+S", result);
}

#[test]
fn unresolved_keys_use_the_code() {
    let result = simulate("", "d:Quote=Dead u:Quote d:Lang2=Unidentified u:Lang2");
    assert_eq!("↓Quote\n↑Quote\n↓Lang2\n↑Lang2", result);
}

#[test]
fn numpad_keys() {
    let result = simulate("", "d:kp7 u:kp7 d:kp+ u:kp+ d:kprt u:kprt");
    assert_eq!("↓7\n↑7\n↓+\n↑+\n↓Enter\n↑Enter", result);
}
