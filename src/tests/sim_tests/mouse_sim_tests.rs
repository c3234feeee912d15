use super::*;
use crate::analyzer::MouseButton;

#[test]
fn button_names_in_transcript() {
    let result = simulate(
        "",
        "md:left mu:left md:middle mu:middle md:right ctx mu:right md:4 mu:4 md:8 mu:8",
    );
    assert_eq!(
        "🖰↓Left Click\n🖰↑Left Click\n🖰↓Middle Click\n🖰↑Middle Click\n🖰↓Right Click\n\
         ctx (prevented)\n🖰↑Right Click\n🖰↓Browser Forward\n🖰↑Browser Forward\n\
         🖰↓Button 8\n🖰↑Button 8",
        result
    );
}

#[test]
fn mouse_state() {
    let s = run("(defcfg mouse-flash-duration-ms 100)", "md:left md:right t:50 mu:left");
    let a = s.analyzer();
    assert_eq!(a.last_mouse_button(), Some(MouseButton::Right));
    assert_eq!(a.mouse().active(), Some(MouseButton::Right));
    assert_eq!(a.mouse().held(), vec![MouseButton::Right]);
    assert_eq!(
        a.mouse().ever_pressed(),
        vec![MouseButton::Left, MouseButton::Right]
    );
    let s = run("(defcfg mouse-flash-duration-ms 100)", "md:left t:100");
    assert_eq!(s.analyzer().mouse().active(), None);
}

#[test]
fn mouse_does_not_touch_key_statistics() {
    let s = run("", "md:left mu:left md:back mu:back");
    let a = s.analyzer();
    assert_eq!(a.total_presses(), 0);
    assert!(a.key_log().is_empty());
    assert_eq!(a.last_key_label(), None);
}

#[test]
fn stray_mouse_up_with_event_logging_off() {
    let s = run("(defcfg log-key-events no)", "mu:right md:left mu:left mu:left");
    assert_eq!(
        "🖰↑Right Click\n🖰↓Left Click\n🖰↑Left Click\n🖰↑Left Click",
        s.transcript()
    );
    let a = s.analyzer();
    assert!(a.mouse().held().is_empty());
    assert_eq!(a.mouse().ever_pressed(), vec![MouseButton::Left]);
    assert_eq!(a.last_mouse_button(), Some(MouseButton::Left));
}
