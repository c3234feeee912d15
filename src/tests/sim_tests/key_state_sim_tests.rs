use super::*;
use crate::analyzer::{EntryKind, KeyStatus};

#[test]
fn held_set_follows_down_and_up() {
    let s = run("", "d:a d:b d:c u:b");
    let a = s.analyzer();
    assert_eq!(a.held_keys(), vec!["KeyA", "KeyC"]);
    assert_eq!(a.ever_pressed_keys(), vec!["KeyA", "KeyB", "KeyC"]);
    assert_eq!(a.key_status("KeyB"), KeyStatus::EverPressed);
    assert_eq!(a.key_status("KeyA"), KeyStatus::Held);
    assert_eq!(a.key_status("KeyC"), KeyStatus::Active);
    assert_eq!(a.key_status("KeyD"), KeyStatus::Never);
}

#[test]
fn flash_ends_after_its_duration() {
    let s = run("", "d:a t:199");
    assert_eq!(s.analyzer().active_key(), Some("KeyA"));
    let s = run("", "d:a t:200");
    assert_eq!(s.analyzer().active_key(), None);
    let s = run("(defcfg flash-duration-ms 50)", "d:a t:50");
    assert_eq!(s.analyzer().active_key(), None);
}

#[test]
fn newer_flash_survives_older_timer() {
    let s = run("", "d:a t:150 u:a d:b t:60");
    assert_eq!(s.analyzer().active_key(), Some("KeyB"));
    let s = run("", "d:a t:150 u:a d:b t:200");
    assert_eq!(s.analyzer().active_key(), None);
}

#[test]
fn key_up_delays_are_logged() {
    let s = run("", "d:a t:40 d:b t:25 u:a t:10 u:b");
    let entries: Vec<_> = s
        .analyzer()
        .key_log()
        .iter()
        .map(|e| (e.kind, e.display.as_str(), e.delay_ms, e.timestamp_ms))
        .collect();
    assert_eq!(
        entries,
        vec![
            (EntryKind::Down, "A", None, 0),
            (EntryKind::Down, "B", None, 40),
            (EntryKind::Up, "A", Some(65), 65),
            (EntryKind::Up, "B", Some(35), 75),
        ]
    );
    // last key-down to the release of the last held key
    assert_eq!(s.analyzer().last_press_duration(), Some(35));
}

#[test]
fn up_without_down_is_logged_without_delay() {
    let s = run("", "u:a");
    let a = s.analyzer();
    let e = a.key_log().iter().next().expect("one entry");
    assert_eq!(e.kind, EntryKind::Up);
    assert_eq!(e.delay_ms, None);
    assert_eq!(e.display, "A");
    assert_eq!(a.average_delay(), None);
    assert_eq!(a.last_press_duration(), None);
}

#[test]
fn repeats_do_not_count() {
    let s = run("", "d:a t:500 r:a t:33 r:a t:33 r:a t:10 u:a");
    let a = s.analyzer();
    assert_eq!(a.total_presses(), 1);
    assert_eq!(a.frequency().count("A"), 1);
    assert_eq!(a.key_log().len(), 2);
    assert_eq!(
        a.key_log().iter().next_back().and_then(|e| e.delay_ms),
        Some(576)
    );
}

#[test]
fn repeat_rearms_the_flash() {
    let s = run("", "d:a t:500 r:a t:100");
    assert_eq!(s.analyzer().active_key(), Some("KeyA"));
}

#[test]
fn blur_releases_everything_without_timing() {
    let s = run("", "d:lalt d:tab md:left t:30 blur t:10 u:tab u:lalt");
    let a = s.analyzer();
    assert!(a.held_keys().is_empty());
    assert!(a.mouse().held().is_empty());
    assert_eq!(a.ever_pressed_keys(), vec!["AltLeft", "Tab"]);
    let delays: Vec<_> = a.key_log().iter().filter_map(|e| e.delay_ms).collect();
    assert!(delays.is_empty());
    assert_eq!(
        s.transcript(),
        "↓Alt\n↓Alt+Tab (prevented)\n🖰↓Left Click\nt:30ms\nblur\nt:10ms\n↑Tab\n↑Alt"
    );
}

#[test]
fn reset_keeps_held_keys() {
    let mut s = run("", "d:a u:a d:lsft t:100 d:b u:b");
    s.analyzer_mut().reset();
    let a = s.analyzer();
    assert_eq!(a.total_presses(), 0);
    assert!(a.key_log().is_empty());
    assert!(a.frequency().is_empty());
    assert_eq!(a.average_delay(), None);
    assert_eq!(a.session_duration_ms(), 0);
    assert_eq!(a.last_key_label(), None);
    assert_eq!(a.held_keys(), vec!["ShiftLeft"]);
    assert_eq!(a.ever_pressed_keys(), vec!["ShiftLeft"]);
    assert_eq!(a.key_status("KeyA"), KeyStatus::Never);
}

#[test]
fn bounded_log() {
    let s = run("(defcfg log-max-entries 3)", "d:a u:a d:b u:b");
    let log = s.analyzer().key_log();
    assert_eq!(log.len(), 3);
    let ids: Vec<u64> = log.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(s.analyzer().total_presses(), 2);
}
