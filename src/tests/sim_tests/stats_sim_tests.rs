use super::*;
use crate::analyzer::{KeyCount, LatencyRating};
use crate::report::{render_key_log, render_summary};
use indoc::indoc;

#[test]
fn frequency_counts_repeated_key() {
    let s = run("", "d:a u:a d:a u:a d:b u:b d:a u:a");
    let a = s.analyzer();
    assert_eq!(a.frequency().count("A"), 3);
    assert_eq!(a.frequency().count("B"), 1);
    assert_eq!(
        a.most_frequent(),
        Some(KeyCount {
            key: "A".into(),
            count: 3
        })
    );
    assert_eq!(a.total_presses(), 4);
}

#[test]
fn combos_count_separately() {
    let s = run("", "d:s u:s d:lctl d:s u:s d:s u:s u:lctl");
    let top: Vec<_> = s
        .analyzer()
        .top_keys()
        .into_iter()
        .map(|k| (k.key, k.count))
        .collect();
    assert_eq!(
        top,
        vec![
            ("Ctrl+S".to_owned(), 2),
            ("S".to_owned(), 1),
            ("Control".to_owned(), 1)
        ]
    );
}

#[test]
fn top_keys_is_limited_by_configuration() {
    let s = run("(defcfg top-keys 2)", "d:a d:b d:c d:d");
    assert_eq!(s.analyzer().top_keys().len(), 2);
}

#[test]
fn average_delay_and_rating() {
    let s = run("", "d:a t:4 u:a d:b t:5 u:b");
    let a = s.analyzer();
    assert_eq!(a.average_delay(), Some(5));
    assert_eq!(a.latency_rating(), Some(LatencyRating::Good));
    let s = run("", "d:a t:3 u:a");
    assert_eq!(s.analyzer().latency_rating(), Some(LatencyRating::Excellent));
    let s = run("", "d:a t:80 u:a d:b t:100 u:b");
    assert_eq!(s.analyzer().average_delay(), Some(90));
    assert_eq!(s.analyzer().latency_rating(), Some(LatencyRating::Slow));
}

#[test]
fn coverage_counts_layout_keys_only() {
    let s = run("", "d:a u:a d:a u:a d:f20 u:f20 d:IntlBackslash=< u:IntlBackslash");
    let a = s.analyzer();
    assert_eq!(a.coverage(), (1, 104));
    assert_eq!(a.untested_keys().len(), 103);
    assert!(a.untested_keys().iter().all(|k| k.code != "KeyA"));
}

#[test]
fn summary_and_log() {
    let s = run(
        "",
        "t:1000 d:a t:80 u:a t:920 d:lctl d:s t:20 u:s u:lctl t:59000",
    );
    let a = s.analyzer();
    assert_eq!(
        render_summary(&a.snapshot()),
        indoc! {"
            Total presses: 3
            Average delay: 40ms (Slow)
            Last press duration: 20ms
            Session time: 01:01
            Most used: A (1)
            Coverage: 3/104 keys"}
    );
    assert_eq!(
        render_key_log(a.key_log().iter()),
        indoc! {"
            00:00:02.020  Released  Control  Delay: 20ms
            00:00:02.020  Released  Ctrl+S  Delay: 20ms
            00:00:02.000  Pressed   Ctrl+S
            00:00:02.000  Pressed   Control
            00:00:01.080  Released  A  Delay: 80ms
            00:00:01.000  Pressed   A"}
    );
}

#[test]
fn empty_summary() {
    let s = run("", &"t:60000 ".repeat(60));
    assert_eq!(
        render_summary(&s.analyzer().snapshot()),
        indoc! {"
            Total presses: 0
            Average delay: N/A
            Session time: 1:00:00
            Most used: N/A (0)
            Coverage: 0/104 keys"}
    );
}

#[test]
fn json_snapshot() {
    let s = run("", "d:a t:5 u:a md:right");
    let json = s.analyzer().snapshot().to_json().expect("serializes");
    let v: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(v["total_presses"], 1);
    assert_eq!(v["last_key"], "A");
    assert_eq!(v["last_mouse_button"], "Right Click");
    assert_eq!(v["latency_rating"], "Good");
    assert_eq!(v["log"][1]["kind"], "up");
    assert_eq!(v["log"][1]["delay_ms"], 5);
    assert!(v["log"][0].get("delay_ms").is_none());
}
