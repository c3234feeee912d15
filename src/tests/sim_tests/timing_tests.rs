use std::thread::sleep;
use std::time::Duration;

use crate::Analyzer;

use web_time::Instant;

#[test]
fn one_second_is_roughly_1000_counted_ticks() {
    let mut a = Analyzer::default();

    let mut accumulated_ticks = 0;

    let start = Instant::now();
    a.tick_realtime(start);
    while start.elapsed() < Duration::from_secs(1) {
        sleep(Duration::from_millis(1));
        accumulated_ticks += a.tick_realtime(Instant::now());
    }

    let actually_elapsed_ms = start.elapsed().as_millis() as u64;

    // Allow fudge of 1%
    eprintln!("ticks:{accumulated_ticks}, actual elapsed:{actually_elapsed_ms}");
    assert!(accumulated_ticks < (actually_elapsed_ms + 10));
    assert!(accumulated_ticks > (actually_elapsed_ms - 10));
    assert_eq!(a.now_ms(), accumulated_ticks);
}

#[test]
fn advance_to_never_goes_backwards() {
    let mut a = Analyzer::default().with_start_time(5_000);
    a.advance_to(4_000);
    assert_eq!(a.now_ms(), 5_000);
    a.advance_to(6_500);
    assert_eq!(a.now_ms(), 6_500);
    assert_eq!(a.session_duration_ms(), 1_500);
}
