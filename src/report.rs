//! Text and JSON views of the analyzer state.

use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::analyzer::{EntryKind, KeyCount, KeyLogEntry, LatencyRating};

/// Everything a tester view shows, detached from the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub now_ms: u64,
    pub last_key: Option<String>,
    pub last_mouse_button: Option<String>,
    pub active_key: Option<String>,
    pub active_mouse_button: Option<String>,
    pub held_keys: Vec<String>,
    pub held_mouse_buttons: Vec<String>,
    pub total_presses: u64,
    pub average_delay_ms: Option<u64>,
    pub latency_rating: Option<LatencyRating>,
    pub last_press_duration_ms: Option<u64>,
    pub session_duration: String,
    pub most_frequent: Option<KeyCount>,
    pub top_keys: Vec<KeyCount>,
    pub keys_tested: usize,
    pub keys_total: usize,
    /// Oldest first.
    pub log: Vec<KeyLogEntry>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `HH:MM:SS.mmm` of a millisecond timestamp, in UTC.
pub fn format_timestamp(ms: u64) -> String {
    let fmt = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|t| t.format(fmt).ok())
        .unwrap_or_else(|| format!("{ms}ms"))
}

pub fn render_log_entry(e: &KeyLogEntry) -> String {
    let action = match e.kind {
        EntryKind::Down => "Pressed ",
        EntryKind::Up => "Released",
    };
    let line = format!("{}  {action}  {}", format_timestamp(e.timestamp_ms), e.display);
    match e.delay_ms {
        Some(d) => format!("{line}  Delay: {d}ms"),
        None => line,
    }
}

/// One line per entry, newest first.
pub fn render_key_log<'a>(entries: impl DoubleEndedIterator<Item = &'a KeyLogEntry>) -> String {
    entries
        .rev()
        .map(render_log_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_summary(s: &Snapshot) -> String {
    let mut lines = vec![format!("Total presses: {}", s.total_presses)];
    lines.push(match (s.average_delay_ms, s.latency_rating) {
        (Some(avg), Some(rating)) => format!("Average delay: {avg}ms ({rating})"),
        _ => "Average delay: N/A".to_owned(),
    });
    if let Some(d) = s.last_press_duration_ms {
        lines.push(format!("Last press duration: {d}ms"));
    }
    lines.push(format!("Session time: {}", s.session_duration));
    lines.push(match &s.most_frequent {
        Some(k) => format!("Most used: {} ({})", k.key, k.count),
        None => "Most used: N/A (0)".to_owned(),
    });
    lines.push(format!("Coverage: {}/{} keys", s.keys_tested, s.keys_total));
    lines.join("\n")
}
