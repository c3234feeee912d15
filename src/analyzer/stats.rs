//! Derived figures shown in the summary.

use serde::Serialize;
use std::fmt;

/// Rounded mean of `delays`, half rounding up. `None` when there is nothing to average.
pub fn average_delay(delays: &[u64]) -> Option<u64> {
    let mut avg = RunningAverage::default();
    delays.iter().for_each(|d| avg.add(*d));
    avg.get()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningAverage {
    sum: u128,
    count: u64,
}

impl RunningAverage {
    pub fn add(&mut self, v: u64) {
        self.sum += u128::from(v);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn get(&self) -> Option<u64> {
        if self.count == 0 {
            return None;
        }
        let count = u128::from(self.count);
        let rounded = (self.sum * 2 + count) / (count * 2);
        Some(u64::try_from(rounded).unwrap_or(u64::MAX))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LatencyRating {
    Excellent,
    Good,
    Average,
    Slow,
}

impl LatencyRating {
    pub fn from_delay_ms(ms: u64) -> Self {
        match ms {
            0..5 => LatencyRating::Excellent,
            5..=15 => LatencyRating::Good,
            16..=30 => LatencyRating::Average,
            _ => LatencyRating::Slow,
        }
    }
}

impl fmt::Display for LatencyRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            LatencyRating::Excellent => "Excellent",
            LatencyRating::Good => "Good",
            LatencyRating::Average => "Average",
            LatencyRating::Slow => "Slow",
        };
        f.write_str(s)
    }
}

/// `MM:SS`, or `H:MM:SS` from one hour on.
pub fn format_session_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_fixed_list() {
        assert_eq!(average_delay(&[]), None);
        assert_eq!(average_delay(&[10, 20, 30]), Some(20));
        assert_eq!(average_delay(&[1, 2]), Some(2));
        assert_eq!(average_delay(&[1, 1, 2]), Some(1));
        assert_eq!(average_delay(&[0]), Some(0));
    }

    #[test]
    fn running_average_clears() {
        let mut a = RunningAverage::default();
        a.add(7);
        a.add(8);
        assert_eq!(a.get(), Some(8));
        assert_eq!(a.count(), 2);
        a.clear();
        assert_eq!(a.get(), None);
    }

    #[test]
    fn latency_bands() {
        use LatencyRating::*;
        let cases = [
            (0, Excellent),
            (4, Excellent),
            (5, Good),
            (15, Good),
            (16, Average),
            (30, Average),
            (31, Slow),
        ];
        for (ms, want) in cases {
            assert_eq!(LatencyRating::from_delay_ms(ms), want, "{ms}ms");
        }
        assert_eq!(Slow.to_string(), "Slow");
    }

    #[test]
    fn session_duration_formatting() {
        assert_eq!(format_session_duration(0), "00:00");
        assert_eq!(format_session_duration(61_999), "01:01");
        assert_eq!(format_session_duration(3_599_999), "59:59");
        assert_eq!(format_session_duration(3_600_000), "1:00:00");
        assert_eq!(format_session_duration(37_230_000), "10:20:30");
    }
}
