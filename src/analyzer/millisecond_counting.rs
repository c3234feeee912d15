use web_time::Instant;

const NS_IN_MS: u128 = 1_000_000;

/// Real-time clock feeding whole milliseconds into the analyzer. The fractional part of each
/// reading is carried into the next one so that frequent polling does not lose time.
#[derive(Debug, Clone, Copy)]
pub struct MsCounter {
    last_tick: Instant,
    remainder_ns: u128,
}

impl MsCounter {
    pub fn start(now: Instant) -> Self {
        Self {
            last_tick: now,
            remainder_ns: 0,
        }
    }

    /// Whole milliseconds elapsed since the previous call, plus any carried fraction.
    pub fn elapsed_ms(&mut self, now: Instant) -> u64 {
        if now < self.last_tick {
            return 0;
        }
        let ns = now.duration_since(self.last_tick).as_nanos() + self.remainder_ns;
        self.last_tick = now;
        self.remainder_ns = ns % NS_IN_MS;
        u64::try_from(ns / NS_IN_MS).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn under_one_ms_is_carried() {
        let start = Instant::now();
        let mut c = MsCounter::start(start);
        let t1 = start + Duration::from_nanos(999_999);
        assert_eq!(c.elapsed_ms(t1), 0);
        assert_eq!(c.last_tick, t1);
        assert_eq!(c.remainder_ns, 999_999);
        assert_eq!(c.elapsed_ms(t1 + Duration::from_nanos(1)), 1);
        assert_eq!(c.remainder_ns, 0);
    }

    #[test]
    fn frequent_polling_counts_real_time_once() {
        let start = Instant::now();
        let mut c = MsCounter::start(start);
        let counted: u64 = (1..=100)
            .map(|i| c.elapsed_ms(start + Duration::from_micros(300 * i)))
            .sum();
        assert_eq!(counted, 30);
        assert_eq!(c.remainder_ns, 0);
    }

    #[test]
    fn remainder_accumulates_across_readings() {
        let start = Instant::now();
        let mut c = MsCounter::start(start);
        let t1 = start + Duration::from_micros(1750);
        assert_eq!(c.elapsed_ms(t1), 1);
        assert_eq!(c.remainder_ns, 750_000);
        let t2 = t1 + Duration::from_micros(1750);
        assert_eq!(c.elapsed_ms(t2), 2);
        assert_eq!(c.last_tick, t2);
        assert_eq!(c.remainder_ns, 500_000);
    }

    #[test]
    fn clock_going_backwards_reads_zero() {
        let start = Instant::now() + Duration::from_millis(5);
        let mut c = MsCounter::start(start);
        assert_eq!(c.elapsed_ms(start - Duration::from_millis(5)), 0);
        assert_eq!(c.last_tick, start);
        assert_eq!(c.elapsed_ms(start + Duration::from_millis(2)), 2);
    }
}
