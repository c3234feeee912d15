//! The input analyzer state machine.
//!
//! [`Analyzer`] receives [`InputEvent`]s, decides for each one whether the host should suppress
//! the browser's default action, and keeps the state a keyboard tester shows: the flashing key,
//! held keys, keys pressed at least once, a key log, press counts and timing figures.
//!
//! Time is owned by the analyzer. It only moves when the host calls [`Analyzer::tick_ms`],
//! [`Analyzer::advance_to`] or [`Analyzer::tick_realtime`]; events are stamped with the current
//! analyzer time.

use anyhow::Result;
use input_analyzer_parser::cfg::{self, Cfg};
use input_analyzer_parser::keys::{layout_key_count, layout_keys, KeyDef};
use web_time::Instant;

use crate::input::*;
use crate::report::Snapshot;

mod key_log;
mod key_state;
mod millisecond_counting;
mod mouse;
mod normalize;
mod prevent;
mod stats;

pub use key_log::*;
pub use key_state::{HeldKey, KeyRelease, KeyStatus};
pub use millisecond_counting::MsCounter;
pub use mouse::*;
pub use normalize::display_label;
pub use prevent::PreventPolicy;
pub use stats::*;

use key_state::KeyStateTracker;

pub struct Analyzer {
    policy: PreventPolicy,
    keys: KeyStateTracker,
    mouse: MouseTracker,
    log: KeyLog,
    frequency: KeyFrequency,
    delays: RunningAverage,
    total_presses: u64,
    last_key_label: Option<String>,
    /// Current analyzer time in ms.
    now: u64,
    session_start: u64,
    realtime: Option<MsCounter>,
    top_keys: usize,
    log_key_events: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Cfg::default())
    }
}

impl Analyzer {
    pub fn new(cfg: &Cfg) -> Self {
        let o = &cfg.options;
        Self {
            policy: PreventPolicy::from_cfg(cfg),
            keys: KeyStateTracker::new(o.flash_duration_ms.into()),
            mouse: MouseTracker::new(o.mouse_flash_duration_ms.into()),
            log: KeyLog::new(o.log_max_entries.into()),
            frequency: KeyFrequency::default(),
            delays: RunningAverage::default(),
            total_presses: 0,
            last_key_label: None,
            now: 0,
            session_start: 0,
            realtime: None,
            top_keys: o.top_keys.into(),
            log_key_events: o.log_key_events,
        }
    }

    /// Start the clock at `ms` instead of zero, e.g. at a wall clock time for readable log
    /// timestamps.
    pub fn with_start_time(mut self, ms: u64) -> Self {
        self.now = ms;
        self.session_start = ms;
        self
    }

    pub fn new_from_str(cfg: &str) -> Result<Self> {
        let cfg = cfg::new_from_str(cfg).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(Self::new(&cfg))
    }

    /// Update state for one event and return what the host should do with it.
    pub fn handle_input_event(&mut self, event: &InputEvent) -> Disposition {
        match event {
            InputEvent::KeyDown(k) => self.key_down(k),
            InputEvent::KeyUp(k) => self.key_up(k),
            InputEvent::MouseDown { button, target } => {
                let b = MouseButton::from(*button);
                if self.log_key_events {
                    log::debug!("mouse down {b} at {}ms", self.now);
                }
                self.mouse.button_down(b, self.now);
                Disposition::prevent_if(self.policy.should_prevent_mouse_button(*button, *target))
            }
            InputEvent::MouseUp { button, target } => {
                let b = MouseButton::from(*button);
                if !self.mouse.button_up(b) && self.log_key_events {
                    log::debug!("mouse up for {b} which was not held");
                }
                Disposition::prevent_if(self.policy.should_prevent_mouse_button(*button, *target))
            }
            InputEvent::ContextMenu { target } => {
                Disposition::prevent_if(self.policy.should_prevent_context_menu(*target))
            }
            InputEvent::FocusLost => {
                let released = self.keys.release_all();
                self.mouse.release_all();
                if !released.is_empty() {
                    log::debug!("focus lost, released {released:?}");
                }
                Disposition::PASS
            }
        }
    }

    fn key_down(&mut self, k: &KeyInput) -> Disposition {
        let disposition = Disposition::prevent_if(self.policy.should_prevent_key(k));
        if k.repeat {
            self.keys.key_repeat(&k.code, self.now);
            return disposition;
        }
        let label = display_label(k);
        if self.log_key_events {
            log::debug!(
                "key down {} ({}) at {}ms prevent={}",
                k.code,
                label,
                self.now,
                disposition.prevent_default
            );
        }
        self.keys.key_down(&k.code, label.clone(), self.now);
        self.frequency.record(&label);
        self.total_presses += 1;
        self.log
            .push(self.now, EntryKind::Down, label.clone(), k.code.clone(), None);
        self.last_key_label = Some(label);
        disposition
    }

    fn key_up(&mut self, k: &KeyInput) -> Disposition {
        let release = self.keys.key_up(&k.code, self.now);
        let label = release.label.unwrap_or_else(|| display_label(k));
        if let Some(delay) = release.delay_ms {
            self.delays.add(delay);
        }
        if self.log_key_events {
            log::debug!(
                "key up {} ({}) at {}ms delay={:?}",
                k.code,
                label,
                self.now,
                release.delay_ms
            );
        }
        self.log.push(
            self.now,
            EntryKind::Up,
            label,
            k.code.clone(),
            release.delay_ms,
        );
        Disposition::PASS
    }

    /// Advance the analyzer clock and end flashes whose time is up.
    pub fn tick_ms(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
        if self.keys.expire(self.now) {
            log::trace!("key flash ended at {}ms", self.now);
        }
        self.mouse.expire(self.now);
    }

    /// Move the clock forward to `ts`. Earlier timestamps are ignored.
    pub fn advance_to(&mut self, ts: u64) {
        if ts > self.now {
            self.tick_ms(ts - self.now);
        }
    }

    /// Advance by the real time passed since the previous call. Returns the ms applied.
    pub fn tick_realtime(&mut self, now: Instant) -> u64 {
        let counter = self.realtime.get_or_insert_with(|| MsCounter::start(now));
        let ms = counter.elapsed_ms(now);
        if ms > 0 {
            self.tick_ms(ms);
        }
        ms
    }

    /// Clear history and statistics and restart the session. Keys still held stay held.
    pub fn reset(&mut self) {
        log::info!("resetting analyzer state");
        self.log.clear();
        self.frequency.clear();
        self.delays.clear();
        self.total_presses = 0;
        self.last_key_label = None;
        self.keys.reset();
        self.mouse.reset();
        self.session_start = self.now;
    }

    pub fn now_ms(&self) -> u64 {
        self.now
    }

    pub fn policy(&self) -> &PreventPolicy {
        &self.policy
    }

    pub fn last_key_label(&self) -> Option<&str> {
        self.last_key_label.as_deref()
    }

    pub fn last_mouse_button(&self) -> Option<MouseButton> {
        self.mouse.last()
    }

    pub fn mouse(&self) -> &MouseTracker {
        &self.mouse
    }

    /// Time from the most recent key-down to the release that emptied the held set.
    pub fn last_press_duration(&self) -> Option<u64> {
        self.keys.last_press_duration()
    }

    pub fn total_presses(&self) -> u64 {
        self.total_presses
    }

    pub fn average_delay(&self) -> Option<u64> {
        self.delays.get()
    }

    pub fn latency_rating(&self) -> Option<LatencyRating> {
        self.average_delay().map(LatencyRating::from_delay_ms)
    }

    pub fn session_duration_ms(&self) -> u64 {
        self.now - self.session_start
    }

    pub fn most_frequent(&self) -> Option<KeyCount> {
        self.frequency.most_frequent()
    }

    pub fn top_keys(&self) -> Vec<KeyCount> {
        self.frequency.top_n(self.top_keys)
    }

    pub fn frequency(&self) -> &KeyFrequency {
        &self.frequency
    }

    pub fn key_status(&self, code: &str) -> KeyStatus {
        self.keys.status(code)
    }

    pub fn active_key(&self) -> Option<&str> {
        self.keys.active()
    }

    pub fn held_keys(&self) -> Vec<&str> {
        self.keys.held_codes()
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.keys.is_held(code)
    }

    pub fn ever_pressed_keys(&self) -> Vec<&str> {
        self.keys.ever_pressed_codes()
    }

    /// Standard layout keys pressed at least once, and the size of the layout.
    pub fn coverage(&self) -> (usize, usize) {
        let tested = layout_keys()
            .filter(|k| self.keys.was_ever_pressed(k.code))
            .count();
        (tested, layout_key_count())
    }

    pub fn untested_keys(&self) -> Vec<&'static KeyDef> {
        layout_keys()
            .filter(|k| !self.keys.was_ever_pressed(k.code))
            .collect()
    }

    pub fn key_log(&self) -> &KeyLog {
        &self.log
    }

    pub fn snapshot(&self) -> Snapshot {
        let (tested, total) = self.coverage();
        Snapshot {
            now_ms: self.now,
            last_key: self.last_key_label.clone(),
            last_mouse_button: self.mouse.last().map(|b| b.to_string()),
            active_key: self.keys.active().map(str::to_owned),
            active_mouse_button: self.mouse.active().map(|b| b.to_string()),
            held_keys: self.held_keys().into_iter().map(str::to_owned).collect(),
            held_mouse_buttons: self.mouse.held().iter().map(|b| b.to_string()).collect(),
            total_presses: self.total_presses,
            average_delay_ms: self.average_delay(),
            latency_rating: self.latency_rating(),
            last_press_duration_ms: self.last_press_duration(),
            session_duration: format_session_duration(self.session_duration_ms()),
            most_frequent: self.most_frequent(),
            top_keys: self.top_keys(),
            keys_tested: tested,
            keys_total: total,
            log: self.log.iter().cloned().collect(),
        }
    }
}
