//! Replays a textual event script through an [`Analyzer`].
//!
//! A script is a whitespace separated list of `kind:value` items, e.g.
//!
//! ```text
//! d:lctl d:s t:80 u:s u:lctl t:200
//! focus:editable d:spc u:spc focus:document
//! md:left t:50 mu:left ctx blur
//! ```
//!
//! | item | meaning |
//! |---|---|
//! | `d:` `down:` `press:` `↓:` | key down |
//! | `u:` `up:` `release:` `↑:` | key up |
//! | `r:` `repeat:` `⟳:` | auto-repeat key down |
//! | `t:` `tick:` `🕐:` | advance the clock by N ms |
//! | `md:` `mu:` | mouse button down/up: index, or left/middle/right/back/forward |
//! | `focus:editable` `focus:document` | target of the following events |
//! | `ctx` | context menu |
//! | `blur` | window lost focus |
//!
//! Key values are codes (`KeyA`) or short names (`a`, `lsft`). Modifier flags follow the modifier
//! keys held at the time, and the produced key is what a US layout would produce. `code=key`
//! overrides the produced key and also allows codes outside the standard layout, e.g.
//! `d:IntlBackslash=<`. Anything after `;;` on a line is ignored.

use anyhow::{Result, anyhow, bail};
use input_analyzer_parser::cfg::Cfg;
use input_analyzer_parser::keys::{code_to_key, code_to_modifier, str_to_code};

use crate::analyzer::{Analyzer, MouseButton, display_label};
use crate::input::*;

pub const MAX_TICKS_PER_ITEM: u64 = 60_000;
pub const MAX_TOTAL_TICKS: u64 = 3_600_000;

pub struct Simulation {
    analyzer: Analyzer,
    target: Target,
    events: Vec<String>,
    pending_ticks: u64,
    total_ticks: u64,
}

impl Simulation {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            target: Target::Document,
            events: vec![],
            pending_ticks: 0,
            total_ticks: 0,
        }
    }

    pub fn from_cfg(cfg: &Cfg) -> Self {
        Self::new(Analyzer::new(cfg))
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn analyzer_mut(&mut self) -> &mut Analyzer {
        &mut self.analyzer
    }

    /// Run every line of `script`.
    pub fn run(&mut self, script: &str) -> Result<()> {
        for l in script.lines() {
            self.run_line(l)?;
        }
        Ok(())
    }

    pub fn run_line(&mut self, l: &str) -> Result<()> {
        let content = l.split(";;").next().unwrap_or_default();
        for item in content.split_whitespace() {
            self.run_item(item).map_err(|e| anyhow!("line: {l}\n{e}"))?;
        }
        Ok(())
    }

    fn run_item(&mut self, item: &str) -> Result<()> {
        match item {
            "ctx" => {
                let d = self.analyzer.handle_input_event(&InputEvent::ContextMenu {
                    target: self.target,
                });
                self.push_event("ctx".to_owned(), d);
                return Ok(());
            }
            "blur" => {
                self.analyzer.handle_input_event(&InputEvent::FocusLost);
                self.push_event("blur".to_owned(), Disposition::PASS);
                return Ok(());
            }
            _ => {}
        }
        let Some((kind, val)) = item.split_once(':') else {
            bail!("invalid item: {item}\nexpected format: action:item");
        };
        match kind {
            "tick" | "🕐" | "t" => {
                let ticks = str::parse::<u64>(val)
                    .map_err(|e| anyhow!("invalid number in {kind}:{val}\n{e}"))?;
                if ticks > MAX_TICKS_PER_ITEM {
                    bail!("max tick is {MAX_TICKS_PER_ITEM}: {kind}:{val}");
                }
                self.total_ticks += ticks;
                if self.total_ticks > MAX_TOTAL_TICKS {
                    bail!("simulating more than an hour of time is not supported");
                }
                self.analyzer.tick_ms(ticks);
                self.pending_ticks += ticks;
            }
            "press" | "↓" | "d" | "down" => {
                let k = self.key_input(val, true)?;
                let label = display_label(&k);
                let d = self.analyzer.handle_input_event(&InputEvent::KeyDown(k));
                self.push_event(format!("↓{label}"), d);
            }
            "repeat" | "⟳" | "r" => {
                let k = self.key_input(val, true)?.repeated();
                let label = display_label(&k);
                let d = self.analyzer.handle_input_event(&InputEvent::KeyDown(k));
                self.push_event(format!("⟳{label}"), d);
            }
            "release" | "↑" | "u" | "up" => {
                let k = self.key_input(val, false)?;
                let d = self.analyzer.handle_input_event(&InputEvent::KeyUp(k));
                // The log entry carries the label from the matching key-down.
                let label = self
                    .analyzer
                    .key_log()
                    .iter()
                    .next_back()
                    .map(|e| e.display.clone())
                    .unwrap_or_default();
                self.push_event(format!("↑{label}"), d);
            }
            "md" | "mu" => {
                let button = MouseButton::from_str_name(val)
                    .ok_or_else(|| anyhow!("unknown mouse button in {kind}:{val}"))?;
                let (event, arrow) = if kind == "md" {
                    let e = InputEvent::MouseDown {
                        button: button.index(),
                        target: self.target,
                    };
                    (e, '↓')
                } else {
                    let e = InputEvent::MouseUp {
                        button: button.index(),
                        target: self.target,
                    };
                    (e, '↑')
                };
                let d = self.analyzer.handle_input_event(&event);
                self.push_event(format!("🖰{arrow}{button}"), d);
            }
            "focus" => {
                self.target = match val {
                    "editable" => Target::Editable,
                    "document" => Target::Document,
                    _ => bail!("invalid focus target {val}\nvalid targets: editable, document"),
                };
            }
            _ => bail!(
                "invalid action: {kind}\nvalid actions:\nd | down\nu | up\nr | repeat\nt | tick\nmd | mu\nfocus\nctx\nblur"
            ),
        }
        Ok(())
    }

    /// Builds the event a browser would deliver for `val` given the keys currently held.
    fn key_input(&self, val: &str, is_down: bool) -> Result<KeyInput> {
        let (code_str, explicit_key) = match val.split_once('=') {
            Some((c, k)) if !c.is_empty() && !k.is_empty() => (c, Some(k)),
            _ => (val, None),
        };
        let code = match (str_to_code(code_str), explicit_key) {
            (Some(code), _) => code.to_owned(),
            (None, Some(_)) => code_str.to_owned(),
            // released without repeating the explicit key
            (None, None) if self.analyzer.is_held(code_str) => code_str.to_owned(),
            (None, None) => bail!("unknown key: {val}"),
        };
        let mut mods = self
            .analyzer
            .held_keys()
            .into_iter()
            .filter(|held| *held != code)
            .filter_map(code_to_modifier)
            .fold(Modifiers::empty(), |acc, m| acc | m);
        if is_down {
            mods |= code_to_modifier(&code).unwrap_or_default();
        }
        let key = match explicit_key {
            Some(k) => k.to_owned(),
            None => code_to_key(&code, mods.contains(Modifiers::SHIFT))
                .unwrap_or("Unidentified")
                .to_owned(),
        };
        Ok(KeyInput::new(code, key)
            .with_mods(mods)
            .with_target(self.target))
    }

    fn push_event(&mut self, mut s: String, d: Disposition) {
        self.flush_ticks();
        if d.prevent_default {
            s.push_str(" (prevented)");
        }
        self.events.push(s);
    }

    fn flush_ticks(&mut self) {
        if self.pending_ticks > 0 {
            self.events.push(format!("t:{}ms", self.pending_ticks));
            self.pending_ticks = 0;
        }
    }

    /// Events so far, one per line, with consecutive ticks merged.
    pub fn transcript(&self) -> String {
        let mut lines = self.events.clone();
        if self.pending_ticks > 0 {
            lines.push(format!("t:{}ms", self.pending_ticks));
        }
        lines.join("\n")
    }
}

/// Run `script` on a fresh analyzer configured by `cfg` and return the transcript.
pub fn simulate(cfg: &Cfg, script: &str) -> Result<String> {
    let mut sim = Simulation::from_cfg(cfg);
    sim.run(script)?;
    Ok(sim.transcript())
}
