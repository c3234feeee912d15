use super::error::*;
use super::sexpr::SExpr;
use super::{check_first_expr, HashSet};
use crate::{anyhow_expr, bail_expr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgOptions {
    pub flash_duration_ms: u16,
    pub mouse_flash_duration_ms: u16,
    pub prevent_tab: bool,
    pub prevent_enter: bool,
    pub prevent_backspace: bool,
    pub prevent_slash: bool,
    pub prevent_browser_shortcuts: bool,
    pub prevent_context_menu: bool,
    pub prevent_mouse_navigation: bool,
    /// Zero keeps every entry.
    pub log_max_entries: u16,
    pub top_keys: u16,
    pub log_key_events: bool,
}

impl Default for CfgOptions {
    fn default() -> Self {
        Self {
            flash_duration_ms: 200,
            mouse_flash_duration_ms: 200,
            prevent_tab: true,
            prevent_enter: false,
            prevent_backspace: true,
            prevent_slash: true,
            prevent_browser_shortcuts: true,
            prevent_context_menu: true,
            prevent_mouse_navigation: false,
            log_max_entries: 0,
            top_keys: 15,
            log_key_events: true,
        }
    }
}

/// Parse configuration entries from an expression starting with defcfg.
pub fn parse_defcfg(expr: &[SExpr]) -> Result<CfgOptions> {
    let mut seen_keys = HashSet::default();
    let mut cfg = CfgOptions::default();
    let mut exprs = check_first_expr(expr.iter(), "defcfg")?;
    // Read k-v pairs from the configuration
    loop {
        let key = match exprs.next() {
            Some(k) => k,
            None => return Ok(cfg),
        };
        let val = match exprs.next() {
            Some(v) => v,
            None => bail_expr!(key, "Found a defcfg option missing a value"),
        };
        match (&key, &val) {
            (SExpr::Atom(k), SExpr::Atom(_)) => {
                if !seen_keys.insert(&k.t) {
                    bail_expr!(key, "Duplicate defcfg option {}", k.t);
                }
                match k.t.as_str() {
                    k @ "flash-duration-ms" => {
                        cfg.flash_duration_ms = parse_cfg_val_u16(val, k, true)?;
                    }
                    k @ "mouse-flash-duration-ms" => {
                        cfg.mouse_flash_duration_ms = parse_cfg_val_u16(val, k, true)?;
                    }
                    k @ "log-max-entries" => {
                        cfg.log_max_entries = parse_cfg_val_u16(val, k, false)?;
                    }
                    k @ "top-keys" => {
                        cfg.top_keys = parse_cfg_val_u16(val, k, true)?;
                    }
                    "prevent-tab" => cfg.prevent_tab = parse_defcfg_val_bool(val, &k.t)?,
                    "prevent-enter" => cfg.prevent_enter = parse_defcfg_val_bool(val, &k.t)?,
                    "prevent-backspace" => {
                        cfg.prevent_backspace = parse_defcfg_val_bool(val, &k.t)?
                    }
                    "prevent-slash" => cfg.prevent_slash = parse_defcfg_val_bool(val, &k.t)?,
                    "prevent-browser-shortcuts" => {
                        cfg.prevent_browser_shortcuts = parse_defcfg_val_bool(val, &k.t)?
                    }
                    "prevent-context-menu" => {
                        cfg.prevent_context_menu = parse_defcfg_val_bool(val, &k.t)?
                    }
                    "prevent-mouse-navigation" => {
                        cfg.prevent_mouse_navigation = parse_defcfg_val_bool(val, &k.t)?
                    }
                    "log-key-events" => {
                        cfg.log_key_events = parse_defcfg_val_bool(val, &k.t)?;
                        if !cfg.log_key_events {
                            log::info!("key events will not be logged");
                        }
                    }
                    _ => bail_expr!(key, "Unknown defcfg option {}", &k.t),
                };
            }
            (SExpr::List(_), _) => {
                bail_expr!(key, "Lists are not allowed in defcfg");
            }
            (_, SExpr::List(_)) => {
                bail_expr!(val, "Lists are not allowed in defcfg");
            }
        }
    }
}

pub const FALSE_VALUES: [&str; 3] = ["no", "false", "0"];
pub const TRUE_VALUES: [&str; 3] = ["yes", "true", "1"];
pub const BOOLEAN_VALUES: [&str; 6] = ["yes", "true", "1", "no", "false", "0"];

fn parse_defcfg_val_bool(expr: &SExpr, label: &str) -> Result<bool> {
    match &expr {
        SExpr::Atom(v) => {
            let val = v.t.trim_matches('"').to_ascii_lowercase();
            if TRUE_VALUES.contains(&val.as_str()) {
                Ok(true)
            } else if FALSE_VALUES.contains(&val.as_str()) {
                Ok(false)
            } else {
                bail_expr!(
                    expr,
                    "The value for {label} must be one of: {}",
                    BOOLEAN_VALUES.join(", ")
                );
            }
        }
        SExpr::List(_) => {
            bail_expr!(
                expr,
                "The value for {label} cannot be a list, it must be one of: {}",
                BOOLEAN_VALUES.join(", "),
            )
        }
    }
}

fn parse_cfg_val_u16(expr: &SExpr, label: &str, exclude_zero: bool) -> Result<u16> {
    let start = if exclude_zero { 1 } else { 0 };
    match &expr {
        SExpr::Atom(v) => Ok(str::parse::<u16>(v.t.trim_matches('"'))
            .ok()
            .filter(|u| !(exclude_zero && *u == 0))
            .ok_or_else(|| anyhow_expr!(expr, "{label} must be {start}-65535"))?),
        SExpr::List(_) => {
            bail_expr!(
                expr,
                "The value for {label} cannot be a list, it must be a number {start}-65535",
            )
        }
    }
}
