//! Parses the input-analyzer configuration language.
//!
//! A configuration is a sequence of top-level lists:
//!
//! ```text
//! (defcfg
//!   flash-duration-ms 150
//!   prevent-enter     yes)
//!
//! ;; codes whose default browser action is always suppressed outside editable targets
//! (defprevent Escape PageUp PageDown)
//!
//! ;; codes that are never suppressed, even if another rule matches
//! (defallow F5 F12)
//! ```
//!
//! Every item is optional and each may appear at most once. Codes may be written as browser codes
//! (`KeyA`, `F5`) or as their short names (`a`, `f5`, `spc`).

pub mod sexpr;

mod defcfg;
pub use defcfg::*;

mod error;
pub use error::*;

use crate::keys::str_to_code;
use anyhow::anyhow;
use sexpr::*;
use std::path::Path;

type HashSet<T> = rustc_hash::FxHashSet<T>;


#[macro_export]
macro_rules! bail {
    ($err:expr $(,)?) => {
        return Err($crate::cfg::CfgError::from(anyhow::anyhow!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::cfg::CfgError::from(anyhow::anyhow!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! bail_expr {
    ($expr:expr, $fmt:expr $(,)?) => {
        return Err($crate::cfg::CfgError::from_expr($expr, format!($fmt)))
    };
    ($expr:expr, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::cfg::CfgError::from_expr($expr, format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! bail_span {
    ($expr:expr, $fmt:expr $(,)?) => {
        return Err($crate::cfg::CfgError::from_spanned($expr, format!($fmt)))
    };
    ($expr:expr, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::cfg::CfgError::from_spanned($expr, format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! anyhow_expr {
    ($expr:expr, $fmt:expr $(,)?) => {
        $crate::cfg::CfgError::from_expr($expr, format!($fmt))
    };
    ($expr:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::cfg::CfgError::from_expr($expr, format!($fmt, $($arg)*))
    };
}

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cfg {
    pub options: CfgOptions,
    /// Codes from `defprevent`, canonicalized.
    pub prevent_codes: Vec<&'static str>,
    /// Codes from `defallow`, canonicalized.
    pub allow_codes: Vec<&'static str>,
}

/// Parse a configuration file.
pub fn new_from_file(p: &Path) -> MResult<Cfg> {
    let text = std::fs::read_to_string(p).map_err(|e| {
        miette::miette!("Failed to read configuration file {}: {e}", p.display())
    })?;
    parse_cfg(&text, &p.to_string_lossy()).map_err(error_with_source)
}

/// Parse configuration text that does not come from a file.
pub fn new_from_str(cfg_text: &str) -> MResult<Cfg> {
    parse_cfg(cfg_text, "configuration").map_err(error_with_source)
}

pub fn parse_cfg(text: &str, file_name: &str) -> Result<Cfg> {
    let root_exprs = sexpr::parse(text, file_name)?;
    let mut cfg = Cfg::default();
    let mut seen = HashSet::default();
    for expr in root_exprs.iter() {
        let first = match expr.t.first() {
            Some(f) => f,
            None => bail_span!(expr, "Empty list found at the top level"),
        };
        let name = match first.atom() {
            Some(name) => name,
            None => bail_expr!(first, "Top-level lists must begin with a name"),
        };
        if !seen.insert(name) {
            bail_span!(expr, "Only one {name} is allowed");
        }
        match name {
            "defcfg" => cfg.options = parse_defcfg(&expr.t)?,
            "defprevent" => cfg.prevent_codes = parse_code_list(&expr.t, "defprevent")?,
            "defallow" => cfg.allow_codes = parse_code_list(&expr.t, "defallow")?,
            _ => bail_expr!(first, "Unknown top-level item {name}"),
        }
    }
    log::info!("configuration {file_name} parsed: {:?}", cfg.options);
    Ok(cfg)
}

fn check_first_expr<'a>(
    mut exprs: impl Iterator<Item = &'a SExpr>,
    expected_first: &str,
) -> Result<impl Iterator<Item = &'a SExpr>> {
    let first_atom = exprs
        .next()
        .ok_or_else(|| anyhow!("Passed empty list to {expected_first}"))?
        .atom()
        .ok_or_else(|| anyhow!("First entry is expected to be an atom for {expected_first}"))?;
    if first_atom != expected_first {
        bail!("Passed non-{expected_first} expression to {expected_first}: {first_atom}");
    }
    Ok(exprs)
}

/// Parse the codes of a `defprevent` or `defallow` list.
fn parse_code_list(expr: &[SExpr], list_name: &str) -> Result<Vec<&'static str>> {
    let mut codes = vec![];
    let mut seen = HashSet::default();
    for code_expr in check_first_expr(expr.iter(), list_name)? {
        let s = match code_expr.atom() {
            Some(s) => s.trim_matches('"'),
            None => bail_expr!(code_expr, "Lists are not allowed in {list_name}"),
        };
        let code = match str_to_code(s) {
            Some(code) => code,
            None => bail_expr!(code_expr, "Unknown key code in {list_name}: {s}"),
        };
        if !seen.insert(code) {
            bail_expr!(code_expr, "Duplicate key in {list_name}: {code}");
        }
        codes.push(code);
    }
    Ok(codes)
}
