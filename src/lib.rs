use anyhow::{Result, anyhow, bail};
use std::path::{Path, PathBuf};

pub mod analyzer;
pub mod input;
pub mod report;
pub mod sim;

pub use analyzer::Analyzer;
pub use input::*;
pub use input_analyzer_parser::cfg;
use input_analyzer_parser::cfg::Cfg;


type CfgPath = PathBuf;

pub struct ValidatedArgs {
    pub paths: Vec<CfgPath>,
    pub sims: Vec<PathBuf>,
    pub json: bool,
    pub show_log: bool,
}

pub fn default_cfg() -> Vec<PathBuf> {
    let mut cfgs = Vec::new();

    let default = PathBuf::from("input-analyzer.cfg");
    if default.is_file() {
        cfgs.push(default);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let fallback = config_dir
            .join("input-analyzer")
            .join("input-analyzer.cfg");
        if fallback.is_file() {
            cfgs.push(fallback);
        }
    }

    cfgs
}

pub fn default_sim() -> Vec<PathBuf> {
    let default = PathBuf::from("input-analyzer.sim");
    if default.is_file() {
        vec![default]
    } else {
        vec![]
    }
}

/// Parse the configuration at `path`, rendering diagnostics into the error.
pub fn load_cfg(path: &Path) -> Result<Cfg> {
    cfg::new_from_file(path).map_err(|e| anyhow!("{e:?}"))
}

/// Load the first configuration, or the built-in defaults when there is none.
pub fn load_first_cfg(paths: &[CfgPath]) -> Result<Cfg> {
    match paths.first() {
        Some(p) => {
            if !p.is_file() {
                bail!(
                    "Could not find the config file ({})\nFor more info, pass the `-h` or `--help` flags.",
                    p.to_str().unwrap_or("?")
                )
            }
            log::info!("using configuration {}", p.display());
            load_cfg(p)
        }
        None => {
            log::info!("no configuration file found, using defaults");
            Ok(Cfg::default())
        }
    }
}
