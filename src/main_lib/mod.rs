pub(crate) mod args;

use anyhow::Result;
use input_analyzer::cfg::Cfg;
use input_analyzer::report::{render_key_log, render_summary};
use input_analyzer::sim::Simulation;
use std::path::Path;

/// Run one simulation file on a fresh analyzer and print the results.
pub(crate) fn run_sim_file(cfg: &Cfg, path: &Path, json: bool, show_log: bool) -> Result<()> {
    log::info!("Evaluating simulation file = {path:?}");
    let script = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let mut sim = Simulation::from_cfg(cfg);
    sim.run(&script)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;

    println!("{}", sim.transcript());
    let analyzer = sim.analyzer();
    if show_log {
        println!("\n{}", render_key_log(analyzer.key_log().iter()));
    }
    let snapshot = analyzer.snapshot();
    if json {
        println!("{}", snapshot.to_json()?);
    } else {
        println!("\n{}", render_summary(&snapshot));
    }
    Ok(())
}
