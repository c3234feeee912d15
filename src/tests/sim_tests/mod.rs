use crate::sim::Simulation;
use crate::tests::*;
use crate::Analyzer;

mod key_state_sim_tests;
mod mouse_sim_tests;
mod normalize_sim_tests;
mod prevent_sim_tests;
mod stats_sim_tests;
mod timing_tests;

fn run(cfg: &str, sim: &str) -> Simulation {
    init_log();
    let _lk = match CFG_PARSE_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let a = Analyzer::new_from_str(cfg).expect("failed to parse cfg");
    let mut s = Simulation::new(a);
    s.run(sim).expect("simulation runs");
    s
}

fn simulate(cfg: &str, sim: &str) -> String {
    run(cfg, sim).transcript()
}
