use anyhow::{Result, bail};
use clap::Parser;
use input_analyzer::{ValidatedArgs, default_cfg, default_sim, load_cfg, load_first_cfg};
use simplelog::{format_description, *};

mod main_lib;

use main_lib::args::Args;

/// Parse CLI arguments and initialize logging.
fn cli_init() -> Result<ValidatedArgs> {
    let args = Args::parse();

    let explicit_cfg = args.cfg.is_some();
    let cfg_paths = args.cfg.unwrap_or_else(default_cfg);
    let sim_paths = args.sim.unwrap_or_else(default_sim);

    let log_lvl = match (args.quiet, args.debug, args.trace) {
        (true, _, _) => LevelFilter::Error,
        (_, _, true) => LevelFilter::Trace,
        (_, true, false) => LevelFilter::Debug,
        (false, false, false) => LevelFilter::Info,
    };

    let mut log_cfg = ConfigBuilder::new();
    if let Err(e) = log_cfg.set_time_offset_to_local() {
        eprintln!("WARNING: could not set log TZ to local: {e:?}");
    };
    log_cfg.set_time_format_custom(format_description!(
        version = 2,
        "[hour]:[minute]:[second].[subsecond digits:4]"
    ));
    CombinedLogger::init(vec![TermLogger::new(
        log_lvl,
        log_cfg.build(),
        TerminalMode::Stderr,
        ColorChoice::AlwaysAnsi,
    )])
    .expect("logger can init");
    log::info!("input-analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    if explicit_cfg {
        if let Some(missing) = cfg_paths.iter().find(|p| !p.is_file()) {
            bail!(
                "Could not find the config file ({})\nFor more info, pass the `-h` or `--help` flags.",
                missing.to_str().unwrap_or("?")
            )
        }
    }

    if args.check {
        log::info!("validating config only and exiting");
        if cfg_paths.is_empty() {
            bail!("No config files provided\nFor more info, pass the `-h` or `--help` flags.");
        }
        let mut status = 0;
        for p in cfg_paths.iter() {
            match load_cfg(p) {
                Ok(_) => log::info!("{} is valid", p.display()),
                Err(e) => {
                    log::error!("{e}");
                    status = 1;
                }
            }
        }
        std::process::exit(status);
    }

    if let Some(sim_file) = sim_paths.first() {
        if !sim_file.exists() {
            bail!(
                "Could not find the simulation file ({})\nFor more info, pass the `-h` or `--help` flags.",
                sim_file.to_str().unwrap_or("?")
            )
        }
    } else {
        bail!("No simulation files provided\nFor more info, pass the `-h` or `--help` flags.");
    }

    Ok(ValidatedArgs {
        paths: cfg_paths,
        sims: sim_paths,
        json: args.json,
        show_log: args.log,
    })
}

fn main_impl() -> Result<()> {
    let args = cli_init()?;
    let cfg = load_first_cfg(&args.paths)?;
    for (i, sim_file) in args.sims.iter().enumerate() {
        if i > 0 {
            println!();
        }
        main_lib::run_sim_file(&cfg, sim_file, args.json, args.show_log)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let ret = main_impl();
    if let Err(ref e) = ret {
        log::error!("{e}\n");
    }
    ret
}
