//! jackson — driver for the qn queueing-network simulator.
//!
//! With no config path, runs the four canonical networks (Jackson series,
//! finite capacity, complex routing, multi-server).  With a JSON config,
//! runs that network instead.  Each run prints its metrics table and writes
//! `completed_agents.csv`, `rejections.csv` and `station_metrics.csv` under
//! `<output>/<network>/`.

mod networks;
mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;

use qn_config::{NetworkConfig, load_config_json};
use qn_output::{CsvWriter, OutputObserver};
use qn_sim::{SimBuilder, run_replications};
use qn_stats::NetworkMetrics;

/// Simulates open queueing networks and reports their performance metrics.
#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// JSON network configuration; the canonical networks run when omitted.
    config: Option<PathBuf>,

    /// Directory the CSV files are written to.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Simulation horizon for the canonical networks.
    #[arg(long, default_value_t = 100.0)]
    horizon: f64,

    /// Root seed; overrides the seed in a config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Also run this many independent replications and print their spread.
    #[arg(short, long, default_value_t = 0)]
    replications: u64,

    /// Verbosity (-v info, -vv debug, -vvv trace).  `QN_LOG` is used when absent.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        0 => std::env::var("QN_LOG")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn run_one(name: &str, config: &NetworkConfig, opt: &Opt) -> Result<()> {
    let dir = opt.output.join(name);
    let writer = CsvWriter::new(&dir, config.horizon)?;
    let mut obs = OutputObserver::new(writer, config, name);

    let t0 = Instant::now();
    let mut sim = SimBuilder::new(config.clone()).build()?;
    sim.run(&mut obs)?;
    info!("{name}: simulated in {:.3} s", t0.elapsed().as_secs_f64());

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    match obs.metrics() {
        Some(metrics) => report::print_metrics(name, config, metrics),
        None => report::print_metrics(name, config, &NetworkMetrics::compute(sim.log())),
    }
    println!("CSV written to {}", dir.display());
    println!();

    if opt.replications > 0 {
        let runs: Vec<NetworkMetrics> = run_replications(config, opt.replications)?
            .iter()
            .map(NetworkMetrics::compute)
            .collect();
        report::print_replications(name, &runs);
    }
    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    set_up_logger(&opt)?;

    match &opt.config {
        Some(path) => {
            let mut config = load_config_json(path)?;
            if let Some(seed) = opt.seed {
                config = config.with_seed(seed);
            }
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("network")
                .to_owned();
            println!("{config}");
            run_one(&name, &config, &opt)?;
        }
        None => {
            for (name, config) in networks::all(opt.horizon, opt.seed.unwrap_or(42))? {
                run_one(name, &config, &opt)?;
            }
        }
    }
    Ok(())
}
