use orbsim::{ScenarioConfig, Scenario};
use orbsim::run_2d;
use orbsim::bench_step;

use clap::Parser;
use anyhow::{Context, Result};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Run this many ticks without a window, then log a summary
    #[arg(long)]
    headless: Option<u64>,

    /// Time the physics step for growing body counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn run_headless(mut scenario: Scenario, ticks: u64) -> Result<()> {
    let mut merges = 0;
    for _ in 0..ticks {
        merges += scenario.step()?.merges.len();
    }
    info!("{} merges over {} ticks", merges, ticks);
    info!("{}", scenario.snapshot());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        return bench_step();
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    match args.headless {
        Some(ticks) => run_headless(scenario, ticks)?,
        None => run_2d(scenario),
    }

    Ok(())
}
