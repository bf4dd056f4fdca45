//! skirmish: two empires scouting and advancing across a generated galaxy.
//!
//! ```text
//! skirmish [--seed N] [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! `CONFIG.json` may set any of `seed`, `galaxy` and `sim`; missing fields
//! take their defaults, and `--seed` overrides the file.  Fleet snapshots and per-turn summaries are written as
//! CSV under `OUTPUT_DIR` (default `output/skirmish`), along with the opening
//! forecasts as `forecasts.json`.  Set `RUST_LOG=debug` for per-fleet detail.

mod scenario;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use fm_core::SimConfig;
use fm_galaxy::{DijkstraRouter, GalaxyParams, generate_galaxy};
use fm_output::{CsvWriter, SimOutputObserver};
use fm_sim::{SimBuilder, SimObserver};

use scenario::{BLUE, RED};

// ── Configuration ─────────────────────────────────────────────────────────────

const DEFAULT_OUTPUT: &str = "output/skirmish";

#[derive(Parser, Debug)]
#[command(version, about = "Two empires scouting and advancing across a generated galaxy")]
struct Args {
    /// JSON config with any of `seed`, `galaxy` and `sim`.
    config: Option<PathBuf>,

    /// Directory for CSV snapshots, turn summaries and forecasts.
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Galaxy seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    seed:   u64,
    galaxy: GalaxyParams,
    sim:    SimConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed:   42,
            galaxy: GalaxyParams::default(),
            sim:    SimConfig { total_turns: 60, output_interval_turns: 5, ..SimConfig::default() },
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let config = match path {
        Some(p) => {
            let file = File::open(p).with_context(|| format!("opening {}", p.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", p.display()))?
        }
        None => DemoConfig::default(),
    };
    config.sim.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let output_dir = args.output;
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    println!("=== skirmish: fleet movement demo ===");
    println!(
        "Seed: {}  |  Turns: {}  |  Snapshot every {} turns",
        config.seed, config.sim.total_turns, config.sim.output_interval_turns
    );
    println!();

    // 1. Galaxy.
    let graph = generate_galaxy(&config.galaxy, config.seed);
    if graph.system_count() < 2 {
        bail!("galaxy has {} systems; need at least 2", graph.system_count());
    }
    println!("Galaxy: {} systems, {} lanes", graph.system_count(), graph.lane_count());

    // 2. Empires and fleets.
    let setup = scenario::setup(&graph, &config.sim.rules)?;
    for &(empire, home) in &setup.homes {
        println!("  {empire} home: {} ({home})", graph.name(home).unwrap_or("?"));
    }
    println!("Fleets: {}", setup.fleets.fleet_count());

    // 3. Sim.
    let homes = setup.homes;
    let mut sim = SimBuilder::new(config.sim.clone(), graph, DijkstraRouter)
        .knowledge(setup.knowledge)
        .fleets(setup.fleets)
        .build()?;

    // 4. Opening orders and their forecasts.
    let orders = scenario::give_orders(&mut sim, &homes)?;
    println!("Opening orders: {orders}");
    println!();

    let forecasts = sim.forecast_all()?;
    println!("{:<6} {:<16} {:>6} {:>14} {:>14}", "Fleet", "Name", "Jumps", "ETA", "Next stop");
    println!("{}", "-".repeat(60));
    for f in forecasts.iter().filter(|f| !f.route.is_empty()) {
        let name = &sim.fleets.fleet(f.fleet)?.name;
        println!(
            "{:<6} {:<16} {:>6} {:>14} {:>14}",
            f.fleet.0,
            name,
            f.route.len().saturating_sub(1),
            f.eta.to_string(),
            f.next_eta.to_string(),
        );
    }
    println!();

    fs::create_dir_all(&output_dir).with_context(|| format!("creating {}", output_dir.display()))?;
    let forecast_path = output_dir.join("forecasts.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&forecast_path)?), &forecasts)?;

    // 5. Run, re-issuing orders to idle fleets every turn.
    let mut observer = SimOutputObserver::new(CsvWriter::new(&output_dir)?);
    let started = Instant::now();
    let mut arrivals = 0;
    let mut explored = 0;
    while sim.clock.current.0 < config.sim.total_turns {
        scenario::give_orders(&mut sim, &homes)?;
        let summary = sim.run_turn(&mut observer)?;
        arrivals += summary.arrived;
        explored += summary.explored;
    }
    observer.on_sim_end(sim.clock.current);
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing output");
    }

    println!(
        "Ran {} turns in {:.2?}: {arrivals} arrivals, {explored} systems explored",
        sim.clock.current.0,
        started.elapsed()
    );
    println!();

    // 6. Final standings.
    println!("{:<6} {:<16} {:<8} {:>8} {:>10} {:>6}", "Fleet", "Name", "Owner", "System", "Dest", "Fuel");
    println!("{}", "-".repeat(60));
    for fleet in sim.fleets.fleets() {
        let owner = match fleet.primary_owner() {
            Some(RED) => "red",
            Some(BLUE) => "blue",
            _ => "-",
        };
        let system = fleet.system.map_or_else(|| "transit".to_owned(), |s| s.0.to_string());
        let dest = fleet.destination.map_or_else(|| "-".to_owned(), |s| s.0.to_string());
        println!(
            "{:<6} {:<16} {:<8} {:>8} {:>10} {:>6.1}",
            fleet.id.0,
            fleet.name,
            owner,
            system,
            dest,
            sim.fleets.fuel(fleet.id)?,
        );
    }
    println!();
    for &(empire, _) in &homes {
        let known = sim.knowledge.empire(empire).map_or(0, |k| k.explored.len());
        println!("{empire}: {known} systems explored");
    }
    println!("Output written to {}", output_dir.display());

    Ok(())
}
