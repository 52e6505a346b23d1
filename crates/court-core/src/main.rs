//! Court Intrigue Simulation
//!
//! Seeds a court for each configured territory and runs the tick schedule,
//! writing the event log and periodic snapshots.

use bevy_ecs::prelude::*;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use court_core::config::{CourtConfig, DEFAULT_CONFIG_PATH};
use court_core::events::EventLog;
use court_core::output::{self, SnapshotGenerator};
use court_core::systems::{build_tick_schedule, SimulationClock, TickEvents};
use court_core::{Court, SimRng};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "court_sim")]
#[command(about = "Simulates scheming royal courts")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (overrides the config)
    #[arg(long)]
    ticks: Option<u64>,

    /// Interval between snapshots in ticks (overrides the config)
    #[arg(long)]
    snapshot_interval: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = CourtConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.simulation.ticks = ticks;
    }
    if let Some(interval) = args.snapshot_interval {
        config.simulation.snapshot_interval = interval;
    }

    println!("Court Intrigue Simulation");
    println!("=========================");
    println!("Seed: {}", config.simulation.seed);
    println!("Ticks: {}", config.simulation.ticks);
    println!("Snapshot interval: {}", config.simulation.snapshot_interval);
    println!();

    // Ensure output directories exist
    let snapshot_dir = config.output.snapshot_dir.clone();
    if let Err(e) = fs::create_dir_all(&snapshot_dir) {
        tracing::warn!("Could not create {}: {}", snapshot_dir.display(), e);
    }
    if let Some(parent) = config.output.events_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!("Could not create {}: {}", parent.display(), e);
        }
    }

    let log = EventLog::new(&config.output.events_path).unwrap_or_else(|e| {
        tracing::warn!(
            "Could not open event log {}: {}. Events will not be written.",
            config.output.events_path.display(),
            e
        );
        EventLog::null()
    });

    // Seed the courts
    let mut rng = SimRng::seeded(config.simulation.seed);
    let mut court = Court::new().with_event_log(log);
    for territory in config.starting_territories() {
        let summary = court.seed_court(&mut rng, territory, 0);
        println!("  Seeded {} with {} courtiers", summary.territory_id, summary.members.len());
    }

    let mut world = World::new();
    world.insert_resource(court);
    world.insert_resource(rng);
    world.insert_resource(SimulationClock::default());
    world.insert_resource(TickEvents::new());
    world.insert_resource(SnapshotGenerator::new(config.simulation.snapshot_interval));

    let mut schedule = build_tick_schedule();

    println!();
    println!("Starting simulation...");
    println!();

    for tick in 0..config.simulation.ticks {
        world.resource_mut::<SimulationClock>().current_tick = tick;
        schedule.run(&mut world);

        {
            let tick_events = world.resource::<TickEvents>();
            for event in &tick_events.events {
                println!("[Tick {:>5}] {}", tick, event.description);
            }
        }
        world.resource_mut::<TickEvents>().clear();

        let should_snapshot = world.resource::<SnapshotGenerator>().should_snapshot(tick);
        if should_snapshot {
            take_snapshot(&mut world, tick, "periodic", &snapshot_dir);
        }
    }

    // Final snapshot
    let end_tick = config.simulation.ticks;
    take_snapshot(&mut world, end_tick, "simulation_end", &snapshot_dir);

    let snapshot_count = world.resource::<SnapshotGenerator>().snapshot_count();
    let mut court = world.resource_mut::<Court>();
    if let Err(e) = court.flush_events() {
        tracing::warn!("Could not flush event log: {}", e);
    }

    println!();
    println!(
        "Simulation complete. Ran {} ticks, logged {} events, {} successions.",
        config.simulation.ticks,
        court.event_log().event_count(),
        court.successions().len()
    );
    println!("Generated {} snapshots.", snapshot_count);
}

fn take_snapshot(world: &mut World, tick: u64, triggered_by: &str, dir: &Path) {
    let snapshot_id = world.resource_mut::<SnapshotGenerator>().next_id();
    let snapshot = output::generate_snapshot(world.resource::<Court>(), snapshot_id, tick, triggered_by);
    if let Err(e) = output::write_snapshot_to_dir(&snapshot, dir) {
        tracing::warn!("Could not write snapshot at tick {}: {}", tick, e);
    }
    if let Err(e) = output::write_current_state(&snapshot, dir) {
        tracing::warn!("Could not write current state at tick {}: {}", tick, e);
    }
    world.resource_mut::<SnapshotGenerator>().mark_snapshot(tick);
}
