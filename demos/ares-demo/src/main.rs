//! ares-demo: runs the three built-in models side by side.
//!
//! ```text
//! ares-demo [engine-config.json]
//! ```
//!
//! Every simulation is driven by the engine's ticker.  The fire-spread run
//! is recorded to `output/ares-demo/` as CSV; the other two are sampled
//! from their subscriptions.  Set `RUST_LOG=ares_sim=debug` for step logs.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ares_core::SimulationId;
use ares_model::catalogue::{
    self, NUMBER_OF_FIRES, NUMBER_OF_PREDATORS, NUMBER_OF_PREYS, NUMBER_OF_TREES,
    NUMBER_OF_TYPE_A, NUMBER_OF_TYPE_B, SIZE,
};
use ares_output::{CsvSnapshotWriter, SnapshotWriter, drain_subscription};
use ares_sim::{Ares, EngineConfig, Subscription};

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_SIZE:     i64   = 30;
const RECORD_FRAMES: usize = 40;
const OUTPUT_DIR:    &str  = "output/ares-demo";
const SAMPLE_WAIT:   Duration = Duration::from_secs(2);

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        None => Ok(EngineConfig { seed: 42, ..EngineConfig::default() }),
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading engine config {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing engine config {path}"))
        }
    }
}

/// Configure and start one simulation of `model`.
fn launch(ares: &Ares, model: &str, values: &[(&str, i64)]) -> Result<SimulationId> {
    let cfg = ares.select_model(model)?;
    ares.set_model_parameter(cfg, SIZE, GRID_SIZE)?;
    for (key, value) in values {
        ares.set_model_parameter(cfg, key, *value)?;
    }
    let id = ares.start_simulation(cfg)?;
    ares.discard_config(cfg)?;
    info!(sim = %id, model, "launched");
    Ok(id)
}

fn report(name: &str, sub: &Subscription) {
    let latest = sub.try_iter().last().or_else(|| sub.recv_timeout(SAMPLE_WAIT).ok());
    match latest {
        Some(frame) => {
            let mut counts: Vec<(String, usize)> = Vec::new();
            for cell in &frame.snapshot.cells {
                match counts.iter_mut().find(|(t, _)| *t == cell.agent_type) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((cell.agent_type.clone(), 1)),
                }
            }
            let summary: Vec<String> = counts.iter().map(|(t, n)| format!("{t}={n}")).collect();
            println!(
                "{:<14} tick {:>4}  finished {:<5}  {}",
                name,
                frame.tick.0,
                frame.finished,
                summary.join(" ")
            );
        }
        None => println!("{name:<14} no output"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let config = load_config()?;
    println!("=== ares-demo ===");
    println!(
        "Tick interval: {} ms  |  Seed: {}  |  Grid: {GRID_SIZE}×{GRID_SIZE}",
        config.tick_interval_ms, config.seed
    );

    let ares = Ares::new(config)?;
    println!("Models: {}", ares.list_models().join(", "));
    println!();

    let hunt = launch(&ares, catalogue::PREDATOR_PREY, &[
        (NUMBER_OF_PREDATORS, 40),
        (NUMBER_OF_PREYS, 200),
    ])?;
    let segregation = launch(&ares, catalogue::SCHELLING, &[
        (NUMBER_OF_TYPE_A, 350),
        (NUMBER_OF_TYPE_B, 350),
    ])?;
    let fire = launch(&ares, catalogue::FIRE_SPREAD, &[
        (NUMBER_OF_FIRES, 5),
        (NUMBER_OF_TREES, 600),
    ])?;

    let hunt_sub = ares.subscribe(hunt)?;
    let segregation_sub = ares.subscribe(segregation)?;
    let fire_sub = ares.subscribe(fire)?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvSnapshotWriter::new(Path::new(OUTPUT_DIR))?;

    let t0 = Instant::now();
    ares.start_ticker()?;
    let frames = drain_subscription(&fire_sub, &mut writer, Some(RECORD_FRAMES))?;
    ares.stop_ticker();
    writer.finish()?;
    let elapsed = t0.elapsed();

    println!("Recorded {frames} fire-spread frames in {:.3} s", elapsed.as_secs_f64());
    println!("  {OUTPUT_DIR}/cell_snapshots.csv");
    println!("  {OUTPUT_DIR}/tick_summaries.csv");
    println!();

    report("Predator-Prey", &hunt_sub);
    report("Schelling", &segregation_sub);
    report("Fire Spread", &fire_sub);

    ares.shutdown();
    Ok(())
}
