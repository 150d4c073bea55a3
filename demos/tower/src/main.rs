//! tower: random passenger traffic through a bank of elevators.
//!
//! Loads a TOML config (or the built-in defaults), spawns passengers in
//! random halls, and writes per-car snapshots and per-tick summaries as CSV.
//!
//! ```text
//! cargo run -p tower -- --config demos/tower/tower.toml --out output/tower -v
//! ```

mod crowd;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use lift_core::{CarId, Config, PassengerId, SimRng, Tick, load_config};
use lift_output::{CsvWriter, OutputWriter, SimOutputObserver};
use lift_sim::{DoorSource, ElevatorRegistry, SimBuilder, SimObserver, TickStats};
use lift_door::DoorEvent;

use crowd::Crowd;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Simulate random passenger traffic through a bank of elevators")]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override `[sim].total_ticks`.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override `[sim].seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the CSV output.
    #[arg(long, default_value = "output/tower")]
    out: PathBuf,

    /// Ticks between new passengers.
    #[arg(long, default_value_t = 90)]
    spawn_every: u64,

    /// Log queue changes and door phases.
    #[arg(short, long)]
    verbose: bool,
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards to the CSV observer, counts rows, and hands released riders back
/// to the crowd.
struct TowerObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    completed:     usize,
    released:      Vec<(CarId, Vec<PassengerId>)>,
}

impl<W: OutputWriter> TowerObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, completed: 0, released: Vec::new() }
    }
}

impl<W: OutputWriter> SimObserver for TowerObserver<W> {
    fn on_door_event(&mut self, tick: Tick, door: DoorSource, event: DoorEvent) {
        if let DoorSource::Car(car) = door {
            log::trace!("{tick} {car} doors {event:?}");
        }
    }

    fn on_task_completed(&mut self, _tick: Tick, _car: CarId, _floor: i32) {
        self.completed += 1;
    }

    fn on_passengers_released(&mut self, _tick: Tick, car: CarId, _floor: i32, riders: &[PassengerId]) {
        self.released.push((car, riders.to_vec()));
    }

    fn on_snapshot(&mut self, tick: Tick, registry: &ElevatorRegistry) {
        self.snapshot_rows += registry.len();
        self.inner.on_snapshot(tick, registry);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // 1. Config.
    let mut config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.sim.total_ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        config.sim.seed = seed;
    }

    println!("=== tower: rust_lift elevator bank ===");
    println!(
        "Cars: {}  |  Floors: {}  |  Ticks: {}  |  Seed: {}",
        config.cars.len(),
        config.building.floor_count,
        config.sim.total_ticks,
        config.sim.seed
    );
    println!();

    // 2. Build sim.
    let mut sim = SimBuilder::new(config.clone()).build()?;
    let mut rng = SimRng::new(config.sim.seed);
    let mut crowd = Crowd::new(
        rng.child(1),
        sim.registry.ids(),
        sim.building.floors().len(),
        cli.spawn_every,
    );

    // 3. Output.
    std::fs::create_dir_all(&cli.out)?;
    let writer = CsvWriter::new(&cli.out)?;
    let mut obs = TowerObserver::new(SimOutputObserver::new(writer, &config.sim));

    // 4. Run, feeding traffic in between ticks.
    let t0 = Instant::now();
    let end = config.sim.end_tick();
    info!("starting at {}", sim.clock);
    while sim.clock.current_tick < end {
        let now = sim.clock.current_tick;
        crowd.before_tick(&mut sim, now);
        sim.step(&crowd, &mut obs);
        for (car, riders) in std::mem::take(&mut obs.released) {
            crowd.alight(car, &riders, now);
        }
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  car_snapshots.csv  : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!(
        "  passengers         : {} spawned, {} delivered, {} in the building",
        crowd.spawned,
        crowd.delivered,
        crowd.active()
    );
    println!("  stops served       : {}", obs.completed);
    println!();

    println!("{:<8} {:<6} {:<10} {:<8} {:<6} {:<6}", "Car", "Floor", "Heading", "Doors", "Queue", "Riders");
    println!("{}", "-".repeat(48));
    for car in sim.registry.all() {
        println!(
            "{:<8} {:<6} {:<10} {:<8} {:<6} {:<6}",
            car.id().0,
            car.current_floor(),
            car.direction().to_string(),
            car.doors().state().to_string(),
            car.scheduler().len(),
            car.gate().rider_count(),
        );
    }

    Ok(())
}
