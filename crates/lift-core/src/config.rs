//! Run configuration.
//!
//! A `Config` is normally loaded from TOML:
//!
//! ```toml
//! [sim]
//! tick_secs = 0.0333
//! total_ticks = 18000
//! seed = 42
//!
//! [building]
//! floor_count = 8
//!
//! [doors]
//! speed = 2.0
//!
//! [[cars]]
//! per_floor_secs = 1.0
//!
//! [[cars]]
//! per_floor_secs = 1.5
//! ```
//!
//! Every field has a default, so any section (or the whole file) may be
//! omitted.  Car IDs are assigned from the order of the `[[cars]]` entries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LiftError, LiftResult, SimClock, Tick, UniformFloors};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Clock and run-length settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated seconds per tick.
    pub tick_secs: f32,
    /// Number of ticks `Sim::run` executes.
    pub total_ticks: u64,
    /// Seed for the demo traffic generator.
    pub seed: u64,
    /// How often (in ticks) car snapshots are emitted.  0 disables them.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:             1.0 / 30.0,
            total_ticks:           18_000,
            seed:                  42,
            output_interval_ticks: 30,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }
}

// ── BuildingConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub floor_count: usize,
    /// Height of one storey in world units.
    pub storey_height: f32,
    /// World height of the ground floor.
    pub ground_height: f32,
    /// Maximum number of passengers waiting in one hall.
    pub floor_capacity: usize,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floor_count:    8,
            storey_height:  3.0,
            ground_height:  0.0,
            floor_capacity: 6,
        }
    }
}

impl BuildingConfig {
    /// The uniform-storey layout these settings describe.
    pub fn layout(&self) -> UniformFloors {
        UniformFloors::new(self.floor_count, self.storey_height, self.ground_height)
    }
}

// ── DoorConfig ────────────────────────────────────────────────────────────────

/// Leaf geometry and motion, shared by car doors and floor entrances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Interpolation rate per second.
    pub speed: f32,
    /// Width of one leaf in world units.
    pub leaf_width: f32,
    /// Share of a leaf (percent) that stays visible when fully open.
    pub stick_out_percent: f32,
    /// Leaves snap to their goal within this share (percent) of travel.
    pub tolerance_percent: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            speed:             2.0,
            leaf_width:        0.8,
            stick_out_percent: 10.0,
            tolerance_percent: 2.0,
        }
    }
}

impl DoorConfig {
    /// Distance one leaf slides between closed and fully open.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.leaf_width * (1.0 - self.stick_out_percent / 100.0)
    }
}

// ── CarConfig ─────────────────────────────────────────────────────────────────

/// Timings and placement for one car.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Seconds to travel one floor.
    pub per_floor_secs: f32,
    /// Delay between arrival and the doors starting to open.
    pub secs_till_open: f32,
    /// Dwell between the doors opening and the task completing.
    pub secs_till_close: f32,
    /// Floor the car starts on.
    pub start_floor: i32,
    /// Maximum riders.
    pub capacity: usize,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            per_floor_secs:  1.0,
            secs_till_open:  1.0,
            secs_till_close: 1.0,
            start_floor:     0,
            capacity:        8,
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim:      SimConfig,
    pub building: BuildingConfig,
    pub doors:    DoorConfig,
    pub cars:     Vec<CarConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sim:      SimConfig::default(),
            building: BuildingConfig::default(),
            doors:    DoorConfig::default(),
            cars:     vec![CarConfig::default(), CarConfig::default()],
        }
    }
}

impl Config {
    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> LiftResult<()> {
        let bad = |msg: String| Err(LiftError::Config(msg));

        if !(self.sim.tick_secs > 0.0) {
            return bad(format!("sim.tick_secs must be positive, got {}", self.sim.tick_secs));
        }
        if self.building.floor_count < 2 {
            return bad(format!(
                "building.floor_count must be at least 2, got {}",
                self.building.floor_count
            ));
        }
        if !(self.building.storey_height > 0.0) {
            return bad("building.storey_height must be positive".into());
        }
        if !(self.doors.speed > 0.0) || !(self.doors.leaf_width > 0.0) {
            return bad("doors.speed and doors.leaf_width must be positive".into());
        }
        if !(0.0..100.0).contains(&self.doors.stick_out_percent) {
            return bad("doors.stick_out_percent must be in [0, 100)".into());
        }
        if !(self.doors.tolerance_percent > 0.0 && self.doors.tolerance_percent <= 100.0) {
            return bad("doors.tolerance_percent must be in (0, 100]".into());
        }
        if self.cars.is_empty() {
            return bad("at least one [[cars]] entry is required".into());
        }
        for (i, car) in self.cars.iter().enumerate() {
            if !(car.per_floor_secs > 0.0) {
                return bad(format!("cars[{i}].per_floor_secs must be positive"));
            }
            if car.secs_till_open < 0.0 || car.secs_till_close < 0.0 {
                return bad(format!("cars[{i}] door delays must not be negative"));
            }
            if car.capacity == 0 {
                return bad(format!("cars[{i}].capacity must be at least 1"));
            }
            if car.start_floor < 0 || car.start_floor as usize >= self.building.floor_count {
                return Err(LiftError::FloorOutOfRange(car.start_floor));
            }
        }
        Ok(())
    }
}

/// Parse a TOML document into a `Config`.
pub fn parse_config(text: &str) -> LiftResult<Config> {
    Ok(toml::from_str(text)?)
}

/// Read and parse a TOML config file.
pub fn load_config(path: &Path) -> LiftResult<Config> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}
