//! `lift-core`: foundational types for the `rust_lift` elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `CarId`, `PassengerId`, `TaskId`                         |
//! | [`time`]        | `Tick`, `SimClock`                                       |
//! | [`building`]    | `FloorLayout` trait, `UniformFloors`                     |
//! | [`config`]      | `Config` and its TOML sections, `load_config`            |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                          |
//! | [`error`]       | `LiftError`, `LiftResult`                                |

pub mod building;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use building::{FloorLayout, UniformFloors};
pub use config::{BuildingConfig, CarConfig, Config, DoorConfig, SimConfig, load_config, parse_config};
pub use error::{LiftError, LiftResult};
pub use ids::{CarId, PassengerId, TaskId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
