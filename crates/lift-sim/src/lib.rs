//! `lift-sim`: tick loop orchestrator for the rust_lift elevator simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.sim.total_ticks:
//!   ① Entrances: every floor entrance advances its leaves.
//!   ② Cars     : in ascending CarId:
//!                   doors move; on fully open, riders for this floor leave
//!                   head task started, or doorway clear → process head
//!                   queue empty, doors open, doorway clear → close up
//!   ③ Snapshot : every output_interval_ticks, the observer sees the fleet.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`car`]        | `Car`, `CarStep`                                        |
//! | [`floor`]      | `Floor`: hall, call lamp, entrances                    |
//! | [`building`]   | `Building`, `CarLandings`                               |
//! | [`registry`]   | `ElevatorRegistry`                                      |
//! | [`sim`]        | `Sim`                                                   |
//! | [`builder`]    | `SimBuilder`                                            |
//! | [`observer`]   | `SimObserver`, `NoopObserver`, `TickStats`, `DoorSource`|
//! | [`error`]      | `SimError`, `SimResult`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{CarId, Config};
//! use lift_door::SettledProbe;
//! use lift_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(Config::default()).build()?;
//! sim.call_elevator(CarId(0), 5);
//! sim.run(&SettledProbe, &mut NoopObserver);
//! ```

pub mod builder;
pub mod building;
pub mod car;
pub mod error;
pub mod floor;
pub mod observer;
pub mod registry;
pub mod sim;


pub use builder::SimBuilder;
pub use building::{Building, CarLandings};
pub use car::{Car, CarStep};
pub use error::{SimError, SimResult};
pub use floor::Floor;
pub use observer::{DoorSource, NoopObserver, SimObserver, TickStats};
pub use registry::ElevatorRegistry;
pub use sim::Sim;
