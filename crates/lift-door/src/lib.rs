//! `lift-door`: door motion and departure gating.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`door`]    | `DoorMotionController`, `DoorState`, `DoorEvent`                |
//! | [`gate`]    | `BoardingGate`: riders aboard, riders leaving, exit batches    |
//! | [`probe`]   | `PassengerProbe` containment contract, `SettledProbe`           |
//!
//! # Door model
//!
//! A door is a pair of leaves sliding apart symmetrically.  Each tick the
//! leaves close a fraction `dt * speed` of the remaining gap to their goal,
//! three times faster over the last half of the stroke, and snap once they
//! are within `tolerance_percent` of the stroke.  Only then does the
//! controller report `Open` or `Closed`, so a car can never depart while its
//! leaves are still moving.
//!
//! The same controller drives the car's own doors and every floor entrance.

pub mod door;
pub mod gate;
pub mod probe;

#[cfg(test)]
mod tests;

pub use door::{DoorEvent, DoorMotionController, DoorState, HALFWAY_SPEED_MULTIPLIER};
pub use gate::BoardingGate;
pub use probe::{PassengerProbe, SettledProbe};
