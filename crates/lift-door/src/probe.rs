//! Passenger containment contract.

use lift_core::{CarId, PassengerId};

/// Answers where passengers physically are.
///
/// Passenger walking and animation live outside the simulator.  The gate
/// only needs to know whether a passenger has crossed the car threshold yet,
/// and whether it has left the world altogether.
pub trait PassengerProbe {
    /// Is `passenger` standing inside `car`?
    fn is_inside(&self, car: CarId, passenger: PassengerId) -> bool;

    /// Has `passenger` been removed from the world?
    fn is_gone(&self, _passenger: PassengerId) -> bool {
        false
    }
}

/// A probe for which every walk has already finished: assigned riders are
/// aboard and departing riders are gone.  Useful when passengers move
/// instantly, and in tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct SettledProbe;

impl PassengerProbe for SettledProbe {
    fn is_inside(&self, _car: CarId, _passenger: PassengerId) -> bool {
        true
    }

    fn is_gone(&self, _passenger: PassengerId) -> bool {
        true
    }
}
