//! Fleet directory.

use std::collections::BTreeMap;

use lift_core::CarId;
use lift_dispatch::Direction;

use crate::{Car, SimError, SimResult};

/// Every car in the building, keyed and iterated by ascending `CarId`.
///
/// Filled once by [`SimBuilder`][crate::SimBuilder]; membership does not
/// change while the simulation runs.
#[derive(Clone, Debug, Default)]
pub struct ElevatorRegistry {
    cars: BTreeMap<CarId, Car>,
}

impl ElevatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `car`.  Fails if its ID is already taken.
    pub fn register(&mut self, car: Car) -> SimResult<()> {
        let id = car.id();
        if self.cars.contains_key(&id) {
            return Err(SimError::DuplicateCar(id));
        }
        self.cars.insert(id, car);
        Ok(())
    }

    pub fn get(&self, id: CarId) -> Option<&Car> {
        self.cars.get(&id)
    }

    pub fn get_mut(&mut self, id: CarId) -> Option<&mut Car> {
        self.cars.get_mut(&id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut Car> {
        self.cars.values_mut()
    }

    pub fn ids(&self) -> Vec<CarId> {
        self.cars.keys().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Is a car standing at `floor` with its doors open or opening, ready to
    /// take a passenger travelling `direction`?
    pub fn has_elevator(&self, floor: i32, direction: Direction) -> bool {
        self.boarding_car(floor, direction).is_some()
    }

    /// The first car that [`has_elevator`][Self::has_elevator] would match.
    pub fn boarding_car(&self, floor: i32, direction: Direction) -> Option<CarId> {
        self.cars
            .values()
            .find(|car| {
                car.current_floor() == floor
                    && (car.doors().is_open() || car.doors().is_opening())
                    && car.direction().serves(direction)
            })
            .map(Car::id)
    }
}
