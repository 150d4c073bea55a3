//! The floors of the building and the per-car view a task drives.

use lift_core::{CarId, DoorConfig, FloorLayout};
use lift_dispatch::Landings;
use lift_door::{DoorEvent, DoorMotionController};

use crate::Floor;

/// A floor layout plus the live state of every floor.
pub struct Building<L: FloorLayout> {
    layout: L,
    floors: Vec<Floor>,
}

impl<L: FloorLayout> Building<L> {
    /// One floor per storey of `layout`, each with an entrance for every car.
    pub fn new(layout: L, floor_capacity: usize, doors: &DoorConfig, cars: &[CarId]) -> Self {
        let floors = (0..layout.floor_count())
            .map(|n| Floor::new(n as i32, floor_capacity, doors, cars))
            .collect();
        Self { layout, floors }
    }

    #[inline]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, number: i32) -> Option<&Floor> {
        usize::try_from(number).ok().and_then(|i| self.floors.get(i))
    }

    pub fn floor_mut(&mut self, number: i32) -> Option<&mut Floor> {
        usize::try_from(number).ok().and_then(|i| self.floors.get_mut(i))
    }

    /// Advance every entrance door.  Returns `(floor, car, event)` for each
    /// stroke that completed, floors ascending then cars ascending.
    pub fn tick_entrances(&mut self, dt: f32) -> Vec<(i32, CarId, DoorEvent)> {
        let mut events = Vec::new();
        for floor in &mut self.floors {
            let number = floor.number();
            for (car, door) in floor.entrances_mut() {
                if let Some(ev) = door.tick(dt) {
                    events.push((number, car, ev));
                }
            }
        }
        events
    }

    /// Split into `car`'s landings and the layout, for one car step.
    pub fn landings_for(&mut self, car: CarId) -> (CarLandings<'_>, &L) {
        (CarLandings { floors: &mut self.floors, car }, &self.layout)
    }
}

/// One shaft's entrances, one per floor.
pub struct CarLandings<'a> {
    floors: &'a mut [Floor],
    car:    CarId,
}

impl CarLandings<'_> {
    fn floor(&self, floor: i32) -> Option<&Floor> {
        usize::try_from(floor).ok().and_then(|i| self.floors.get(i))
    }

    fn floor_mut(&mut self, floor: i32) -> Option<&mut Floor> {
        usize::try_from(floor).ok().and_then(|i| self.floors.get_mut(i))
    }
}

impl Landings for CarLandings<'_> {
    fn entrance(&self, floor: i32) -> Option<&DoorMotionController> {
        self.floor(floor)?.entrance(self.car)
    }

    fn entrance_mut(&mut self, floor: i32) -> Option<&mut DoorMotionController> {
        let car = self.car;
        self.floor_mut(floor)?.entrance_mut(car)
    }

    fn answer_call(&mut self, floor: i32) {
        if let Some(f) = self.floor_mut(floor) {
            f.clear_call();
        }
    }
}
