//! One storey: its hall, its call lamp, and an entrance per shaft.

use std::collections::BTreeMap;

use lift_core::{CarId, DoorConfig, PassengerId};
use lift_door::DoorMotionController;

#[derive(Clone, Debug)]
pub struct Floor {
    number:    i32,
    call_lit:  bool,
    waiting:   Vec<PassengerId>,
    capacity:  usize,
    entrances: BTreeMap<CarId, DoorMotionController>,
}

impl Floor {
    /// A floor with a closed entrance for each of `cars`.
    pub fn new(number: i32, capacity: usize, doors: &DoorConfig, cars: &[CarId]) -> Self {
        Self {
            number,
            call_lit: false,
            waiting: Vec::new(),
            capacity,
            entrances: cars.iter().map(|&c| (c, DoorMotionController::new(doors))).collect(),
        }
    }

    #[inline]
    pub fn number(&self) -> i32 {
        self.number
    }

    // ── Call lamp ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_call_lit(&self) -> bool {
        self.call_lit
    }

    pub fn light_call(&mut self) {
        self.call_lit = true;
    }

    pub fn clear_call(&mut self) {
        self.call_lit = false;
    }

    // ── Hall ──────────────────────────────────────────────────────────────────

    /// Passengers waiting in the hall, in arrival order.
    pub fn waiting(&self) -> &[PassengerId] {
        &self.waiting
    }

    pub fn is_waiting(&self, passenger: PassengerId) -> bool {
        self.waiting.contains(&passenger)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_at_full_capacity(&self) -> bool {
        self.waiting.len() >= self.capacity
    }

    /// Put `passenger` in the hall.  Refused when the hall is full or the
    /// passenger is already there.
    pub fn add_waiting(&mut self, passenger: PassengerId) -> bool {
        if self.is_at_full_capacity() || self.is_waiting(passenger) {
            return false;
        }
        self.waiting.push(passenger);
        true
    }

    pub fn remove_waiting(&mut self, passenger: PassengerId) -> bool {
        match self.waiting.iter().position(|&p| p == passenger) {
            Some(i) => {
                self.waiting.remove(i);
                true
            }
            None => false,
        }
    }

    // ── Entrances ─────────────────────────────────────────────────────────────

    pub fn entrance(&self, car: CarId) -> Option<&DoorMotionController> {
        self.entrances.get(&car)
    }

    pub fn entrance_mut(&mut self, car: CarId) -> Option<&mut DoorMotionController> {
        self.entrances.get_mut(&car)
    }

    /// Entrances in ascending car order.
    pub fn entrances_mut(&mut self) -> impl Iterator<Item = (CarId, &mut DoorMotionController)> {
        self.entrances.iter_mut().map(|(&c, d)| (c, d))
    }
}
