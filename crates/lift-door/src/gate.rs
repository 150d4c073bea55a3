//! Departure gating on boarding and alighting riders.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use lift_core::{CarId, PassengerId};

use crate::PassengerProbe;

/// The riders assigned to one car and the ones currently stepping out.
///
/// A car may not close its doors while the gate reports it is waiting: an
/// exit batch is being computed, a leaving rider is still inside, or an
/// assigned rider has not finished stepping in.
#[derive(Clone, Debug)]
pub struct BoardingGate {
    /// Assigned riders and the floors each one wants.
    riders:   BTreeMap<PassengerId, Vec<i32>>,
    leaving:  BTreeSet<PassengerId>,
    counting: bool,
    capacity: usize,
}

impl BoardingGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            riders:   BTreeMap::new(),
            leaving:  BTreeSet::new(),
            counting: false,
            capacity,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.riders.len() >= self.capacity
    }

    #[inline]
    pub fn contains(&self, passenger: PassengerId) -> bool {
        self.riders.contains_key(&passenger)
    }

    /// Assigned riders in ascending ID order.
    pub fn riders(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.riders.keys().copied()
    }

    /// Target floors of one rider.
    pub fn targets_of(&self, passenger: PassengerId) -> Option<&[i32]> {
        self.riders.get(&passenger).map(Vec::as_slice)
    }

    /// Riders released at the last stop who have not yet been seen outside.
    pub fn leaving(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.leaving.iter().copied()
    }

    /// `true` while an exit batch is open.
    #[inline]
    pub fn is_counting(&self) -> bool {
        self.counting
    }

    // ── Boarding ──────────────────────────────────────────────────────────────

    /// Assign `passenger` to this car.  Refused when already aboard or full.
    pub fn admit(&mut self, passenger: PassengerId, targets: Vec<i32>) -> bool {
        if self.contains(passenger) || self.is_full() {
            return false;
        }
        self.riders.insert(passenger, targets);
        true
    }

    // ── Alighting ─────────────────────────────────────────────────────────────

    pub fn begin_exit_batch(&mut self) {
        self.counting = true;
    }

    pub fn end_exit_batch(&mut self) {
        self.counting = false;
    }

    /// Move every rider bound for `floor` into the leaving set.
    ///
    /// Returns the released riders in ascending ID order.
    pub fn release_at(&mut self, floor: i32) -> Vec<PassengerId> {
        self.begin_exit_batch();

        let released: Vec<PassengerId> = self.riders
            .iter()
            .filter(|(_, targets)| targets.contains(&floor))
            .map(|(&p, _)| p)
            .collect();
        for &p in &released {
            self.riders.remove(&p);
            self.leaving.insert(p);
        }

        self.end_exit_batch();
        if !released.is_empty() {
            debug!("released {} rider(s) at floor {floor}", released.len());
        }
        released
    }

    // ── Gating ────────────────────────────────────────────────────────────────

    /// Must the car hold its doors for riders in transit?
    ///
    /// Once every leaving rider is outside (or gone) the leaving set is
    /// cleared.
    pub fn is_waiting_for_passengers(&mut self, car: CarId, probe: &dyn PassengerProbe) -> bool {
        if self.counting {
            return true;
        }

        let exiting = self.leaving
            .iter()
            .any(|&p| probe.is_inside(car, p) && !probe.is_gone(p));
        if exiting {
            return true;
        }
        self.leaving.clear();

        self.riders
            .keys()
            .any(|&p| !probe.is_inside(car, p) && !probe.is_gone(p))
    }
}
