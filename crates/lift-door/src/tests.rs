//! Unit tests for lift-door.

use std::collections::BTreeSet;

use lift_core::{CarId, DoorConfig, PassengerId};

use crate::{BoardingGate, DoorEvent, DoorMotionController, DoorState, PassengerProbe, SettledProbe};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 30.0;
const CAR: CarId = CarId(0);

fn door() -> DoorMotionController {
    DoorMotionController::new(&DoorConfig::default())
}

/// Tick until the door reports an event or the budget runs out.
fn run_until_event(door: &mut DoorMotionController, budget: usize) -> Option<(usize, DoorEvent)> {
    for i in 1..=budget {
        if let Some(ev) = door.tick(DT) {
            return Some((i, ev));
        }
    }
    None
}

/// Probe backed by explicit sets of passengers inside the car and gone.
#[derive(Default)]
struct SetProbe {
    inside: BTreeSet<PassengerId>,
    gone:   BTreeSet<PassengerId>,
}

impl PassengerProbe for SetProbe {
    fn is_inside(&self, _car: CarId, passenger: PassengerId) -> bool {
        self.inside.contains(&passenger)
    }

    fn is_gone(&self, passenger: PassengerId) -> bool {
        self.gone.contains(&passenger)
    }
}

// ── Door motion ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod door_tests {
    use super::*;

    #[test]
    fn starts_closed_and_idle() {
        let mut d = door();
        assert!(d.is_closed());
        assert!(!d.is_busy());
        assert_eq!(d.tick(DT), None);
        assert_eq!(d.leaf_offsets(), (0.0, 0.0));
    }

    #[test]
    fn opens_fully_and_fires_once() {
        let mut d = door();
        d.open();
        assert!(d.is_opening());

        let (_, ev) = run_until_event(&mut d, 300).expect("door never opened");
        assert_eq!(ev, DoorEvent::FullyOpen);
        assert!(d.is_open());
        let (l, r) = d.leaf_offsets();
        assert_eq!(r, d.travel());
        assert_eq!(l, -d.travel());

        for _ in 0..100 {
            assert_eq!(d.tick(DT), None);
        }
    }

    #[test]
    fn close_after_open_fires_fully_closed() {
        let mut d = door();
        d.open();
        run_until_event(&mut d, 300).unwrap();
        d.close();
        assert!(d.is_closing());
        let (_, ev) = run_until_event(&mut d, 300).unwrap();
        assert_eq!(ev, DoorEvent::FullyClosed);
        assert_eq!(d.state(), DoorState::Closed);
        assert_eq!(d.leaf_offsets().1, 0.0);
    }

    #[test]
    fn open_is_noop_when_open_or_opening() {
        let mut d = door();
        d.open();
        d.tick(DT);
        let mid = d.leaf_offsets();
        d.open();
        assert!(d.is_opening());
        assert_eq!(d.leaf_offsets(), mid);

        run_until_event(&mut d, 300).unwrap();
        d.open();
        assert!(d.is_open());
        assert_eq!(d.tick(DT), None);
    }

    #[test]
    fn close_is_noop_when_closed() {
        let mut d = door();
        d.close();
        assert!(d.is_closed());
        assert_eq!(d.tick(DT), None);
    }

    #[test]
    fn reversal_mid_stroke() {
        let mut d = door();
        d.open();
        for _ in 0..3 {
            d.tick(DT);
        }
        assert!(d.is_opening());
        d.close();
        let (_, ev) = run_until_event(&mut d, 300).unwrap();
        assert_eq!(ev, DoorEvent::FullyClosed);
    }

    #[test]
    fn halfway_speed_up_shortens_stroke() {
        // With the multiplier the second half closes three times faster, so a
        // stroke takes far fewer ticks than plain exponential approach would.
        let mut d = door();
        d.open();
        let (ticks, _) = run_until_event(&mut d, 300).unwrap();
        assert!(ticks < 40, "took {ticks} ticks");
    }

    #[test]
    fn leaves_stay_in_range_while_moving() {
        let mut d = door();
        d.open();
        for _ in 0..300 {
            d.tick(DT);
            let (l, r) = d.leaf_offsets();
            assert!(r >= 0.0 && r <= d.travel() + 1e-6);
            assert_eq!(l, -r);
        }
    }
}

// ── Gated close ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod gated_close {
    use super::*;

    #[test]
    fn blocked_while_rider_boarding() {
        let mut d = door();
        d.open();
        run_until_event(&mut d, 300).unwrap();

        let mut gate = BoardingGate::new(4);
        gate.admit(PassengerId(1), vec![3]);
        let mut probe = SetProbe::default();

        assert!(!d.close_gated(&mut gate, CAR, &probe));
        assert_eq!(d.state(), DoorState::Open);

        probe.inside.insert(PassengerId(1));
        assert!(d.close_gated(&mut gate, CAR, &probe));
        assert!(d.is_closing());
    }

    #[test]
    fn settled_probe_never_blocks() {
        let mut d = door();
        d.open();
        let mut gate = BoardingGate::new(4);
        gate.admit(PassengerId(1), vec![2]);
        gate.release_at(2);
        assert!(d.close_gated(&mut gate, CAR, &SettledProbe));
    }
}

// ── Boarding gate ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod gate_tests {
    use super::*;

    #[test]
    fn admit_refuses_duplicates_and_overflow() {
        let mut gate = BoardingGate::new(2);
        assert!(gate.admit(PassengerId(1), vec![4]));
        assert!(!gate.admit(PassengerId(1), vec![5]));
        assert!(gate.admit(PassengerId(2), vec![5]));
        assert!(gate.is_full());
        assert!(!gate.admit(PassengerId(3), vec![6]));
        assert_eq!(gate.rider_count(), 2);
        assert_eq!(gate.targets_of(PassengerId(1)), Some(&[4][..]));
    }

    #[test]
    fn release_moves_matching_riders_to_leaving() {
        let mut gate = BoardingGate::new(8);
        gate.admit(PassengerId(3), vec![2]);
        gate.admit(PassengerId(1), vec![5, 2]);
        gate.admit(PassengerId(2), vec![6]);

        let released = gate.release_at(2);
        assert_eq!(released, vec![PassengerId(1), PassengerId(3)]);
        assert_eq!(gate.riders().collect::<Vec<_>>(), vec![PassengerId(2)]);
        assert_eq!(gate.leaving().count(), 2);
        assert!(!gate.is_counting());
    }

    #[test]
    fn waits_for_leaving_riders_then_clears() {
        let mut gate = BoardingGate::new(8);
        gate.admit(PassengerId(1), vec![2]);
        gate.release_at(2);

        let mut probe = SetProbe::default();
        probe.inside.insert(PassengerId(1));
        assert!(gate.is_waiting_for_passengers(CAR, &probe));
        assert_eq!(gate.leaving().count(), 1);

        probe.inside.clear();
        assert!(!gate.is_waiting_for_passengers(CAR, &probe));
        assert_eq!(gate.leaving().count(), 0);
    }

    #[test]
    fn gone_riders_do_not_block() {
        let mut gate = BoardingGate::new(8);
        gate.admit(PassengerId(9), vec![1]);
        let mut probe = SetProbe::default();
        assert!(gate.is_waiting_for_passengers(CAR, &probe));
        probe.gone.insert(PassengerId(9));
        assert!(!gate.is_waiting_for_passengers(CAR, &probe));
    }

    #[test]
    fn open_exit_batch_blocks() {
        let mut gate = BoardingGate::new(8);
        gate.begin_exit_batch();
        assert!(gate.is_waiting_for_passengers(CAR, &SettledProbe));
        gate.end_exit_batch();
        assert!(!gate.is_waiting_for_passengers(CAR, &SettledProbe));
    }
}
