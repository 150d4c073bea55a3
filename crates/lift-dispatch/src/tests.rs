//! Unit tests for lift-dispatch.

use std::collections::BTreeMap;

use lift_core::{CarConfig, CarId, DoorConfig, FloorLayout, SimRng, TaskId, UniformFloors};
use lift_door::DoorMotionController;

use crate::{
    CarMotion, Direction, DispatchScheduler, Landings, RequestRejection, TaskEnv, TaskPhase,
    TransportTask,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 30.0;
const CAR: CarId = CarId(0);

fn tower() -> UniformFloors {
    UniformFloors::new(10, 3.0, 0.0)
}

/// Scheduler with `floors` requested in order from `current`.
fn queued(floors: &[i32], current: i32) -> DispatchScheduler {
    let layout = tower();
    let mut s = DispatchScheduler::new(CAR);
    for &f in floors {
        assert!(s.request_floor(f, current, &layout), "request {f} refused");
    }
    s
}

/// One entrance per floor plus a record of answered calls.
struct TestLandings {
    entrances: BTreeMap<i32, DoorMotionController>,
    answered:  Vec<i32>,
}

impl TestLandings {
    fn new(layout: &dyn FloorLayout) -> Self {
        let cfg = DoorConfig::default();
        let entrances = (0..layout.floor_count() as i32)
            .map(|f| (f, DoorMotionController::new(&cfg)))
            .collect();
        Self { entrances, answered: Vec::new() }
    }

    fn tick(&mut self, dt: f32) {
        for door in self.entrances.values_mut() {
            door.tick(dt);
        }
    }
}

impl Landings for TestLandings {
    fn entrance(&self, floor: i32) -> Option<&DoorMotionController> {
        self.entrances.get(&floor)
    }

    fn entrance_mut(&mut self, floor: i32) -> Option<&mut DoorMotionController> {
        self.entrances.get_mut(&floor)
    }

    fn answer_call(&mut self, floor: i32) {
        self.answered.push(floor);
    }
}

/// Car-side state a task runs against.
struct Rig {
    layout:   UniformFloors,
    motion:   CarMotion,
    doors:    DoorMotionController,
    landings: TestLandings,
    timing:   CarConfig,
}

impl Rig {
    fn at(floor: i32) -> Self {
        let layout = tower();
        let motion = CarMotion::parked(floor, &layout).unwrap();
        let landings = TestLandings::new(&layout);
        Self {
            layout,
            motion,
            doors: DoorMotionController::new(&DoorConfig::default()),
            landings,
            timing: CarConfig::default(),
        }
    }

    /// Tick doors, then process `task` once.
    fn step(&mut self, task: &mut TransportTask) -> TaskPhase {
        self.doors.tick(DT);
        self.landings.tick(DT);
        let mut env = TaskEnv {
            car:      CAR,
            motion:   &mut self.motion,
            doors:    &mut self.doors,
            landings: &mut self.landings,
            layout:   &self.layout,
            timing:   &self.timing,
        };
        task.process(&mut env, DT)
    }

    fn task_to(&self, floor: i32) -> TransportTask {
        TransportTask::new(TaskId(0), floor, self.layout.floor_height(floor).unwrap())
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod direction_tests {
    use super::*;

    #[test]
    fn empty_queue_is_still() {
        let s = DispatchScheduler::new(CAR);
        assert_eq!(s.direction(4), Direction::Still);
        assert_eq!(s.next_floor(4), 4);
    }

    #[test]
    fn head_decides() {
        assert_eq!(queued(&[6], 2).direction(2), Direction::Up);
        assert_eq!(queued(&[1], 2).direction(2), Direction::Down);
    }

    #[test]
    fn standing_at_head_looks_at_second() {
        let s = queued(&[3, 1], 3);
        assert_eq!(s.direction(3), Direction::Down);
        assert_eq!(s.next_floor(3), 1);
    }

    #[test]
    fn single_task_at_current_floor_is_still() {
        let s = queued(&[3], 3);
        assert_eq!(s.direction(3), Direction::Still);
    }

    #[test]
    fn serves() {
        assert!(Direction::Still.serves(Direction::Up));
        assert!(Direction::Up.serves(Direction::Both));
        assert!(Direction::Down.serves(Direction::Down));
        assert!(!Direction::Down.serves(Direction::Up));
    }
}

// ── Requests and insertion ────────────────────────────────────────────────────

#[cfg(test)]
mod request_tests {
    use super::*;

    #[test]
    fn duplicate_request_queues_once() {
        let layout = tower();
        let mut s = DispatchScheduler::new(CAR);
        assert!(s.request_floor(4, 0, &layout));
        assert_eq!(
            s.try_request_floor(4, 0, &layout),
            Err(RequestRejection::AlreadyQueued(4))
        );
        assert_eq!(s.targets(), vec![4]);
    }

    #[test]
    fn out_of_range_refused() {
        let layout = tower();
        let mut s = queued(&[2], 0);
        assert_eq!(s.try_request_floor(-1, 0, &layout), Err(RequestRejection::OutOfRange(-1)));
        assert_eq!(s.try_request_floor(10, 0, &layout), Err(RequestRejection::OutOfRange(10)));
        assert!(!s.request_floor(99, 0, &layout));
        assert_eq!(s.targets(), vec![2]);
    }

    #[test]
    fn inserts_within_current_leg() {
        let layout = tower();
        let mut s = queued(&[3, 5, 8], 1);
        assert_eq!(s.direction(1), Direction::Up);

        assert_eq!(s.try_request_floor(4, 1, &layout), Ok(1));
        assert_eq!(s.targets(), vec![3, 4, 5, 8]);
    }

    #[test]
    fn floor_behind_the_car_goes_last() {
        let layout = tower();
        let mut s = queued(&[3, 5, 8], 1);
        assert!(s.request_floor(2, 1, &layout));
        assert_eq!(s.targets(), vec![3, 5, 8, 2]);
    }

    #[test]
    fn extends_leg_before_reversal() {
        let layout = tower();
        let mut s = queued(&[3, 8, 2], 1);
        assert!(s.request_floor(9, 1, &layout));
        assert_eq!(s.targets(), vec![3, 8, 9, 2]);
        assert!(s.request_floor(0, 1, &layout));
        assert_eq!(s.targets(), vec![3, 8, 9, 2, 0]);
        assert!(s.request_floor(1, 1, &layout));
        assert_eq!(s.targets(), vec![3, 8, 9, 2, 1, 0]);
    }

    #[test]
    fn fills_the_leg_after_a_reversal() {
        let layout = tower();
        let mut s = queued(&[8, 3], 1);
        assert_eq!(s.try_request_floor(5, 1, &layout), Ok(1));
        assert_eq!(s.targets(), vec![8, 5, 3]);

        let mut s = queued(&[8, 4, 2], 1);
        assert_eq!(s.try_request_floor(6, 1, &layout), Ok(1));
        assert_eq!(s.targets(), vec![8, 6, 4, 2]);
    }

    #[test]
    fn downward_legs_mirror_upward_ones() {
        let layout = tower();
        let mut s = queued(&[6, 4, 1], 8);
        assert_eq!(s.direction(8), Direction::Down);
        assert!(s.request_floor(5, 8, &layout));
        assert_eq!(s.targets(), vec![6, 5, 4, 1]);
        assert!(s.request_floor(9, 8, &layout));
        assert_eq!(s.targets(), vec![6, 5, 4, 1, 9]);
    }

    #[test]
    fn head_is_never_displaced() {
        let layout = tower();
        let mut s = queued(&[5], 1);
        // 3 is on the way, but the head may already be under way.
        assert_eq!(s.try_request_floor(3, 1, &layout), Ok(1));
        assert_eq!(s.targets(), vec![5, 3]);
    }

    #[test]
    fn still_car_appends() {
        let layout = tower();
        let mut s = queued(&[4], 4);
        assert_eq!(s.direction(4), Direction::Still);
        assert_eq!(s.try_request_floor(2, 4, &layout), Ok(1));
    }

    #[test]
    fn random_requests_keep_queue_unique_and_head_fixed() {
        let layout = tower();
        let mut rng = SimRng::new(7);
        for _ in 0..50 {
            let current = rng.gen_range(0..10);
            let mut s = DispatchScheduler::new(CAR);
            let mut head = None;
            for _ in 0..20 {
                let f = rng.gen_range(-2..12);
                s.request_floor(f, current, &layout);
                if head.is_none() {
                    head = s.head().map(TransportTask::id);
                }
                assert_eq!(s.head().map(TransportTask::id), head);
            }
            let mut targets = s.targets();
            let len = targets.len();
            targets.sort_unstable();
            targets.dedup();
            assert_eq!(targets.len(), len);
            assert!(targets.iter().all(|&f| (0..10).contains(&f)));
        }
    }

    #[test]
    fn random_requests_never_pass_a_floor_twice() {
        let layout = tower();
        let mut rng = SimRng::new(11);
        for _ in 0..200 {
            let current = rng.gen_range(0..10);
            let mut s = DispatchScheduler::new(CAR);
            for _ in 0..20 {
                s.request_floor(rng.gen_range(-2..12), current, &layout);
            }
            let targets = s.targets();
            let legs = monotone_legs(&targets);
            for (j, later) in legs.iter().enumerate() {
                for earlier in &legs[..j] {
                    let lo = *earlier.iter().min().unwrap();
                    let hi = *earlier.iter().max().unwrap();
                    for &f in &later[1..] {
                        assert!(
                            !(lo < f && f < hi),
                            "{f} lies inside an earlier leg {earlier:?} of {targets:?}"
                        );
                    }
                }
            }
        }
    }

    /// Split `stops` into maximal monotone runs.  Neighbouring runs share
    /// their turning floor.
    fn monotone_legs(stops: &[i32]) -> Vec<&[i32]> {
        let mut legs = Vec::new();
        let mut start = 0;
        for i in 2..stops.len() {
            let before = Direction::between(stops[i - 2], stops[i - 1]);
            let after = Direction::between(stops[i - 1], stops[i]);
            if before != after {
                legs.push(&stops[start..i]);
                start = i - 1;
            }
        }
        if !stops.is_empty() {
            legs.push(&stops[start..]);
        }
        legs
    }
}

// ── Bulk requests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod bulk_tests {
    use super::*;

    #[test]
    fn idle_bulk_starts_with_nearest() {
        let layout = tower();
        let mut s = DispatchScheduler::new(CAR);
        assert_eq!(s.request_bulk(&[7, 2, 5], 0, &layout), 3);
        assert_eq!(s.targets(), vec![2, 5, 7]);
    }

    #[test]
    fn bulk_tie_prefers_earliest() {
        let layout = tower();
        let mut s = DispatchScheduler::new(CAR);
        s.request_bulk(&[7, 3, 1], 5, &layout);
        assert_eq!(s.head().unwrap().target(), 7);
        assert_eq!(s.targets(), vec![7, 3, 1]);
    }

    #[test]
    fn bulk_skips_invalid_and_duplicates() {
        let layout = tower();
        let mut s = DispatchScheduler::new(CAR);
        assert_eq!(s.request_bulk(&[-4, 6, 6, 20, 3], 0, &layout), 2);
        assert_eq!(s.targets(), vec![3, 6]);
    }

    #[test]
    fn bulk_replaces_waiting_tasks() {
        let layout = tower();
        let mut s = queued(&[9, 8], 0);
        s.request_bulk(&[1], 0, &layout);
        assert_eq!(s.targets(), vec![1]);
    }
}

// ── Task execution ────────────────────────────────────────────────────────────

#[cfg(test)]
mod task_tests {
    use super::*;

    #[test]
    fn completes_within_budget() {
        let mut rig = Rig::at(0);
        let mut task = rig.task_to(2);

        let mut seen = Vec::new();
        for _ in 0..500 {
            let phase = rig.step(&mut task);
            if seen.last() != Some(&phase) {
                seen.push(phase);
            }
            if phase == TaskPhase::Completed {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                TaskPhase::Traveling,
                TaskPhase::ArrivedPendingOpen,
                TaskPhase::Dwelling,
                TaskPhase::Completed,
            ]
        );
        assert_eq!(rig.motion.current_floor, 2);
        assert_eq!(rig.motion.height, 6.0);
        assert!(!rig.motion.is_moving);
        assert_eq!(rig.landings.answered, vec![2]);
        assert!(rig.doors.is_open() || rig.doors.is_opening());
    }

    #[test]
    fn start_closes_doors_and_computes_travel() {
        let mut rig = Rig::at(1);
        rig.doors.open();
        rig.landings.entrance_mut(1).unwrap().open();
        for _ in 0..100 {
            rig.doors.tick(DT);
            rig.landings.tick(DT);
        }
        assert!(rig.doors.is_open());

        let mut task = rig.task_to(4);
        rig.step(&mut task);
        assert!(task.is_started());
        assert!(rig.motion.is_moving);
        assert_eq!(task.travel_secs(), 3.0);
        assert!(rig.doors.is_closing());
        assert!(rig.landings.entrance(1).unwrap().is_closing());
    }

    #[test]
    fn no_travel_while_doors_move() {
        let mut rig = Rig::at(0);
        rig.doors.open();
        for _ in 0..100 {
            rig.doors.tick(DT);
        }
        let mut task = rig.task_to(3);
        rig.step(&mut task);
        assert!(rig.doors.is_closing());
        assert_eq!(rig.motion.height, 0.0);

        for _ in 0..200 {
            if rig.doors.is_closed() {
                break;
            }
            rig.step(&mut task);
            if rig.doors.is_busy() {
                assert_eq!(rig.motion.height, 0.0);
            }
        }
        rig.step(&mut task);
        assert!(rig.motion.height > 0.0);
    }

    #[test]
    fn current_floor_tracks_height() {
        let mut rig = Rig::at(0);
        let mut task = rig.task_to(4);
        // Four floors at one second each: past floor 2 after ~2.2 seconds.
        for _ in 0..65 {
            rig.step(&mut task);
        }
        assert!(rig.motion.is_moving);
        assert_eq!(rig.motion.current_floor, 2);
    }

    #[test]
    fn request_for_current_floor_reopens() {
        let mut rig = Rig::at(3);
        let mut task = rig.task_to(3);
        rig.step(&mut task);
        assert_eq!(task.phase(), TaskPhase::ArrivedPendingOpen);
        assert_eq!(task.travel_secs(), 0.0);
    }
}

// ── Queue lifecycle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn finish_removes_exactly_once() {
        let mut s = queued(&[2, 5], 0);
        let id = s.head().unwrap().id();
        assert!(s.finish(id));
        assert!(!s.finish(id));
        assert_eq!(s.targets(), vec![5]);
    }

    #[test]
    fn one_active_task_through_a_whole_queue() {
        let mut rig = Rig::at(0);
        let mut s = queued(&[3, 6, 1], 0);
        let mut served = Vec::new();

        for _ in 0..5_000 {
            let Some(head) = s.head_mut() else { break };
            let phase = rig.step(head);
            assert!(s.active_count() <= 1);
            if phase == TaskPhase::Completed {
                let head = s.head().unwrap();
                served.push(head.target());
                let id = head.id();
                s.finish(id);
            }
        }
        assert_eq!(served, vec![3, 6, 1]);
        assert!(s.is_empty());
    }
}
