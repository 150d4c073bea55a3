//! Transport task execution.
//!
//! A `TransportTask` carries one car to one floor and holds its doors open
//! there for a dwell period.  It does not own the car; everything it drives
//! is lent to it each tick through a [`TaskEnv`].

use log::debug;

use lift_core::{CarConfig, CarId, FloorLayout, TaskId};
use lift_door::DoorMotionController;

/// Distance (world units) at which a travelling car counts as arrived.
pub const REACH_TOLERANCE: f32 = 0.1;

// ── Environment ───────────────────────────────────────────────────────────────

/// Vertical state of a car.
#[derive(Clone, Debug, PartialEq)]
pub struct CarMotion {
    /// World height of the car floor.
    pub height: f32,
    /// Floor whose band contains `height`.
    pub current_floor: i32,
    pub is_moving: bool,
}

impl CarMotion {
    /// A car parked at `floor`.
    pub fn parked(floor: i32, layout: &dyn FloorLayout) -> Option<Self> {
        Some(Self {
            height:        layout.floor_height(floor)?,
            current_floor: floor,
            is_moving:     false,
        })
    }
}

/// The floor side of one car's shaft: its entrance doors and call lamps.
pub trait Landings {
    fn entrance(&self, floor: i32) -> Option<&DoorMotionController>;

    fn entrance_mut(&mut self, floor: i32) -> Option<&mut DoorMotionController>;

    /// The car has opened at `floor`; switch off the hall call lamp there.
    fn answer_call(&mut self, _floor: i32) {}
}

/// Everything a task drives, lent by the owning car for one tick.
pub struct TaskEnv<'a> {
    pub car:      CarId,
    pub motion:   &'a mut CarMotion,
    pub doors:    &'a mut DoorMotionController,
    pub landings: &'a mut dyn Landings,
    pub layout:   &'a dyn FloorLayout,
    pub timing:   &'a CarConfig,
}

impl TaskEnv<'_> {
    /// Are doors on either side still moving, or is the car standing open?
    fn doors_busy(&self) -> bool {
        let entrance_busy = self.landings
            .entrance(self.motion.current_floor)
            .is_some_and(DoorMotionController::is_busy);
        entrance_busy || self.doors.is_busy() || self.doors.is_open()
    }

    fn close_all(&mut self) {
        self.doors.close();
        if let Some(entrance) = self.landings.entrance_mut(self.motion.current_floor) {
            entrance.close();
        }
    }

    fn open_all(&mut self, floor: i32) {
        self.doors.open();
        if let Some(entrance) = self.landings.entrance_mut(floor) {
            entrance.open();
        }
    }
}

// ── TransportTask ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TaskPhase {
    #[default]
    NotStarted,
    Traveling,
    ArrivedPendingOpen,
    Dwelling,
    Completed,
}

#[derive(Clone, Debug)]
pub struct TransportTask {
    id:           TaskId,
    target:       i32,
    destination:  f32,
    start_height: f32,
    travel_secs:  f32,
    elapsed:      f32,
    open_timer:   f32,
    dwell_timer:  f32,
    phase:        TaskPhase,
}

impl TransportTask {
    /// A task to bring the car to `target`, whose landing is at world height
    /// `destination`.
    pub fn new(id: TaskId, target: i32, destination: f32) -> Self {
        Self {
            id,
            target,
            destination,
            start_height: destination,
            travel_secs:  0.0,
            elapsed:      0.0,
            open_timer:   0.0,
            dwell_timer:  0.0,
            phase:        TaskPhase::NotStarted,
        }
    }

    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> i32 {
        self.target
    }

    #[inline]
    pub fn destination(&self) -> f32 {
        self.destination
    }

    #[inline]
    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    /// `true` once `start` has run.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.phase != TaskPhase::NotStarted
    }

    /// Started and not yet completed.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, TaskPhase::NotStarted | TaskPhase::Completed)
    }

    /// Seconds the whole trip takes once under way.
    #[inline]
    pub fn travel_secs(&self) -> f32 {
        self.travel_secs
    }

    /// Close up and commit the car to this trip.
    pub fn start(&mut self, env: &mut TaskEnv<'_>) {
        env.close_all();
        env.motion.is_moving = true;
        self.start_height = env.motion.height;
        let floors = (self.target - env.motion.current_floor).unsigned_abs();
        self.travel_secs = floors as f32 * env.timing.per_floor_secs;
        self.phase = TaskPhase::Traveling;
        debug!(
            "{} start: floor {} -> {} ({:.2}s)",
            env.car, env.motion.current_floor, self.target, self.travel_secs
        );
    }

    /// Advance by `dt` seconds, starting first if needed.  Returns the phase
    /// after the step.
    pub fn process(&mut self, env: &mut TaskEnv<'_>, dt: f32) -> TaskPhase {
        if self.phase == TaskPhase::NotStarted {
            self.start(env);
        }

        match self.phase {
            TaskPhase::Traveling => {
                if !env.doors_busy() {
                    self.travel(env, dt);
                }
            }
            TaskPhase::ArrivedPendingOpen => {
                if self.open_timer >= env.timing.secs_till_open {
                    env.open_all(self.target);
                    env.landings.answer_call(self.target);
                    self.phase = TaskPhase::Dwelling;
                    debug!("{} opening at floor {}", env.car, self.target);
                } else {
                    self.open_timer += dt;
                }
            }
            TaskPhase::Dwelling => {
                if self.dwell_timer >= env.timing.secs_till_close {
                    self.phase = TaskPhase::Completed;
                } else {
                    self.dwell_timer += dt;
                }
            }
            TaskPhase::NotStarted | TaskPhase::Completed => {}
        }
        self.phase
    }

    fn travel(&mut self, env: &mut TaskEnv<'_>, dt: f32) {
        self.elapsed += dt;
        let frac = if self.travel_secs > 0.0 {
            (self.elapsed / self.travel_secs).min(1.0)
        } else {
            1.0
        };
        let motion = &mut *env.motion;
        motion.height = self.start_height + (self.destination - self.start_height) * frac;
        if let Some(floor) = env.layout.floor_for_height(motion.height) {
            motion.current_floor = floor;
        }

        if (self.destination - motion.height).abs() <= REACH_TOLERANCE {
            motion.height = self.destination;
            motion.current_floor = self.target;
            motion.is_moving = false;
            self.phase = TaskPhase::ArrivedPendingOpen;
            debug!("{} arrived at floor {}", env.car, self.target);
        }
    }
}
