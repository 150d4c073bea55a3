//! One elevator car.
//!
//! A `Car` ties together its motion, its doors, its riders and its task
//! queue, and implements the per-tick policy that decides between carrying
//! on with the head task, waiting for riders, and closing up when idle.

use log::{debug, info};

use lift_core::{CarConfig, CarId, DoorConfig, FloorLayout, LiftError, PassengerId};
use lift_dispatch::{
    CarMotion, Direction, DispatchScheduler, Landings, RequestRejection, TaskEnv, TaskPhase,
    TransportTask,
};
use lift_door::{BoardingGate, DoorEvent, DoorMotionController, PassengerProbe};

use crate::SimResult;

/// What happened to a car during one [`Car::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarStep {
    /// Completion event of the car doors, if a stroke finished.
    pub door_event: Option<DoorEvent>,
    /// Floor of the task that completed this tick.
    pub completed: Option<i32>,
    /// Riders released when the doors finished opening.
    pub released: Vec<PassengerId>,
}

#[derive(Clone, Debug)]
pub struct Car {
    id:        CarId,
    motion:    CarMotion,
    timing:    CarConfig,
    scheduler: DispatchScheduler,
    doors:     DoorMotionController,
    gate:      BoardingGate,
    /// Floor buttons pressed by boarding riders, in press order.
    pending:   Vec<i32>,
}

impl Car {
    /// A car parked with closed doors at `cfg.start_floor`.
    pub fn new(id: CarId, cfg: &CarConfig, doors: &DoorConfig, layout: &dyn FloorLayout) -> SimResult<Self> {
        let motion = CarMotion::parked(cfg.start_floor, layout)
            .ok_or(LiftError::FloorOutOfRange(cfg.start_floor))?;
        Ok(Self {
            id,
            motion,
            timing:    cfg.clone(),
            scheduler: DispatchScheduler::new(id),
            doors:     DoorMotionController::new(doors),
            gate:      BoardingGate::new(cfg.capacity),
            pending:   Vec::new(),
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CarId {
        self.id
    }

    #[inline]
    pub fn current_floor(&self) -> i32 {
        self.motion.current_floor
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.motion.height
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_moving
    }

    pub fn direction(&self) -> Direction {
        self.scheduler.direction(self.motion.current_floor)
    }

    /// Floor for indicator displays.
    pub fn next_floor(&self) -> i32 {
        self.scheduler.next_floor(self.motion.current_floor)
    }

    pub fn doors(&self) -> &DoorMotionController {
        &self.doors
    }

    pub fn gate(&self) -> &BoardingGate {
        &self.gate
    }

    pub fn scheduler(&self) -> &DispatchScheduler {
        &self.scheduler
    }

    pub fn timing(&self) -> &CarConfig {
        &self.timing
    }

    /// Buttons pressed inside the car that are not yet queued.
    pub fn pending_requests(&self) -> &[i32] {
        &self.pending
    }

    /// Riders at capacity?
    pub fn is_full(&self) -> bool {
        self.gate.is_full()
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    pub fn request_floor(&mut self, floor: i32, layout: &dyn FloorLayout) -> bool {
        self.scheduler.request_floor(floor, self.motion.current_floor, layout)
    }

    pub fn try_request_floor(
        &mut self,
        floor:  i32,
        layout: &dyn FloorLayout,
    ) -> Result<usize, RequestRejection> {
        self.scheduler.try_request_floor(floor, self.motion.current_floor, layout)
    }

    // ── Riders ────────────────────────────────────────────────────────────────

    /// Take `passenger` aboard.  Only while the doors are open or opening,
    /// and only once.  Its buttons are pressed straight away.
    pub fn receive_passenger(&mut self, passenger: PassengerId, targets: Vec<i32>) -> bool {
        if !(self.doors.is_open() || self.doors.is_opening()) {
            return false;
        }
        if !self.gate.admit(passenger, targets.clone()) {
            return false;
        }
        debug!("{} boarded {} for {:?}", self.id, passenger, targets);
        self.pending.extend(targets);
        true
    }

    /// Close the car doors unless riders are still stepping in or out.
    ///
    /// On success the pending buttons are queued.
    pub fn close_doors(&mut self, probe: &dyn PassengerProbe, layout: &dyn FloorLayout) -> bool {
        if !self.doors.close_gated(&mut self.gate, self.id, probe) {
            return false;
        }
        self.take_pending(layout);
        true
    }

    /// Queue the buttons pressed since the doors last closed.
    ///
    /// An empty queue is rebuilt in one go so the nearest stop leads;
    /// otherwise each floor goes through the insertion policy in press order.
    fn take_pending(&mut self, layout: &dyn FloorLayout) {
        if self.pending.is_empty() {
            return;
        }
        let floors = std::mem::take(&mut self.pending);
        let current = self.motion.current_floor;
        if self.scheduler.is_empty() {
            self.scheduler.request_bulk(&floors, current, layout);
        } else {
            for f in floors {
                self.scheduler.request_floor(f, current, layout);
            }
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance this car by `dt` seconds.
    ///
    /// 1. Move the car doors; when they finish opening, release the riders
    ///    bound for this floor.  A stop that completes first releases them
    ///    as it ends.
    /// 2. With work queued, carry on with a task already under way, or start
    ///    the next one once no rider is in the doorway.
    /// 3. With nothing queued, close up once the doorway is clear.
    pub fn step(
        &mut self,
        dt:       f32,
        landings: &mut dyn Landings,
        layout:   &dyn FloorLayout,
        probe:    &dyn PassengerProbe,
    ) -> CarStep {
        let mut out = CarStep { door_event: self.doors.tick(dt), ..CarStep::default() };
        if out.door_event == Some(DoorEvent::FullyOpen) {
            out.released = self.gate.release_at(self.motion.current_floor);
        }

        match self.scheduler.head().map(TransportTask::is_started) {
            Some(started) => {
                if started || !self.gate.is_waiting_for_passengers(self.id, probe) {
                    if !started {
                        self.take_pending(layout);
                    }
                    out.completed = self.process_head(dt, landings, layout);
                    // A short dwell can end the stop before the doors are
                    // fully open.
                    if let Some(floor) = out.completed {
                        out.released.extend(self.gate.release_at(floor));
                    }
                }
            }
            None => {
                if !self.motion.is_moving
                    && self.doors.is_open()
                    && !self.gate.is_waiting_for_passengers(self.id, probe)
                {
                    if let Some(entrance) = landings.entrance_mut(self.motion.current_floor) {
                        entrance.close();
                    }
                    self.doors.close();
                    self.take_pending(layout);
                }
            }
        }
        out
    }

    fn process_head(
        &mut self,
        dt:       f32,
        landings: &mut dyn Landings,
        layout:   &dyn FloorLayout,
    ) -> Option<i32> {
        let head = self.scheduler.head_mut()?;
        let mut env = TaskEnv {
            car:      self.id,
            motion:   &mut self.motion,
            doors:    &mut self.doors,
            landings,
            layout,
            timing:   &self.timing,
        };
        if head.process(&mut env, dt) != TaskPhase::Completed {
            return None;
        }
        let (task, floor) = (head.id(), head.target());
        self.scheduler.finish(task);
        info!("{} served floor {floor}", self.id);
        Some(floor)
    }
}
