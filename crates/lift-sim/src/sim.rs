//! The `Sim` struct and its tick loop.

use log::{debug, info};

use lift_core::{CarId, Config, FloorLayout, PassengerId, SimClock};
use lift_dispatch::Direction;
use lift_door::PassengerProbe;

use crate::{Building, DoorSource, ElevatorRegistry, SimObserver, TickStats};

/// The main simulation runner.
///
/// `Sim<L>` owns the building and the fleet and advances both one tick at a
/// time:
///
/// 1. **Entrances**: every floor entrance moves its leaves.
/// 2. **Cars**: each car in ascending `CarId` moves its doors, releases
///    riders, and processes at most its head task.
/// 3. **Snapshot**: every `output_interval_ticks` ticks the observer sees the
///    whole fleet.
///
/// Requests made between ticks (hall calls, boarding, external scheduling)
/// take effect on the next tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<L: FloorLayout> {
    /// Run configuration.
    pub config: Config,

    /// Current tick and elapsed seconds.
    pub clock: SimClock,

    /// Floors, halls and entrances.
    pub building: Building<L>,

    /// The cars.
    pub registry: ElevatorRegistry,
}

impl<L: FloorLayout> Sim<L> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.sim.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, probe: &dyn PassengerProbe, observer: &mut O) {
        info!(
            "running {} car(s) over {} floor(s) until {}",
            self.registry.len(),
            self.building.floors().len(),
            self.config.sim.end_tick()
        );
        while self.clock.current_tick < self.config.sim.end_tick() {
            self.step(probe, observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!("finished at {}", self.clock);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, probe: &dyn PassengerProbe, observer: &mut O) {
        for _ in 0..n {
            self.step(probe, observer);
        }
    }

    /// Advance one tick.
    pub fn step<O: SimObserver>(&mut self, probe: &dyn PassengerProbe, observer: &mut O) {
        let now = self.clock.current_tick;
        let dt = self.clock.tick_secs;
        let mut stats = TickStats::default();

        observer.on_tick_start(now);

        // ── Phase 1: entrance doors ───────────────────────────────────────
        for (floor, car, event) in self.building.tick_entrances(dt) {
            stats.door_events += 1;
            observer.on_door_event(now, DoorSource::Entrance { floor, car }, event);
        }

        // ── Phase 2: cars, ascending CarId ────────────────────────────────
        for car in self.registry.all_mut() {
            let (mut landings, layout) = self.building.landings_for(car.id());
            let step = car.step(dt, &mut landings, layout, probe);

            if let Some(event) = step.door_event {
                stats.door_events += 1;
                observer.on_door_event(now, DoorSource::Car(car.id()), event);
            }
            if !step.released.is_empty() {
                stats.riders_released += step.released.len();
                observer.on_passengers_released(now, car.id(), car.current_floor(), &step.released);
            }
            if let Some(floor) = step.completed {
                stats.tasks_completed += 1;
                observer.on_task_completed(now, car.id(), floor);
            }
            if car.is_moving() {
                stats.cars_moving += 1;
            }
        }

        // ── Phase 3: snapshot ─────────────────────────────────────────────
        let interval = self.config.sim.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.registry);
        }

        observer.on_tick_end(now, &stats);
        self.clock.advance();
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Send `car` to `floor` (external scheduling or an in-car button).
    ///
    /// `false` for an unknown car, an invalid floor, or a floor already
    /// queued.
    pub fn request_floor(&mut self, car: CarId, floor: i32) -> bool {
        let layout = self.building.layout();
        self.registry
            .get_mut(car)
            .is_some_and(|c| c.request_floor(floor, layout))
    }

    /// A hall call at `floor`, assigned to `car`: lights the call lamp and
    /// queues the floor.
    pub fn call_elevator(&mut self, car: CarId, floor: i32) -> bool {
        if self.registry.get(car).is_none() {
            return false;
        }
        let Some(f) = self.building.floor_mut(floor) else {
            return false;
        };
        f.light_call();
        debug!("hall call at floor {floor} for {car}");
        self.request_floor(car, floor)
    }

    /// Put a new passenger in the hall of `floor`.
    pub fn add_waiting(&mut self, floor: i32, passenger: PassengerId) -> bool {
        self.building
            .floor_mut(floor)
            .is_some_and(|f| f.add_waiting(passenger))
    }

    /// Move a waiting `passenger` from the hall of `floor` into `car`.
    ///
    /// The car must be standing at `floor` with its doors open or opening.
    pub fn board(&mut self, car: CarId, floor: i32, passenger: PassengerId, targets: Vec<i32>) -> bool {
        let Some(c) = self.registry.get_mut(car) else {
            return false;
        };
        if c.current_floor() != floor {
            return false;
        }
        let Some(f) = self.building.floor_mut(floor) else {
            return false;
        };
        if !f.is_waiting(passenger) || !c.receive_passenger(passenger, targets) {
            return false;
        }
        f.remove_waiting(passenger);
        true
    }

    /// See [`ElevatorRegistry::has_elevator`].
    pub fn has_elevator(&self, floor: i32, direction: Direction) -> bool {
        self.registry.has_elevator(floor, direction)
    }
}
