//! Simulation observer trait for progress reporting and data collection.

use lift_core::{CarId, PassengerId, Tick};
use lift_door::DoorEvent;

use crate::ElevatorRegistry;

/// Which door finished a stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DoorSource {
    /// The car's own doors.
    Car(CarId),
    /// The entrance of `car`'s shaft on `floor`.
    Entrance { floor: i32, car: CarId },
}

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub cars_moving:     usize,
    pub tasks_completed: usize,
    pub riders_released: usize,
    pub door_events:     usize,
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_door_event(&mut self, _tick: Tick, _door: DoorSource, _event: DoorEvent) {}

    /// A car finished its task at `floor`.
    fn on_task_completed(&mut self, _tick: Tick, _car: CarId, _floor: i32) {}

    /// Riders stepped out of `car` at `floor`.
    fn on_passengers_released(
        &mut self,
        _tick:   Tick,
        _car:    CarId,
        _floor:  i32,
        _riders: &[PassengerId],
    ) {}

    /// Called at snapshot intervals (every `config.sim.output_interval_ticks`
    /// ticks) with read-only access to the fleet.
    fn on_snapshot(&mut self, _tick: Tick, _registry: &ElevatorRegistry) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
