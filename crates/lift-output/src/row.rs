//! Plain data row types written by output backends.

use lift_dispatch::Direction;
use lift_door::DoorState;

/// The state of one car at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarSnapshotRow {
    pub car_id:     u16,
    pub tick:       u64,
    pub floor:      i32,
    pub height:     f32,
    pub direction:  Direction,
    pub door:       DoorState,
    /// Tasks in the queue, including the one under way.
    pub queued:     u32,
    pub riders:     u32,
    pub next_floor: i32,
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub elapsed_secs:    f64,
    pub cars_moving:     u64,
    pub tasks_completed: u64,
    pub riders_released: u64,
    pub door_events:     u64,
}
