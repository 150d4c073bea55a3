//! Door motion state machine.

use std::fmt;

use lift_core::{CarId, DoorConfig};

use crate::{BoardingGate, PassengerProbe};

/// Speed factor applied once a leaf is within half its stroke of the goal.
pub const HALFWAY_SPEED_MULTIPLIER: f32 = 3.0;

/// Share of the stroke (percent) at which the halfway speed-up kicks in.
const HALFWAY_PERCENT: f32 = 50.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DoorState::Closed  => "closed",
            DoorState::Opening => "opening",
            DoorState::Open    => "open",
            DoorState::Closing => "closing",
        };
        f.write_str(s)
    }
}

/// Emitted by [`DoorMotionController::tick`] when a stroke completes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DoorEvent {
    FullyOpen,
    FullyClosed,
}

/// Two symmetric sliding leaves and the state of their motion.
///
/// `offset` is how far each leaf has slid from its closed position, in
/// `[0, travel]`.  The left leaf sits at `-offset`, the right at `+offset`.
#[derive(Clone, Debug)]
pub struct DoorMotionController {
    state:             DoorState,
    offset:            f32,
    travel:            f32,
    speed:             f32,
    tolerance_percent: f32,
}

impl DoorMotionController {
    /// A closed door with the given leaf geometry and motion settings.
    pub fn new(cfg: &DoorConfig) -> Self {
        Self {
            state:             DoorState::Closed,
            offset:            0.0,
            travel:            cfg.travel(),
            speed:             cfg.speed,
            tolerance_percent: cfg.tolerance_percent,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> DoorState {
        self.state
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    #[inline]
    pub fn is_opening(&self) -> bool {
        self.state == DoorState::Opening
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.state == DoorState::Closing
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    /// `true` while the leaves are in motion.
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self.state, DoorState::Opening | DoorState::Closing)
    }

    /// `(left, right)` leaf offsets from their closed positions.
    #[inline]
    pub fn leaf_offsets(&self) -> (f32, f32) {
        (-self.offset, self.offset)
    }

    /// Full stroke of one leaf.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Start opening.  No-op if already opening or open.
    pub fn open(&mut self) {
        if matches!(self.state, DoorState::Closed | DoorState::Closing) {
            self.state = DoorState::Opening;
        }
    }

    /// Start closing.  No-op if already closing or closed.
    pub fn close(&mut self) {
        if matches!(self.state, DoorState::Open | DoorState::Opening) {
            self.state = DoorState::Closing;
        }
    }

    /// Close unless riders are still boarding or alighting through `gate`.
    ///
    /// Returns `false` and leaves the state untouched when the gate is
    /// waiting; the caller retries on a later tick.
    pub fn close_gated(
        &mut self,
        gate:  &mut BoardingGate,
        car:   CarId,
        probe: &dyn PassengerProbe,
    ) -> bool {
        if gate.is_waiting_for_passengers(car, probe) {
            return false;
        }
        self.close();
        true
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    /// Advance the leaves by `dt` seconds.
    ///
    /// Returns the completion event on the tick the stroke finishes, and
    /// `None` on every other tick.
    pub fn tick(&mut self, dt: f32) -> Option<DoorEvent> {
        let goal = match self.state {
            DoorState::Opening => self.travel,
            DoorState::Closing => 0.0,
            DoorState::Open | DoorState::Closed => return None,
        };

        let speed = if self.within(goal, HALFWAY_PERCENT) {
            self.speed * HALFWAY_SPEED_MULTIPLIER
        } else {
            self.speed
        };
        let t = (dt * speed).clamp(0.0, 1.0);
        self.offset += (goal - self.offset) * t;

        if !self.within(goal, self.tolerance_percent) {
            return None;
        }
        self.offset = goal;
        if self.state == DoorState::Opening {
            self.state = DoorState::Open;
            Some(DoorEvent::FullyOpen)
        } else {
            self.state = DoorState::Closed;
            Some(DoorEvent::FullyClosed)
        }
    }

    /// Is the leaf within `percent` of the stroke from `goal`?
    #[inline]
    fn within(&self, goal: f32, percent: f32) -> bool {
        (goal - self.offset).abs() <= self.travel * percent / 100.0
    }
}
