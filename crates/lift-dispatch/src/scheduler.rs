//! Per-car task queue and SCAN-style insertion.

use log::{debug, warn};

use lift_core::{CarId, FloorLayout, TaskId};

use crate::{Direction, RequestRejection, TransportTask};

/// The ordered list of stops one car will make.
///
/// The queue is a plain `Vec`: it holds a handful of stops, and inserting in
/// the middle is the common operation.
#[derive(Clone, Debug)]
pub struct DispatchScheduler {
    car:     CarId,
    queue:   Vec<TransportTask>,
    next_id: u32,
}

impl DispatchScheduler {
    pub fn new(car: CarId) -> Self {
        Self { car, queue: Vec::new(), next_id: 0 }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn head(&self) -> Option<&TransportTask> {
        self.queue.first()
    }

    #[inline]
    pub fn head_mut(&mut self) -> Option<&mut TransportTask> {
        self.queue.first_mut()
    }

    pub fn tasks(&self) -> &[TransportTask] {
        &self.queue
    }

    /// Queued target floors, front to back.
    pub fn targets(&self) -> Vec<i32> {
        self.queue.iter().map(TransportTask::target).collect()
    }

    pub fn contains(&self, floor: i32) -> bool {
        self.queue.iter().any(|t| t.target() == floor)
    }

    /// Tasks started and not yet completed.  Never more than one.
    pub fn active_count(&self) -> usize {
        self.queue.iter().filter(|t| t.is_active()).count()
    }

    /// Where the car is heading, seen from `current_floor`.
    ///
    /// The head decides, unless the car is already standing at the head's
    /// floor, in which case the stop after it does.
    pub fn direction(&self, current_floor: i32) -> Direction {
        let next = match self.queue.as_slice() {
            [] => return Direction::Still,
            [head] => head.target(),
            [head, second, ..] => {
                if head.target() == current_floor { second.target() } else { head.target() }
            }
        };
        Direction::between(current_floor, next)
    }

    /// The next queued floor other than `current_floor`, or `current_floor`
    /// when there is none.
    pub fn next_floor(&self, current_floor: i32) -> i32 {
        self.queue
            .iter()
            .map(TransportTask::target)
            .find(|&f| f != current_floor)
            .unwrap_or(current_floor)
    }

    // ── Insertion policy ──────────────────────────────────────────────────────

    /// Queue position a request for `floor` would take.
    ///
    /// Walks the queue pair by pair, tracking the direction of the current
    /// leg.  The new floor goes in front of the first stop where it either
    /// falls between two consecutive stops, or lies past the last stop of a
    /// leg that is about to turn around.  Position 0 is never returned for a
    /// non-empty queue.
    pub fn insertion_index(&self, floor: i32, current_floor: i32) -> usize {
        let n = self.queue.len();
        if n == 0 {
            return 0;
        }
        let mut leg = self.direction(current_floor);
        if leg == Direction::Still {
            return n;
        }

        for i in 1..n {
            let prev = self.queue[i - 1].target();
            let link = self.queue[i].target();
            let pair = Direction::between(prev, link);

            if pair.is_beyond(prev, floor) && pair.is_beyond(floor, link) {
                return i;
            }
            if pair != leg && leg.is_beyond(prev, floor) {
                return i;
            }
            leg = pair;
        }
        n
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    /// Queue `floor`, reporting where it went or why it was refused.
    pub fn try_request_floor(
        &mut self,
        floor:         i32,
        current_floor: i32,
        layout:        &dyn FloorLayout,
    ) -> Result<usize, RequestRejection> {
        let height = layout
            .floor_height(floor)
            .ok_or(RequestRejection::OutOfRange(floor))?;
        if self.contains(floor) {
            return Err(RequestRejection::AlreadyQueued(floor));
        }

        let index = self.insertion_index(floor, current_floor);
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.queue.insert(index, TransportTask::new(id, floor, height));

        debug!(
            "{} queue {:?} heading {} (+{floor} at {index})",
            self.car,
            self.targets(),
            self.direction(current_floor)
        );
        Ok(index)
    }

    /// Queue `floor`.  `false` if it is outside the building or already
    /// queued.
    pub fn request_floor(&mut self, floor: i32, current_floor: i32, layout: &dyn FloorLayout) -> bool {
        self.try_request_floor(floor, current_floor, layout).is_ok()
    }

    /// Rebuild the queue from a batch of floors.
    ///
    /// The floor nearest `current_floor` goes first (earliest wins a tie),
    /// which fixes the initial direction; the rest follow through the normal
    /// insertion policy in input order.  A task already under way is kept at
    /// the head.  Returns how many floors were accepted.
    pub fn request_bulk(
        &mut self,
        floors:        &[i32],
        current_floor: i32,
        layout:        &dyn FloorLayout,
    ) -> usize {
        self.queue.retain(TransportTask::is_active);

        let nearest = floors
            .iter()
            .enumerate()
            .filter(|&(_, &f)| layout.contains_floor(f))
            .min_by_key(|&(i, &f)| ((f - current_floor).unsigned_abs(), i))
            .map(|(i, _)| i);

        let mut accepted = 0;
        if let Some(first) = nearest {
            if self.request_floor(floors[first], current_floor, layout) {
                accepted += 1;
            }
            for (i, &f) in floors.iter().enumerate() {
                if i != first && self.request_floor(f, current_floor, layout) {
                    accepted += 1;
                }
            }
        }
        accepted
    }

    /// Remove the task `id` from the queue.
    ///
    /// Returns `false` (and logs) if no such task is queued.
    pub fn finish(&mut self, id: TaskId) -> bool {
        match self.queue.iter().position(|t| t.id() == id) {
            Some(pos) => {
                let task = self.queue.remove(pos);
                debug!("{} finished {} at floor {}", self.car, id, task.target());
                true
            }
            None => {
                warn!("{} asked to finish {}, which is not queued", self.car, id);
                false
            }
        }
    }
}
