//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use lift_core::{SimConfig, Tick};
use lift_sim::{ElevatorRegistry, SimObserver, TickStats};

use crate::row::{CarSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes car snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    tick_secs:  f32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_secs:  config.tick_secs,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:            tick.0,
            elapsed_secs:    tick.0 as f64 * self.tick_secs as f64,
            cars_moving:     stats.cars_moving as u64,
            tasks_completed: stats.tasks_completed as u64,
            riders_released: stats.riders_released as u64,
            door_events:     stats.door_events as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, registry: &ElevatorRegistry) {
        let rows: Vec<CarSnapshotRow> = registry
            .all()
            .map(|car| CarSnapshotRow {
                car_id:     car.id().0,
                tick:       tick.0,
                floor:      car.current_floor(),
                height:     car.height(),
                direction:  car.direction(),
                door:       car.doors().state(),
                queued:     car.scheduler().len() as u32,
                riders:     car.gate().rider_count() as u32,
                next_floor: car.next_floor(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
