//! The `OutputWriter` trait.

use crate::{CarSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for fleet snapshots and tick counters.
///
/// The observer cannot return errors through `SimObserver`, so it keeps the
/// first one for [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Append one row per car for a snapshot tick.
    fn write_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
