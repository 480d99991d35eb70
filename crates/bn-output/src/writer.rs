//! The `OutputWriter` trait implemented by backend writers.

use crate::{NodeSnapshotRow, OutputResult, TickStatsRow};

/// A sink for per-tick stats and node snapshots.
///
/// Errors are returned to [`SimOutputObserver`](crate::SimOutputObserver),
/// which stores the first one for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write one per-tick stats row.
    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()>;

    /// Write a batch of node snapshot rows.
    fn write_node_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
