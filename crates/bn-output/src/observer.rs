//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bn_core::Tick;
use bn_sim::{ScenarioStats, SimObserver, Snapshot};

use crate::row::{NodeSnapshotRow, TickStatsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes per-tick stats and node snapshots to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check with [`take_error`][Self::take_error] after
/// the run.  The writer is finished when the scenario is torn down through
/// `ScenarioController::teardown_with`, or explicitly via
/// [`finish`][Self::finish].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    stats_rows:   u64,
    node_rows:    u64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, stats_rows: 0, node_rows: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written so far as `(tick_stats, node_snapshots)`.
    pub fn rows_written(&self) -> (u64, u64) {
        (self.stats_rows, self.node_rows)
    }

    /// Flush the writer now, reporting any stored or new error.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        self.take_error().map_or(Ok(()), Err)
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
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
    fn on_tick_end(&mut self, tick: Tick, stats: &ScenarioStats) {
        let row = TickStatsRow {
            tick:       tick.0,
            scenario:   stats.kind.as_str(),
            safe:       stats.safe as u64,
            infected:   stats.infected as u64,
            recovering: stats.recovering as u64,
            vulnerable: stats.vulnerable as u64,
            patched:    stats.patched as u64,
            firewall:   stats.firewall as u64,
            agents:     stats.agents as u64,
            edges:      stats.edges as u64,
        };
        let result = self.writer.write_tick_stats(&row);
        if result.is_ok() {
            self.stats_rows += 1;
        }
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, snapshot: &Snapshot) {
        let rows: Vec<NodeSnapshotRow> = snapshot
            .nodes
            .iter()
            .map(|n| NodeSnapshotRow {
                tick:     tick.0,
                node_id:  n.id.0,
                x:        n.pos.x,
                y:        n.pos.y,
                status:   n.status.as_str(),
                pressure: n.intensity,
            })
            .collect();

        if rows.is_empty() {
            return;
        }
        let result = self.writer.write_node_snapshots(&rows);
        if result.is_ok() {
            self.node_rows += rows.len() as u64;
        }
        self.store_err(result);
    }

    fn on_teardown(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
