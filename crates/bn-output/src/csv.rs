//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_stats.csv`
//! - `node_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{NodeSnapshotRow, OutputResult, TickStatsRow};

pub const TICK_STATS_FILE: &str = "tick_stats.csv";
pub const NODE_SNAPSHOTS_FILE: &str = "node_snapshots.csv";

const TICK_STATS_HEADER: [&str; 10] = [
    "tick", "scenario", "safe", "infected", "recovering", "vulnerable", "patched", "firewall",
    "agents", "edges",
];

const NODE_SNAPSHOTS_HEADER: [&str; 6] = ["tick", "node_id", "x", "y", "status", "pressure"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    stats:    Writer<File>,
    nodes:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (truncating) both CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut stats = Writer::from_path(dir.join(TICK_STATS_FILE))?;
        stats.write_record(TICK_STATS_HEADER)?;

        let mut nodes = Writer::from_path(dir.join(NODE_SNAPSHOTS_FILE))?;
        nodes.write_record(NODE_SNAPSHOTS_HEADER)?;

        Ok(Self { stats, nodes, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()> {
        self.stats.write_record(&[
            row.tick.to_string(),
            row.scenario.to_owned(),
            row.safe.to_string(),
            row.infected.to_string(),
            row.recovering.to_string(),
            row.vulnerable.to_string(),
            row.patched.to_string(),
            row.firewall.to_string(),
            row.agents.to_string(),
            row.edges.to_string(),
        ])?;
        Ok(())
    }

    fn write_node_snapshots(&mut self, rows: &[NodeSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.nodes.write_record(&[
                row.tick.to_string(),
                row.node_id.to_string(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.status.to_owned(),
                format!("{:.2}", row.pressure),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stats.flush()?;
        self.nodes.flush()?;
        Ok(())
    }
}
