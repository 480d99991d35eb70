//! `bn-output` — diagnostic output writers for the `bionet` engine.
//!
//! | File                 | Rows                                   |
//! |----------------------|----------------------------------------|
//! | `tick_stats.csv`     | one per unpaused tick                  |
//! | `node_snapshots.csv` | one per graph node per observer snapshot |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `bn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! ctl.run_ticks(600, &mut obs);
//! ctl.teardown_with(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{NodeSnapshotRow, TickStatsRow};
pub use writer::OutputWriter;
