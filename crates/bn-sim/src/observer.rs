//! Simulation observer trait for progress reporting and data collection.

use bn_core::Tick;

use crate::{ScenarioStats, Snapshot};

/// Callbacks invoked by [`ScenarioController::tick`][crate::ScenarioController::tick]
/// at key points of the tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: infection printer
///
/// ```rust,ignore
/// struct InfectionPrinter;
///
/// impl SimObserver for InfectionPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &ScenarioStats) {
///         println!("{tick}: {} infected", stats.infected);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each unpaused tick, before the layout phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the commit phase with the post-tick counts.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &ScenarioStats) {}

    /// Called every `SimConfig::snapshot_interval_ticks` ticks with a full
    /// read-only view of the scenario.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &Snapshot) {}

    /// Called once when a running scenario is torn down.
    fn on_teardown(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
