//! The `Scenario` phase trait and its three implementations.
//!
//! A scenario owns all of its state (topology or grid, agents, parameters).
//! The controller drives it through the phases in fixed order:
//!
//! ```text
//! layout → spread → agents → commit
//! ```
//!
//! and calls [`Scenario::interact`] only between ticks.

mod hunter_killer;
mod propagation;
mod quarantine;

pub use hunter_killer::{HunterKiller, HunterKillerParams};
pub use propagation::{Propagation, PropagationParams};
pub use quarantine::{Quarantine, QuarantineParams};

use std::str::FromStr;

use bn_agent::Reconciled;
use bn_core::{Bounds, Controls, SimConfig, SimRng, Tick, Vec2};

use crate::{InteractionOutcome, ScenarioStats, SimError, SimResult, Snapshot};

// ── ScenarioKind ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScenarioKind {
    HunterKiller,
    Quarantine,
    Propagation,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] =
        [ScenarioKind::HunterKiller, ScenarioKind::Quarantine, ScenarioKind::Propagation];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::HunterKiller => "hunter-killer",
            ScenarioKind::Quarantine   => "quarantine",
            ScenarioKind::Propagation  => "propagation",
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SimError::Config(format!("unknown scenario `{s}`")))
    }
}

// ── TickContext ───────────────────────────────────────────────────────────────

/// Per-tick inputs handed to the stochastic phases.
pub struct TickContext<'a> {
    pub tick:     Tick,
    pub controls: &'a Controls,
    pub rng:      &'a mut SimRng,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// One simulation scenario, driven phase by phase.
pub trait Scenario {
    fn kind(&self) -> ScenarioKind;

    /// Playable area; interaction outside it is ignored.
    fn bounds(&self) -> Bounds;

    /// Resize the agent population toward `target`, keeping existing agents.
    fn reconcile_population(&mut self, target: u32, rng: &mut SimRng) -> Reconciled;

    /// Relax node positions.  Scenarios without a layout keep the default.
    fn layout(&mut self) {}

    fn spread(&mut self, ctx: &mut TickContext<'_>);

    fn agents(&mut self, ctx: &mut TickContext<'_>);

    /// Promote buffered state.  Only the grid scenario buffers.
    fn commit(&mut self) {}

    /// Apply a pointer interaction at `p` (already known to be in bounds).
    fn interact(&mut self, p: Vec2, severing: bool) -> InteractionOutcome;

    fn snapshot(&self, tick: Tick) -> Snapshot;

    fn stats(&self, tick: Tick) -> ScenarioStats;

    fn agent_count(&self) -> usize;
}

/// Build the scenario `kind` with its default parameters.
pub fn build_scenario(
    kind:   ScenarioKind,
    config: &SimConfig,
    rng:    &mut SimRng,
) -> SimResult<Box<dyn Scenario>> {
    config.validate()?;
    let bounds = Bounds::from_size(config.width, config.height);
    Ok(match kind {
        ScenarioKind::HunterKiller => {
            Box::new(HunterKiller::generate(HunterKillerParams::default(), bounds, rng)?)
        }
        ScenarioKind::Quarantine => {
            Box::new(Quarantine::generate(QuarantineParams::default(), bounds)?)
        }
        ScenarioKind::Propagation => {
            Box::new(Propagation::generate(PropagationParams::default(), bounds, rng)?)
        }
    })
}
