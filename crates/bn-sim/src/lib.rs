//! `bn-sim` — scenario orchestration for the `bionet` engine.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`controller`]    | `ScenarioController` — lifecycle, controls, tick loop      |
//! | [`scenario`]      | `Scenario` trait, `ScenarioKind`, the three scenarios      |
//! | [`spread`]        | Graph, grid and packet contagion rules                     |
//! | [`interaction`]   | Pointer hit-testing, `InteractionOutcome`                  |
//! | [`snapshot`]      | `Snapshot` views and `ScenarioStats`                       |
//! | [`observer`]      | `SimObserver`, `NoopObserver`                              |
//! | [`error`]         | `SimError`, `SimResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the layout repulsion pass on Rayon's thread pool. |
//! | `serde`    | Serializes snapshots/stats, deserializes parameters.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bn_core::{SimConfig, Vec2};
//! use bn_sim::{NoopObserver, ScenarioController, ScenarioKind};
//!
//! let mut ctl = ScenarioController::new(SimConfig::default())?;
//! ctl.start(ScenarioKind::HunterKiller)?;
//! ctl.run_ticks(600, &mut NoopObserver);
//! ctl.interact(Vec2::new(400.0, 300.0));
//! println!("{:?}", ctl.stats());
//! ```

pub mod controller;
pub mod error;
pub mod interaction;
pub mod observer;
pub mod scenario;
pub mod snapshot;
pub mod spread;

#[cfg(test)]
mod tests;

pub use controller::{ScenarioController, SWARM_SIZE};
pub use error::{SimError, SimResult};
pub use interaction::InteractionOutcome;
pub use observer::{NoopObserver, SimObserver};
pub use scenario::{
    build_scenario, HunterKiller, HunterKillerParams, Propagation, PropagationParams, Quarantine,
    QuarantineParams, Scenario, ScenarioKind, TickContext,
};
pub use snapshot::{AgentView, EdgeView, GridView, NodeView, ScenarioStats, Snapshot};
