//! `bn-core` — foundational types for the `bionet` simulation engine.
//!
//! This crate is a dependency of every other `bn-*` crate.  It intentionally
//! has no `bn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `AgentId`                                   |
//! | [`geo`]         | `Vec2`, `Bounds`, point-to-segment distance           |
//! | [`time`]        | `Tick`, `SimClock`, `Cadence`                         |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `SimConfig` (start-time), `Controls` (per-tick)       |
//! | [`error`]       | `BnError`, `BnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Controls, SimConfig};
pub use error::{BnError, BnResult};
pub use geo::{Bounds, Vec2};
pub use ids::{AgentId, NodeId};
pub use rng::SimRng;
pub use time::{Cadence, SimClock, Tick};
