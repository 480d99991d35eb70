//! `bn-agent` — mobile entities for the `bionet` scenarios.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`population`]   | `Agent` trait, `Population<A>`, `Reconciled`              |
//! | [`motion`]       | `step_toward` — fixed-speed straight-line movement        |
//! | [`patrol`]       | `PatrolAgent`, `PatrolState` (hunter-killer)              |
//! | [`wanderer`]     | `Wanderer`, `WandererState` (quarantine)                  |
//! | [`packet`]       | `Packet`, `PacketKind` (patch propagation)                |
//!
//! Agents here only carry state and state transitions; the rules that read
//! graphs or grids live with the scenarios in `bn-sim`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod motion;
pub mod packet;
pub mod patrol;
pub mod population;
pub mod wanderer;


pub use motion::step_toward;
pub use packet::{Packet, PacketKind};
pub use patrol::{PatrolAgent, PatrolState};
pub use population::{Agent, Population, Reconciled};
pub use wanderer::{Wanderer, WandererState};
