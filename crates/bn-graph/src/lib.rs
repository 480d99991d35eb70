//! `bn-graph` — graph topology, construction, and force-directed layout.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph`, `Node`, `Edge`, `NodeStatus`                       |
//! | [`builder`] | `TopologyBuilder` — scatter + k-nearest / radius wiring     |
//! | [`layout`]  | `ForceLayout`, `LayoutParams` — repulsion/spring integrator |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Repulsion pass runs on Rayon's thread pool.               |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod builder;
pub mod error;
pub mod graph;
pub mod layout;


pub use builder::TopologyBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node, NodeStatus};
pub use layout::{ForceLayout, LayoutParams};
