//! Engine error type.
//!
//! Sub-crates define their own error enums and wrap `BnError` as one variant
//! via `#[from]`.  Only construction-time problems are errors: once a
//! scenario is running, no input can make a tick fail.

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `bn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BnError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `bn-*` crates.
pub type BnResult<T> = Result<T, BnError>;
