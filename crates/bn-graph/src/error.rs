//! Graph-subsystem error type.

use thiserror::Error;

use bn_core::{BnError, NodeId};

/// Errors produced by `bn-graph`.  All of them are construction-time.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {a} – {b} references a node that does not exist")]
    DanglingEdge { a: NodeId, b: NodeId },

    #[error(transparent)]
    Core(#[from] BnError),
}

pub type GraphResult<T> = Result<T, GraphError>;
