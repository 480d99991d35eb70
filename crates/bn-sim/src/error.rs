use bn_core::BnError;
use bn_graph::GraphError;
use thiserror::Error;

/// Construction-time failures.  Ticking, reconciliation and interaction
/// never fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error("topology construction failed: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] BnError),
}

pub type SimResult<T> = Result<T, SimError>;
