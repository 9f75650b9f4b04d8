//! Solver error type.

use thiserror::Error;

/// Errors produced by `tour-solver`.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("delivery graph has no deliveries to tour")]
    NoDeliveries,

    #[error("delivery graph has no route from waypoint {from} to waypoint {to}")]
    MissingRoute { from: usize, to: usize },

    #[error("solver worker exited without reporting a result")]
    WorkerLost,

    #[error("failed to spawn solver worker: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type SolverResult<T> = Result<T, SolverError>;
