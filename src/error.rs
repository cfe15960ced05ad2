//! Error types for the Jacobi solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SolverError>;
