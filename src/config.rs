use std::num::NonZeroUsize;
use std::thread;

use crate::error::{Result, SolverError};
use crate::grid::{M, N};

pub const TOLERANCE: f64 = 1.0e-6; // convergence threshold on the max change
pub const ITER_MAX: usize = 1000; // iteration cap
pub const PROGRESS_INTERVAL: usize = 100; // iterations between progress lines

/// Solver parameters. The binary only ever uses `SolverConfig::default()`.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub rows: usize,
    pub cols: usize,
    pub tolerance: f64,
    pub iteration_max: usize,
    pub progress_interval: usize,
    pub workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            rows: N,
            cols: M,
            tolerance: TOLERANCE,
            iteration_max: ITER_MAX,
            progress_interval: PROGRESS_INTERVAL,
            workers: available_workers(),
        }
    }
}

impl SolverConfig {
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_iteration_max(mut self, iteration_max: usize) -> Self {
        self.iteration_max = iteration_max;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SolverError::InvalidConfig(format!(
                "grid must be non-empty, got {} x {}",
                self.rows, self.cols
            )));
        }
        if self.workers == 0 {
            return Err(SolverError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(SolverError::InvalidConfig(
                "progress interval must be at least 1".to_string(),
            ));
        }
        if self.tolerance.is_nan() {
            return Err(SolverError::InvalidConfig(
                "tolerance must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

/// Number of hardware threads, falling back to 1 when it cannot be queried.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
