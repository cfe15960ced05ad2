use std::fmt;

use crate::config::SolverConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::implementations::{barrier, rayon_pool, single};

/// How the sweep is executed. All strategies give bit-identical results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Single-threaded reference.
    Single,
    /// Persistent scoped threads synchronised by a `Barrier`.
    Barrier,
    /// Fork-join on a dedicated rayon pool.
    Rayon,
}

/// One progress sample, printed as `iter, error`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub iteration: usize,
    pub error: f64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:5}, {:.6}", self.iteration, self.error)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    pub error: f64,
    pub iteration: usize,
}

impl Default for Convergence {
    fn default() -> Self {
        // error starts above any sensible tolerance so the first sweep runs
        Convergence {
            error: 1.0,
            iteration: 0,
        }
    }
}

impl Convergence {
    pub fn is_running(&self, config: &SolverConfig) -> bool {
        self.error > config.tolerance && self.iteration < config.iteration_max
    }

    /// End-of-iteration bookkeeping, run by exactly one thread.
    pub fn advance<F>(&mut self, sweep_error: f64, interval: usize, progress: &mut F)
    where
        F: FnMut(Progress) + ?Sized,
    {
        self.error = sweep_error;
        if self.iteration % interval == 0 {
            progress(Progress {
                iteration: self.iteration,
                error: self.error,
            });
        }
        self.iteration += 1;
    }
}

/// Owns both grids and the convergence state for one run.
pub struct Solver {
    config: SolverConfig,
    current: Grid,
    next: Grid,
    state: Convergence,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let current = Grid::new(config.rows, config.cols);
        let next = Grid::new(config.rows, config.cols);
        Ok(Solver {
            config,
            current,
            next,
            state: Convergence::default(),
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn next(&self) -> &Grid {
        &self.next
    }

    pub fn state(&self) -> Convergence {
        self.state
    }

    /// Relaxes until `error <= tolerance` or `iteration_max` is reached.
    pub fn solve<F>(&mut self, strategy: Strategy, mut progress: F) -> Result<Convergence>
    where
        F: FnMut(Progress) + Send,
    {
        log::debug!(
            "solving {} x {} with {:?} on {} workers",
            self.config.rows,
            self.config.cols,
            strategy,
            self.config.workers
        );

        match strategy {
            Strategy::Single => single::jacobi_loop(
                &mut self.current,
                &mut self.next,
                &mut self.state,
                &self.config,
                &mut progress,
            ),
            Strategy::Barrier => barrier::barrier_parallel(
                &mut self.current,
                &mut self.next,
                &mut self.state,
                &self.config,
                &mut progress,
            ),
            Strategy::Rayon => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.workers)
                    .build()?;
                rayon_pool::rayon_parallel(
                    &mut self.current,
                    &mut self.next,
                    &mut self.state,
                    &self.config,
                    &pool,
                    &mut progress,
                )
            }
        }

        if self.state.error <= self.config.tolerance {
            log::info!(
                "converged after {} iterations (error {:e})",
                self.state.iteration,
                self.state.error
            );
        } else {
            log::info!(
                "stopped at iteration cap {} (error {:e})",
                self.state.iteration,
                self.state.error
            );
        }
        Ok(self.state)
    }
}
