//! Steady-state solution of the 2D Laplace equation by Jacobi relaxation.
//!
//! A [`Solver`] owns the `current`/`next` grids and iterates the 5-point
//! stencil until the largest change per sweep drops below the tolerance or
//! the iteration cap is hit. The sweep can run single-threaded, on a
//! persistent barrier-synchronised worker pool, or on a rayon pool; all
//! three produce bit-identical grids.

pub mod config;
pub mod error;
pub mod grid;
pub mod implementations;
pub mod solver;
pub mod stencil;
pub mod timer;

pub use config::SolverConfig;
pub use error::{Result, SolverError};
pub use grid::Grid;
pub use solver::{Convergence, Progress, Solver, Strategy};
