use crate::config::SolverConfig;
use crate::grid::{interior, Grid};
use crate::solver::{Convergence, Progress};
use crate::stencil::{copy_interior, fold_max, max_change, relax_row};

// Single-threaded reference: the parallel strategies are checked against it.
pub fn jacobi_loop(
    current: &mut Grid,
    next: &mut Grid,
    state: &mut Convergence,
    config: &SolverConfig,
    progress: &mut (dyn FnMut(Progress) + Send),
) {
    let rows = interior(current.rows());

    while state.is_running(config) {
        for j in rows.clone() {
            relax_row(current.row(j - 1), current.row(j), current.row(j + 1), next.row_mut(j));
        }

        let mut err = 0.0;
        for j in rows.clone() {
            err = fold_max(err, max_change(next.row(j), current.row(j)));
        }

        for j in rows.clone() {
            copy_interior(current.row_mut(j), next.row(j));
        }

        state.advance(err, config.progress_interval, &mut *progress);
    }
}
