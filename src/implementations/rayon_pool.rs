use rayon::prelude::*;
use rayon::ThreadPool;

use crate::config::SolverConfig;
use crate::grid::{interior, Grid};
use crate::solver::{Convergence, Progress};
use crate::stencil::{copy_interior, fold_max, max_change, relax_row};

/*
  Rayon fork-join version

  Each phase is one parallel map over the interior rows. Writes go through
  par_chunks_mut, so every task owns the row it writes and no lock is needed;
  the join at the end of a phase is the barrier. Bookkeeping runs on the
  calling thread between sweeps.
*/
pub fn rayon_parallel(
    current: &mut Grid,
    next: &mut Grid,
    state: &mut Convergence,
    config: &SolverConfig,
    pool: &ThreadPool,
    progress: &mut (dyn FnMut(Progress) + Send),
) {
    let cols = current.cols();
    let rows = interior(current.rows());
    // interior rows as one contiguous slice range
    let span = rows.start * cols..rows.end * cols;

    pool.install(|| {
        while state.is_running(config) {
            // update
            {
                let src = &*current;
                next.as_mut_slice()[span.clone()]
                    .par_chunks_mut(cols)
                    .enumerate()
                    .for_each(|(r, dst_row)| {
                        let j = rows.start + r;
                        relax_row(src.row(j - 1), src.row(j), src.row(j + 1), dst_row);
                    });
            }

            // measure
            let err = rows
                .clone()
                .into_par_iter()
                .map(|j| max_change(next.row(j), current.row(j)))
                .reduce(|| 0.0, fold_max);

            // copy-back
            current.as_mut_slice()[span.clone()]
                .par_chunks_mut(cols)
                .zip(next.as_slice()[span.clone()].par_chunks(cols))
                .for_each(|(dst_row, src_row)| copy_interior(dst_row, src_row));

            state.advance(err, config.progress_interval, &mut *progress);
        }
    });
}
