use std::mem;
use std::ops::Range;
use std::sync::{Barrier, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::config::SolverConfig;
use crate::grid::{is_interior, Grid};
use crate::solver::{Convergence, Progress};
use crate::stencil::{copy_interior, fold_max, max_change, relax_row};

/*
  Barrier-synchronised worker pool

  - Rows are split into min(workers, rows) contiguous bands, one per worker
    (split_at_mut on both grids), so every write is to memory the worker owns.
  - The rows just outside a band are read from halo buffers (Mutex<Halo>)
    that the owning worker refreshes right after its copy-back.
  - Workers are spawned once and live for the whole solve. Every phase ends
    at the barrier; the barrier leader does the per-iteration bookkeeping.

  Per iteration:
    update      -> wait
    measure     -> wait   (local max combined into sweep_max under a lock)
    copy-back   -> wait   (halos republished; leader does bookkeeping)
    publish     -> wait   (everyone re-reads the loop guard)
*/

struct Halo {
    top: Vec<f64>,
    bottom: Vec<f64>,
}

struct Shared<'a, 'p> {
    barrier: Barrier,
    halos: Vec<Mutex<Halo>>,
    sweep_max: Mutex<f64>,
    state: Mutex<Convergence>,
    progress: Mutex<&'p mut (dyn FnMut(Progress) + Send + 'p)>,
    config: &'a SolverConfig,
}

struct Band<'g> {
    index: usize,
    first_row: usize,
    rows: usize,
    cols: usize,
    current: &'g mut [f64],
    next: &'g mut [f64],
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Splits `rows` into `min(workers, rows)` contiguous bands; the first
/// `rows % bands` bands get one extra row.
pub fn band_ranges(rows: usize, workers: usize) -> Vec<Range<usize>> {
    let bands = workers.min(rows).max(1);
    let (base, extra) = (rows / bands, rows % bands);
    let mut start = 0;
    (0..bands)
        .map(|k| {
            let len = base + usize::from(k < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

pub fn barrier_parallel(
    current: &mut Grid,
    next: &mut Grid,
    state: &mut Convergence,
    config: &SolverConfig,
    progress: &mut (dyn FnMut(Progress) + Send),
) {
    let (rows, cols) = (current.rows(), current.cols());
    let ranges = band_ranges(rows, config.workers);

    log::debug!("{} bands over {} rows", ranges.len(), rows);

    let mut cur_rest = current.as_mut_slice();
    let mut nxt_rest = next.as_mut_slice();
    let mut bands = Vec::with_capacity(ranges.len());
    for (index, range) in ranges.iter().enumerate() {
        let (cur, cur_tail) = mem::take(&mut cur_rest).split_at_mut(range.len() * cols);
        let (nxt, nxt_tail) = mem::take(&mut nxt_rest).split_at_mut(range.len() * cols);
        cur_rest = cur_tail;
        nxt_rest = nxt_tail;
        bands.push(Band {
            index,
            first_row: range.start,
            rows,
            cols,
            current: cur,
            next: nxt,
        });
    }

    let shared = Shared {
        barrier: Barrier::new(bands.len()),
        halos: (0..bands.len())
            .map(|_| {
                Mutex::new(Halo {
                    top: vec![0.0; cols],
                    bottom: vec![0.0; cols],
                })
            })
            .collect(),
        sweep_max: Mutex::new(0.0),
        state: Mutex::new(*state),
        progress: Mutex::new(progress),
        config,
    };

    thread::scope(|scope| {
        for band in bands {
            let shared = &shared;
            scope.spawn(move || band.run(shared));
        }
    });

    *state = *lock(&shared.state);
}

impl Band<'_> {
    fn len(&self) -> usize {
        self.current.len() / self.cols
    }

    fn run(mut self, shared: &Shared<'_, '_>) {
        let mut above = vec![0.0; self.cols];
        let mut below = vec![0.0; self.cols];
        let interval = shared.config.progress_interval;

        self.publish_halo(shared);
        shared.barrier.wait();

        loop {
            if !lock(&shared.state).is_running(shared.config) {
                break;
            }

            // 1. update
            self.load_neighbours(shared, &mut above, &mut below);
            self.relax(&above, &below);
            shared.barrier.wait();

            // 2. measure
            let local = self.max_change();
            {
                let mut sweep_max = lock(&shared.sweep_max);
                *sweep_max = fold_max(*sweep_max, local);
            }
            shared.barrier.wait();

            // 3. copy-back
            self.copy_back();
            self.publish_halo(shared);
            if shared.barrier.wait().is_leader() {
                let sweep_error = mem::take(&mut *lock(&shared.sweep_max));
                let mut progress = lock(&shared.progress);
                lock(&shared.state).advance(sweep_error, interval, &mut **progress);
            }

            // 4. state published
            shared.barrier.wait();
        }
    }

    fn publish_halo(&self, shared: &Shared<'_, '_>) {
        let last = self.len() - 1;
        let mut halo = lock(&shared.halos[self.index]);
        halo.top.copy_from_slice(&self.current[..self.cols]);
        halo.bottom
            .copy_from_slice(&self.current[last * self.cols..(last + 1) * self.cols]);
    }

    fn load_neighbours(&self, shared: &Shared<'_, '_>, above: &mut [f64], below: &mut [f64]) {
        if self.index > 0 {
            above.copy_from_slice(&lock(&shared.halos[self.index - 1]).bottom);
        }
        if self.index + 1 < shared.halos.len() {
            below.copy_from_slice(&lock(&shared.halos[self.index + 1]).top);
        }
    }

    fn relax(&mut self, above: &[f64], below: &[f64]) {
        let (cols, len) = (self.cols, self.len());
        for r in 0..len {
            if !is_interior(self.first_row + r, self.rows) {
                continue;
            }
            let up = if r == 0 {
                above
            } else {
                &self.current[(r - 1) * cols..r * cols]
            };
            let down = if r + 1 == len {
                below
            } else {
                &self.current[(r + 1) * cols..(r + 2) * cols]
            };
            relax_row(
                up,
                &self.current[r * cols..(r + 1) * cols],
                down,
                &mut self.next[r * cols..(r + 1) * cols],
            );
        }
    }

    fn max_change(&self) -> f64 {
        let mut err = 0.0;
        for (r, (nxt, cur)) in self
            .next
            .chunks(self.cols)
            .zip(self.current.chunks(self.cols))
            .enumerate()
        {
            if is_interior(self.first_row + r, self.rows) {
                err = fold_max(err, max_change(nxt, cur));
            }
        }
        err
    }

    fn copy_back(&mut self) {
        for (r, (cur, nxt)) in self
            .current
            .chunks_mut(self.cols)
            .zip(self.next.chunks(self.cols))
            .enumerate()
        {
            if is_interior(self.first_row + r, self.rows) {
                copy_interior(cur, nxt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uneven_split_uses_every_worker() {
        // 4096 rows over 192 workers: 64 bands of 22 rows, 128 of 21
        let ranges = band_ranges(4096, 192);
        assert_eq!(ranges.len(), 192);
        assert_eq!(ranges.iter().filter(|r| r.len() == 22).count(), 64);
        assert_eq!(ranges.iter().filter(|r| r.len() == 21).count(), 128);

        for (rows, workers) in [(37, 5), (37, 8), (10, 3), (4096, 3000)] {
            let ranges = band_ranges(rows, workers);
            assert_eq!(ranges.len(), workers);
            assert_eq!(ranges[0].start, 0);
            assert_eq!(ranges[workers - 1].end, rows);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert!(pair[0].len() - pair[1].len() <= 1);
            }
        }
    }

    #[test]
    fn more_workers_than_rows_gives_one_row_each() {
        let ranges = band_ranges(3, 8);
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn uneven_split_matches_single_band() {
        let config = SolverConfig::default()
            .with_size(11, 9)
            .with_tolerance(0.0)
            .with_iteration_max(20);

        let run = |workers: usize| {
            let config = config.clone().with_workers(workers);
            let mut current = Grid::new(11, 9);
            let mut next = Grid::new(11, 9);
            let mut state = Convergence::default();
            barrier_parallel(&mut current, &mut next, &mut state, &config, &mut |_| {});
            (current, state)
        };

        let (reference, reference_state) = run(1);
        for workers in [3, 4, 7] {
            let (current, state) = run(workers);
            assert_eq!(current, reference);
            assert_eq!(state, reference_state);
        }
    }
}
