//! Compares the three sweep strategies on the same problem.
//!
//! ```bash
//! cargo bench --bench strategies
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

use jacobi_laplace::{Solver, SolverConfig, Strategy};

const SWEEPS: usize = 50;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("jacobi_sweeps");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    for size in [128, 512] {
        let config = SolverConfig::default()
            .with_size(size, size)
            .with_tolerance(0.0)
            .with_iteration_max(SWEEPS);

        group.throughput(criterion::Throughput::Elements((size * size * SWEEPS) as u64));

        for strategy in [Strategy::Single, Strategy::Barrier, Strategy::Rayon] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &config,
                |b, config| {
                    b.iter(|| {
                        let mut solver = Solver::new(config.clone()).expect("valid config");
                        black_box(solver.solve(strategy, |_| {}).expect("solve succeeds"))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
