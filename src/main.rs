use jacobi_laplace::timer::Timer;
use jacobi_laplace::{Solver, SolverConfig, Strategy};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // grids are allocated before the timer starts
    let mut solver = Solver::new(SolverConfig::default())?;
    let config = solver.config().clone();

    println!("Number of threads = {}", config.workers);
    println!(
        "Jacobi relaxation Calculation: {} x {} mesh",
        config.rows, config.cols
    );

    let timer = Timer::start();
    solver.solve(Strategy::Barrier, |progress| println!("{progress}"))?;
    let runtime = timer.elapsed_ms();

    println!(" total: {:.6} s", runtime / 1000.0);
    Ok(())
}
