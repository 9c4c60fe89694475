//! Scalability benchmark across worker counts.
//!
//! Every run starts from the same seeded world so only the worker count varies.

use std::time::{Duration, Instant};

use tracing::info;
use wator_world::WatorConfig;

use crate::{Simulation, TickResult};

/// Seed shared by every benchmark run.
pub const BENCH_SEED: u64 = 42;

/// Ticks per run.
pub const BENCH_STEPS: u64 = 1000;

/// Worker counts compared by [`run_benchmarks`].
pub const BENCH_WORKERS: [usize; 4] = [1, 2, 4, 8];

/// One row of the benchmark table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchRow {
    pub workers: usize,
    pub steps: u64,
    pub elapsed: Duration,
}

/// Time `steps` ticks with `workers` workers from the fixed-seed initial world.
///
/// World setup is not timed.
pub fn run_single_benchmark(config: &WatorConfig, steps: u64, workers: usize) -> TickResult<Duration> {
    let config = WatorConfig {
        worker_count: workers,
        seed: Some(BENCH_SEED),
        ..config.clone()
    };
    let mut simulation = Simulation::new(&config)?;

    let start = Instant::now();
    for _ in 0..steps {
        simulation.advance_one_tick();
    }
    let elapsed = start.elapsed();

    info!(workers, steps, seconds = elapsed.as_secs_f64(), "benchmark run finished");
    Ok(elapsed)
}

/// Run [`run_single_benchmark`] once per entry of `workers`.
pub fn run_benchmarks(config: &WatorConfig, steps: u64, workers: &[usize]) -> TickResult<Vec<BenchRow>> {
    workers
        .iter()
        .map(|&workers| {
            run_single_benchmark(config, steps, workers).map(|elapsed| BenchRow {
                workers,
                steps,
                elapsed,
            })
        })
        .collect()
}
