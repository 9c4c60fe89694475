//! Wa-Tor runner
//!
//! Modes:
//! - `wator-runner bench` - time ticks at 1, 2, 4 and 8 workers from a fixed
//!   seed and print a CSV table
//! - `wator-runner` - advance the simulation at `TARGET_FPS` and log the population
//!
//! The world is configured through `WATOR_*` environment variables (see
//! `WatorConfig::from_env`).

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use tracing::info;
use wator_tick::Simulation;
use wator_tick::bench::{self, BENCH_STEPS, BENCH_WORKERS};
use wator_world::WatorConfig;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wator_runner=info".parse()?)
                .add_directive("wator_tick=info".parse()?),
        )
        .init();

    let config = WatorConfig::from_env()?;

    match std::env::args().nth(1).as_deref() {
        Some("bench") => run_benchmarks(&config),
        _ => run(&config),
    }
}

#[allow(clippy::print_stdout)]
fn run_benchmarks(config: &WatorConfig) -> eyre::Result<()> {
    let steps: u64 = env_setting("WATOR_BENCH_STEPS", BENCH_STEPS)?;

    info!(
        width = config.grid_width,
        height = config.grid_height,
        steps,
        "running benchmarks"
    );

    let rows = bench::run_benchmarks(config, steps, &BENCH_WORKERS)?;

    println!("threads,steps,time_seconds");
    for row in rows {
        println!(
            "{},{},{:.6}",
            row.workers,
            row.steps,
            row.elapsed.as_secs_f64()
        );
    }

    Ok(())
}

fn run(config: &WatorConfig) -> eyre::Result<()> {
    let ticks: u64 = env_setting("WATOR_TICKS", 1000)?;
    let target_fps: f32 = env_setting("TARGET_FPS", 20.0)?;

    let mut simulation = Simulation::new(config)?;

    let census = simulation.population();
    info!(
        fish = census.fish,
        sharks = census.sharks,
        workers = config.effective_workers(),
        "starting simulation"
    );

    let target_delta = Duration::try_from_secs_f32(1.0 / target_fps)
        .map_err(|_| eyre::eyre!("TARGET_FPS {target_fps} is too small"))?;

    while simulation.tick() < ticks {
        let start = Instant::now();

        let report = simulation.advance_one_tick();

        if simulation.tick().is_multiple_of(20) {
            let census = simulation.population();
            info!(
                tick = simulation.tick(),
                fish = census.fish,
                sharks = census.sharks,
                born = report.born,
                eaten = report.fish_eaten,
                starved = report.starved,
                "population"
            );
        }

        // Sleep to maintain target FPS
        let elapsed = start.elapsed();
        if elapsed < target_delta {
            std::thread::sleep(target_delta - elapsed);
        }
    }

    let census = simulation.population();
    info!(
        ticks,
        fish = census.fish,
        sharks = census.sharks,
        "simulation finished"
    );

    Ok(())
}

fn env_setting<T>(var: &str, default: T) -> eyre::Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    parse_setting(var, std::env::var(var).ok(), default)
}

/// Parse a runner setting, falling back to `default` when unset.
///
/// Set values must parse and be strictly positive.
fn parse_setting<T>(var: &str, raw: Option<String>, default: T) -> eyre::Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| eyre::eyre!("invalid value for {var}: {raw:?}"))?;

    match value.partial_cmp(&T::default()) {
        Some(Ordering::Greater) => Ok(value),
        _ => eyre::bail!("{var} must be positive, got {raw:?}"),
    }
}
