//! Fork-join driver for one tick.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};
use wator_spatial::{Tile, TileLayout, TileLocks};
use wator_world::{BreedRules, WatorConfig, WorldState};

use crate::TickResult;
use crate::engine::{AgentStepEngine, TickReport};
use crate::shard::TileShard;

/// Work for one tile, passed by value to its task.
#[derive(Clone, Copy, Debug)]
struct TileTask {
    tile: Tile,
    seed: u64,
}

impl TileTask {
    fn run(self, engine: &AgentStepEngine<'_>) -> TickReport {
        let mut rng = StdRng::seed_from_u64(self.seed);
        engine.step_tile(&self.tile, &mut rng)
    }
}

/// Runs ticks over a fixed tile layout on a pool of `effective_workers()` threads.
///
/// Each non-empty tile becomes one task per tick; a layout can have more tiles
/// than threads. The layout, tile buffers and worker pool are built once and
/// reused for every tick, since the grid size never changes.
pub struct TickCoordinator {
    rules: BreedRules,
    layout: TileLayout,
    shards: TileLocks<TileShard>,
    pool: ThreadPool,
    rng: StdRng,
    tick: u64,
}

impl TickCoordinator {
    /// Build a coordinator for grids of `config`'s size.
    ///
    /// `rng` seeds the per-tile movement order of every tick.
    pub fn new(config: &WatorConfig, rng: StdRng) -> TickResult<Self> {
        config.validate()?;

        let workers = config.effective_workers();
        if workers != config.worker_count {
            warn!(
                requested = config.worker_count,
                workers, "worker count clamped to grid width"
            );
        }

        let layout = TileLayout::new(config.grid_width, config.grid_height, workers);
        let shards = TileLocks::from_fn(layout.slot_count(), |id| TileShard::new(*layout.slot(id)));
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("wator-worker-{i}"))
            .build()?;

        Ok(Self {
            rules: config.rules(),
            layout,
            shards,
            pool,
            rng,
            tick: 0,
        })
    }

    /// Ticks completed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance `world` by one generation.
    ///
    /// # Panics
    ///
    /// Panics if `world` does not have the size this coordinator was built for.
    pub fn advance_one_tick(&mut self, world: &mut WorldState) -> TickReport {
        assert_eq!(
            (world.width(), world.height()),
            (self.layout.width(), self.layout.height()),
            "world size does not match the tile layout"
        );

        // clear buffers
        for (_, shard) in self.shards.iter_mut() {
            shard.reset();
        }

        // dispatch one task per non-empty tile
        let tasks: Vec<TileTask> = self
            .layout
            .tiles()
            .map(|tile| TileTask {
                tile: *tile,
                seed: self.rng.next_u64(),
            })
            .collect();

        let engine = AgentStepEngine::new(world.current(), &self.layout, &self.shards, self.rules);
        let report = Mutex::new(TickReport::default());

        // barrier: the scope returns once every task has finished
        self.pool.scope(|scope| {
            for task in tasks {
                let engine = &engine;
                let report = &report;
                scope.spawn(move |_| {
                    let tile_report = task.run(engine);
                    report.lock().merge(tile_report);
                });
            }
        });
        let report = report.into_inner();

        // swap
        for (_, shard) in self.shards.iter_mut() {
            shard.publish(world);
        }
        world.swap();

        self.tick += 1;
        debug!(tick = self.tick, ?report, "tick complete");

        report
    }
}
