//! Tile-parallel tick execution for Wa-Tor.
//!
//! # Tick Execution Model
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Phase 1: Clear every tile's write buffer                   │
//! │  Phase 2: One task per tile steps its fish and sharks       │
//! │           (reads generation N, claims cells of N+1 under    │
//! │            the source and destination tile locks)           │
//! │  Phase 3: Barrier                                           │
//! │  Phase 4: Publish the tile buffers and swap generations     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The only write to generation N during a tick is a shark eating a fish,
//! which happens under the same tile locks as the shark's move.

pub mod bench;
mod coordinator;
mod engine;
mod error;
mod shard;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wator_world::{Population, WatorConfig, WorldState};

pub use coordinator::TickCoordinator;
pub use engine::{StepOutcome, TickReport};
pub use error::{TickError, TickResult};

/// A seeded world together with the coordinator that advances it.
pub struct Simulation {
    world: WorldState,
    coordinator: TickCoordinator,
}

impl Simulation {
    /// Validate `config`, place the initial population and start the worker pool.
    ///
    /// Placement and movement order draw from one generator, seeded from
    /// `config.seed` when set.
    pub fn new(config: &WatorConfig) -> TickResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let world = WorldState::seeded(config, &mut rng)?;
        let coordinator = TickCoordinator::new(config, rng)?;

        Ok(Self { world, coordinator })
    }

    pub fn advance_one_tick(&mut self) -> TickReport {
        self.coordinator.advance_one_tick(&mut self.world)
    }

    /// Read-only view between ticks.
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn population(&self) -> Population {
        self.world.current().population()
    }

    pub const fn tick(&self) -> u64 {
        self.coordinator.tick()
    }
}
