use rand::Rng;
use tracing::debug;

use crate::{Cell, ConfigResult, Grid, Pos, WatorConfig};

/// The current generation plus the buffer the next one is written into.
///
/// Owned by the caller and passed by reference into each tick.
#[derive(Clone, Debug)]
pub struct WorldState {
    current: Grid,
    next: Grid,
}

impl WorldState {
    /// An empty world.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
        }
    }

    /// Validate `config` and place its fish and sharks at distinct random cells.
    ///
    /// Placement retries on collision. Fish are placed first, each with the full
    /// breed timer; sharks get full breed and starve timers.
    pub fn seeded(config: &WatorConfig, rng: &mut impl Rng) -> ConfigResult<Self> {
        config.validate()?;

        let mut world = Self::new(config.grid_width, config.grid_height);
        let fish = Cell::fish(config.fish_breed_ticks);
        let shark = Cell::shark(config.shark_breed_ticks, config.shark_starve_ticks);

        for (cell, count) in [
            (fish, config.initial_fish_count),
            (shark, config.initial_shark_count),
        ] {
            let mut placed = 0;
            while placed < count {
                let pos = Pos::new(
                    rng.gen_range(0..config.grid_width),
                    rng.gen_range(0..config.grid_height),
                );
                if world.current.get(pos).is_empty() {
                    world.current.set(pos, cell);
                    placed += 1;
                }
            }
        }

        debug!(
            width = config.grid_width,
            height = config.grid_height,
            fish = config.initial_fish_count,
            sharks = config.initial_shark_count,
            "seeded world"
        );

        Ok(world)
    }

    pub const fn width(&self) -> usize {
        self.current.width()
    }

    pub const fn height(&self) -> usize {
        self.current.height()
    }

    /// Read-only view of the current generation.
    pub const fn current(&self) -> &Grid {
        &self.current
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.current.get(pos)
    }

    /// Overwrite a cell of the current generation (scenario setup).
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.current.set(pos, cell);
    }

    /// Write a cell of the next generation.
    #[inline]
    pub fn set_next(&mut self, pos: Pos, cell: Cell) {
        self.next.set(pos, cell);
    }

    /// Make the next generation current and clear the buffer.
    pub fn swap(&mut self) {
        core::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }
}
