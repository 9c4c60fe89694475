//! Per-cell fish and shark rules.
//!
//! Every agent reads the current generation and claims cells of the next one.
//! Any check-then-write on a destination happens under the locks of both the
//! source and destination tiles, so exactly one agent wins each cell
//! (first claim wins).

use rand::Rng;
use rand::seq::SliceRandom;
use wator_spatial::{Tile, TileGuard, TileId, TileLayout, TileLocks};
use wator_world::{BreedRules, Cell, Direction, Grid, Pos};

use crate::shard::TileShard;

/// A timer after one tick: the clamped value and whether it ran out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Countdown {
    remaining: u32,
    expired: bool,
}

impl Countdown {
    const fn tick(timer: u32) -> Self {
        Self {
            remaining: timer.saturating_sub(1),
            expired: timer <= 1,
        }
    }
}

/// What a single agent did during a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to an empty neighbor.
    Moved,
    /// Moved and left a newborn behind.
    Bred,
    /// A shark moved onto a fish.
    Ate { bred: bool },
    /// Kept its cell.
    Stayed,
    /// Wanted to stay but its cell was already claimed.
    Crowded,
    /// A shark ran out of food.
    Starved,
    /// A fish was eaten before it could act.
    Eaten,
}

/// Counts of agent outcomes, merged across workers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: usize,
    pub born: usize,
    pub stayed: usize,
    pub crowded: usize,
    pub fish_eaten: usize,
    pub starved: usize,
}

impl TickReport {
    pub fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Moved => self.moved += 1,
            StepOutcome::Bred => {
                self.moved += 1;
                self.born += 1;
            }
            StepOutcome::Ate { bred } => {
                self.moved += 1;
                self.fish_eaten += 1;
                if bred {
                    self.born += 1;
                }
            }
            StepOutcome::Stayed => self.stayed += 1,
            StepOutcome::Crowded => self.crowded += 1,
            StepOutcome::Starved => self.starved += 1,
            // counted on the shark's side
            StepOutcome::Eaten => {}
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.moved += other.moved;
        self.born += other.born;
        self.stayed += other.stayed;
        self.crowded += other.crowded;
        self.fish_eaten += other.fish_eaten;
        self.starved += other.starved;
    }
}

/// A source cell and a neighbor, with the tiles owning each.
#[derive(Copy, Clone, Debug)]
struct Step {
    src: Pos,
    src_tile: TileId,
    dst: Pos,
    dst_tile: TileId,
}

/// The fish and shark rules, shared by all workers of one tick.
pub struct AgentStepEngine<'a> {
    current: &'a Grid,
    layout: &'a TileLayout,
    shards: &'a TileLocks<TileShard>,
    rules: BreedRules,
}

impl<'a> AgentStepEngine<'a> {
    pub fn new(
        current: &'a Grid,
        layout: &'a TileLayout,
        shards: &'a TileLocks<TileShard>,
        rules: BreedRules,
    ) -> Self {
        Self {
            current,
            layout,
            shards,
            rules,
        }
    }

    /// Step every occupied cell of `tile`, `x` outer and `y` inner.
    pub fn step_tile(&self, tile: &Tile, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();

        for (x, y) in tile.cells() {
            let pos = Pos::new(x, y);
            if let Some(outcome) = self.step_cell(pos, rng) {
                report.record(outcome);
            }
        }

        report
    }

    /// Step the agent at `pos`, if any.
    pub fn step_cell(&self, pos: Pos, rng: &mut impl Rng) -> Option<StepOutcome> {
        match self.current.get(pos) {
            Cell::Empty => None,
            Cell::Fish { breed } => Some(self.step_fish(pos, breed, rng)),
            Cell::Shark { breed, starve } => Some(self.step_shark(pos, breed, starve, rng)),
        }
    }

    #[inline]
    fn tile_of(&self, pos: Pos) -> TileId {
        self.layout.tile_of(pos.x, pos.y)
    }

    /// The four neighbors of `src` in a fresh random order.
    fn shuffled_steps(&self, src: Pos, rng: &mut impl Rng) -> [Step; 4] {
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);

        let src_tile = self.tile_of(src);
        dirs.map(|dir| {
            let dst = src.step(dir, self.current.width(), self.current.height());
            Step {
                src,
                src_tile,
                dst,
                dst_tile: self.tile_of(dst),
            }
        })
    }

    fn observe(&self, guard: &TileGuard<'_, TileShard>, tile: TileId, pos: Pos) -> Cell {
        guard.get(tile).observe(self.current, pos)
    }

    /// Empty in the current generation and unclaimed in the next.
    fn is_vacant(&self, guard: &TileGuard<'_, TileShard>, tile: TileId, pos: Pos) -> bool {
        self.observe(guard, tile, pos).is_empty() && guard.get(tile).is_free(pos)
    }

    /// Claim `step.dst` for the mover. On an expired breed timer the mover's
    /// breed timer resets and a newborn takes the source cell, if still free.
    fn relocate(
        guard: &mut TileGuard<'_, TileShard>,
        step: Step,
        breed: Countdown,
        reset_breed: u32,
        mover: impl Fn(u32) -> Cell,
        newborn: Cell,
    ) -> bool {
        let mut born = false;

        if breed.expired {
            let src = guard.get_mut(step.src_tile);
            if src.is_free(step.src) {
                src.claim(step.src, newborn);
                born = true;
            }
            guard.get_mut(step.dst_tile).claim(step.dst, mover(reset_breed));
        } else {
            guard
                .get_mut(step.dst_tile)
                .claim(step.dst, mover(breed.remaining));
        }

        born
    }

    fn step_fish(&self, src: Pos, breed: u32, rng: &mut impl Rng) -> StepOutcome {
        let breed = Countdown::tick(breed);
        let fish_breed = self.rules.fish_breed;

        for step in self.shuffled_steps(src, rng) {
            let mut guard = self.shards.acquire_two(step.src_tile, step.dst_tile);

            if guard.get(step.src_tile).is_eaten(src) {
                return StepOutcome::Eaten;
            }
            if !self.is_vacant(&guard, step.dst_tile, step.dst) {
                continue;
            }

            let born = Self::relocate(
                &mut guard,
                step,
                breed,
                fish_breed,
                Cell::fish,
                Cell::fish(fish_breed),
            );
            return if born {
                StepOutcome::Bred
            } else {
                StepOutcome::Moved
            };
        }

        let src_tile = self.tile_of(src);
        let mut guard = self.shards.acquire_one(src_tile);
        let shard = guard.get_mut(src_tile);

        if shard.is_eaten(src) {
            StepOutcome::Eaten
        } else if shard.is_free(src) {
            shard.claim(src, Cell::fish(breed.remaining));
            StepOutcome::Stayed
        } else {
            StepOutcome::Crowded
        }
    }

    fn step_shark(&self, src: Pos, breed: u32, starve: u32, rng: &mut impl Rng) -> StepOutcome {
        let breed = Countdown::tick(breed);
        let starve = Countdown::tick(starve);
        let BreedRules {
            shark_breed,
            shark_starve,
            ..
        } = self.rules;
        let newborn = Cell::shark(shark_breed, shark_starve);
        let steps = self.shuffled_steps(src, rng);

        // Eat first. The fish leaves the current generation under the same
        // locks, so no other shark can eat it too.
        for step in steps {
            let mut guard = self.shards.acquire_two(step.src_tile, step.dst_tile);

            let prey = self.observe(&guard, step.dst_tile, step.dst);
            if !prey.is_fish() || !guard.get(step.dst_tile).is_free(step.dst) {
                continue;
            }

            guard.get_mut(step.dst_tile).mark_eaten(step.dst);
            let bred = Self::relocate(
                &mut guard,
                step,
                breed,
                shark_breed,
                |b| Cell::shark(b, shark_starve),
                newborn,
            );
            return StepOutcome::Ate { bred };
        }

        // Then the first vacant neighbor. Finding one while starved ends the scan.
        for step in steps {
            let mut guard = self.shards.acquire_two(step.src_tile, step.dst_tile);

            if !self.is_vacant(&guard, step.dst_tile, step.dst) {
                continue;
            }
            if starve.expired {
                return StepOutcome::Starved;
            }

            let born = Self::relocate(
                &mut guard,
                step,
                breed,
                shark_breed,
                |b| Cell::shark(b, starve.remaining),
                newborn,
            );
            return if born {
                StepOutcome::Bred
            } else {
                StepOutcome::Moved
            };
        }

        if starve.expired {
            return StepOutcome::Starved;
        }

        let src_tile = self.tile_of(src);
        let mut guard = self.shards.acquire_one(src_tile);
        let shard = guard.get_mut(src_tile);

        if shard.is_free(src) {
            shard.claim(src, Cell::shark(breed.remaining, starve.remaining));
            StepOutcome::Stayed
        } else {
            StepOutcome::Crowded
        }
    }
}
