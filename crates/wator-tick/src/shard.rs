//! Per-tile slice of the write buffer.

use wator_spatial::Tile;
use wator_world::{Cell, Grid, Pos, WorldState};

/// The part of the next generation owned by one tile, plus the fish of the
/// current generation that were eaten this tick.
///
/// Only reachable through the tile's lock while workers run.
pub struct TileShard {
    tile: Tile,
    next: Vec<Cell>,
    eaten: Vec<bool>,
}

impl TileShard {
    pub fn new(tile: Tile) -> Self {
        Self {
            tile,
            next: vec![Cell::Empty; tile.area()],
            eaten: vec![false; tile.area()],
        }
    }

    #[inline]
    fn local(&self, pos: Pos) -> usize {
        debug_assert!(self.tile.contains(pos.x, pos.y), "{pos:?} outside {:?}", self.tile);
        self.tile.local_index(pos.x, pos.y)
    }

    /// Empty the buffer and forget eaten fish.
    pub fn reset(&mut self) {
        self.next.fill(Cell::Empty);
        self.eaten.fill(false);
    }

    /// Whether no agent has claimed `pos` in the next generation yet.
    #[inline]
    pub fn is_free(&self, pos: Pos) -> bool {
        self.next[self.local(pos)].is_empty()
    }

    /// The cell claimed at `pos` so far, empty if none.
    #[inline]
    pub fn peek(&self, pos: Pos) -> Cell {
        self.next[self.local(pos)]
    }

    #[inline]
    pub fn claim(&mut self, pos: Pos, cell: Cell) {
        let local = self.local(pos);
        self.next[local] = cell;
    }

    /// Remove the fish at `pos` from the current generation.
    #[inline]
    pub fn mark_eaten(&mut self, pos: Pos) {
        let local = self.local(pos);
        self.eaten[local] = true;
    }

    #[inline]
    pub fn is_eaten(&self, pos: Pos) -> bool {
        self.eaten[self.local(pos)]
    }

    /// The current generation at `pos` with this tick's removals applied.
    #[inline]
    pub fn observe(&self, current: &Grid, pos: Pos) -> Cell {
        if self.is_eaten(pos) {
            Cell::Empty
        } else {
            current.get(pos)
        }
    }

    /// Copy the claimed cells into the world's write buffer.
    pub fn publish(&self, world: &mut WorldState) {
        for (x, y) in self.tile.cells() {
            let pos = Pos::new(x, y);
            world.set_next(pos, self.peek(pos));
        }
    }
}
