//! One lock per tile, acquired singly or in pairs in global id order.

use parking_lot::{Mutex, MutexGuard};

use crate::TileId;

/// Per-tile mutexes guarding per-tile data `T`.
///
/// All pairwise locking goes through [`TileLocks::acquire_two`], which orders
/// the two locks by [`TileId`]. There is no other way to hold two tiles.
pub struct TileLocks<T> {
    slots: Vec<Mutex<T>>,
}

impl<T> TileLocks<T> {
    /// Create `count` slots, initializing each from its id.
    pub fn from_fn(count: usize, mut init: impl FnMut(TileId) -> T) -> Self {
        Self {
            slots: (0..count).map(|i| Mutex::new(init(TileId(i as u32)))).collect(),
        }
    }

    /// Lock a single tile.
    pub fn acquire_one(&self, id: TileId) -> TileGuard<'_, T> {
        TileGuard {
            second: None,
            first: (id, self.slots[id.index()].lock()),
        }
    }

    /// Lock two tiles, smaller id first. Equal ids lock once.
    pub fn acquire_two(&self, a: TileId, b: TileId) -> TileGuard<'_, T> {
        if a == b {
            return self.acquire_one(a);
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let first = (low, self.slots[low.index()].lock());
        let second = (high, self.slots[high.index()].lock());

        TileGuard {
            second: Some(second),
            first,
        }
    }

    /// Exclusive access without locking; `&mut self` proves no worker is running.
    pub fn get_mut(&mut self, id: TileId) -> &mut T {
        self.slots[id.index()].get_mut()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TileId, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| (TileId(i as u32), slot.get_mut()))
    }
}

/// Locks held on one or two tiles.
///
/// Dropping the guard releases them in reverse acquisition order.
#[must_use = "the tiles are unlocked as soon as the guard is dropped"]
pub struct TileGuard<'a, T> {
    // field order is drop order: the later lock goes first
    second: Option<(TileId, MutexGuard<'a, T>)>,
    first: (TileId, MutexGuard<'a, T>),
}

impl<T> TileGuard<'_, T> {
    /// Shared access to a held tile.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not held by this guard.
    pub fn get(&self, id: TileId) -> &T {
        if self.first.0 == id {
            return &self.first.1;
        }
        match &self.second {
            Some((held, guard)) if *held == id => guard,
            _ => panic!("tile {id:?} is not held by this guard"),
        }
    }

    /// Exclusive access to a held tile.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not held by this guard.
    pub fn get_mut(&mut self, id: TileId) -> &mut T {
        if self.first.0 == id {
            return &mut self.first.1;
        }
        match &mut self.second {
            Some((held, guard)) if *held == id => guard,
            _ => panic!("tile {id:?} is not held by this guard"),
        }
    }

    /// Release the held tiles.
    pub fn release(self) {}
}
