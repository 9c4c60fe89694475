//! Tile Partitioning
//!
//! Divides a fixed grid into a near-square arrangement of rectangular tiles,
//! one per worker, and guards each tile with its own lock.
//!
//! Workers touch at most two tiles at once (their own and the tile owning a
//! neighboring cell). Every pair is locked in ascending [`TileId`] order, so
//! no two workers can each hold the lock the other is waiting for.
//!
//! ```text
//!   tileCols = 2, tileRows = 3  (W = 6)
//!
//!        col 0     col 1
//!      ┌────────┬────────┐
//! row 0│ id 0   │ id 3   │
//!      ├────────┼────────┤
//! row 1│ id 1   │ id 4   │
//!      ├────────┼────────┤
//! row 2│ id 2   │ id 5   │
//!      └────────┴────────┘
//! ```

pub mod layout;
pub mod locks;

pub use layout::{Tile, TileId, TileLayout};
pub use locks::{TileGuard, TileLocks};
