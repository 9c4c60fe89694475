//! Near-square tile layout covering a grid exactly once.

use tracing::debug;

/// Index of a tile in the global lock order.
///
/// Computed as `col * tile_rows + row`. Pairwise acquisition always locks the
/// smaller id first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A rectangular region `[start_x, end_x) × [start_y, end_y)` owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub col: usize,
    pub row: usize,
    pub start_x: usize,
    pub end_x: usize,
    pub start_y: usize,
    pub end_y: usize,
}

impl Tile {
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end_x - self.start_x
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.end_y - self.start_y
    }

    /// Number of cells covered by this tile.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.area() == 0
    }

    #[must_use]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.start_x && x < self.end_x && y >= self.start_y && y < self.end_y
    }

    /// Offset of `(x, y)` inside this tile, column-major to match [`Tile::cells`].
    ///
    /// The coordinate must lie inside the tile.
    #[inline]
    #[must_use]
    pub const fn local_index(&self, x: usize, y: usize) -> usize {
        (x - self.start_x) * self.height() + (y - self.start_y)
    }

    /// All coordinates in the tile, `x` outer and `y` inner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.start_x..self.end_x).flat_map(move |x| (self.start_y..self.end_y).map(move |y| (x, y)))
    }
}

/// Partition of a `width × height` grid into `tile_cols × tile_rows` tiles.
///
/// The layout is a pure function of its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayout {
    width: usize,
    height: usize,
    tile_cols: usize,
    tile_rows: usize,
    tile_width: usize,
    tile_height: usize,
    /// Every slot in id order, including zero-area ones at the far edges.
    slots: Vec<Tile>,
}

impl TileLayout {
    /// Build the layout for `workers` workers.
    ///
    /// `tile_cols = max(1, floor(sqrt(workers)))`, `tile_rows = ceil(workers / tile_cols)`.
    /// Tiles on the last column or row are cut to the grid bounds.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: usize, height: usize, workers: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must have a non-zero area");

        let workers = workers.max(1);
        let tile_cols = workers.isqrt().max(1);
        let tile_rows = workers.div_ceil(tile_cols).max(1);

        let tile_width = width.div_ceil(tile_cols);
        let tile_height = height.div_ceil(tile_rows);

        let mut slots = Vec::with_capacity(tile_cols * tile_rows);
        for col in 0..tile_cols {
            for row in 0..tile_rows {
                let start_x = (col * tile_width).min(width);
                let end_x = (start_x + tile_width).min(width);
                let start_y = (row * tile_height).min(height);
                let end_y = (start_y + tile_height).min(height);

                slots.push(Tile {
                    id: TileId((col * tile_rows + row) as u32),
                    col,
                    row,
                    start_x,
                    end_x,
                    start_y,
                    end_y,
                });
            }
        }

        let layout = Self {
            width,
            height,
            tile_cols,
            tile_rows,
            tile_width,
            tile_height,
            slots,
        };

        debug!(
            width,
            height,
            workers,
            tile_cols,
            tile_rows,
            tiles = layout.tiles().count(),
            "built tile layout"
        );

        layout
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn tile_cols(&self) -> usize {
        self.tile_cols
    }

    #[must_use]
    pub const fn tile_rows(&self) -> usize {
        self.tile_rows
    }

    /// Number of lock slots, `tile_cols * tile_rows`, zero-area tiles included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The slot with the given id, which may have zero area.
    #[must_use]
    pub fn slot(&self, id: TileId) -> &Tile {
        &self.slots[id.index()]
    }

    /// Tiles that cover at least one cell, in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.slots.iter().filter(|tile| !tile.is_empty())
    }

    /// Id of the tile owning cell `(x, y)`.
    ///
    /// The coordinate must already be wrapped into the grid.
    #[inline]
    #[must_use]
    pub const fn tile_of(&self, x: usize, y: usize) -> TileId {
        let col = x / self.tile_width;
        let row = y / self.tile_height;
        TileId((col * self.tile_rows + row) as u32)
    }
}
