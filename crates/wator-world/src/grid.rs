use crate::{Cell, Pos};

/// A fixed-size toroidal array of cells, stored row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    const fn index(&self, pos: Pos) -> usize {
        debug_assert!(pos.x < self.width && pos.y < self.height);
        pos.y * self.width + pos.x
    }

    /// The cell at `pos`, which must already be wrapped into the grid.
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Every cell with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Pos::new(i % width, i / width), cell))
    }

    pub fn population(&self) -> Population {
        self.cells
            .iter()
            .fold(Population::default(), |mut census, cell| {
                match cell {
                    Cell::Empty => census.empty += 1,
                    Cell::Fish { .. } => census.fish += 1,
                    Cell::Shark { .. } => census.sharks += 1,
                }
                census
            })
    }
}

/// Census of a grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Population {
    pub fish: usize,
    pub sharks: usize,
    pub empty: usize,
}

impl Population {
    pub const fn total(self) -> usize {
        self.fish + self.sharks + self.empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(5, 3);
        assert_eq!(
            grid.population(),
            Population {
                fish: 0,
                sharks: 0,
                empty: 15
            }
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(5, 3);
        grid.set(Pos::new(4, 2), Cell::fish(3));
        grid.set(Pos::new(0, 1), Cell::shark(8, 3));

        assert_eq!(grid.get(Pos::new(4, 2)), Cell::fish(3));
        assert_eq!(grid.get(Pos::new(0, 1)), Cell::shark(8, 3));
        assert_eq!(grid.get(Pos::new(1, 1)), Cell::Empty);

        let census = grid.population();
        assert_eq!((census.fish, census.sharks, census.total()), (1, 1, 15));
    }

    #[test]
    fn test_iter_reports_positions() {
        let mut grid = Grid::new(3, 2);
        grid.set(Pos::new(2, 1), Cell::fish(1));

        let occupied: Vec<_> = grid.iter().filter(|(_, cell)| !cell.is_empty()).collect();
        assert_eq!(occupied, vec![(Pos::new(2, 1), Cell::fish(1))]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut grid = Grid::new(2, 2);
        grid.set(Pos::new(1, 1), Cell::shark(1, 1));
        grid.clear();
        assert_eq!(grid.population().empty, 4);
    }
}
