#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Default)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbor one step in `dir` on a `width × height` torus.
    pub const fn step(self, dir: Direction, width: usize, height: usize) -> Self {
        match dir {
            Direction::West => Self::new((self.x + width - 1) % width, self.y),
            Direction::East => Self::new((self.x + 1) % width, self.y),
            Direction::North => Self::new(self.x, (self.y + height - 1) % height),
            Direction::South => Self::new(self.x, (self.y + 1) % height),
        }
    }
}

/// The four orthogonal moves.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];
}
