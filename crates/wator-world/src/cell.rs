/// One grid position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Fish {
        breed: u32,
    },
    Shark {
        breed: u32,
        starve: u32,
    },
}

impl Cell {
    pub const fn fish(breed: u32) -> Self {
        Self::Fish { breed }
    }

    pub const fn shark(breed: u32, starve: u32) -> Self {
        Self::Shark { breed, starve }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_fish(self) -> bool {
        matches!(self, Self::Fish { .. })
    }
}
