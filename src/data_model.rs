pub const BOARD_SIZE: usize = 4;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
/// Largest tile rank the 4-bit feature packing can represent.
pub const MAX_RANK: u8 = 15;
/// Copies of each basic tile (1, 2, 3) in a full bag.
pub const BAG_REFILL: u8 = 1;
pub const BASIC_TILES: [u8; 3] = [1, 2, 3];

pub type Rank = u8;
pub type Reward = i32;
pub type Grid = [[Rank; BOARD_SIZE]; BOARD_SIZE];

/// Slide directions, numbered in the order the slider scans them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Slide(Direction),
    Place { position: usize, tile: Rank, hint: Rank },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub grid: Grid,
    pub hint: Rank,
    /// Remaining undrawn copies of ranks 1, 2 and 3.
    pub bag: [u8; 3],
    pub last_slide: Option<Direction>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: Default::default(),
            hint: 0,
            bag: [BAG_REFILL; 3],
            last_slide: None,
        }
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::new()
        }
    }

    pub fn rank(&self, row: usize, col: usize) -> Rank {
        self.grid[row][col]
    }

    /// Cell by row-major position in `0..CELL_COUNT`.
    pub fn cell(&self, position: usize) -> Rank {
        self.grid[position / BOARD_SIZE][position % BOARD_SIZE]
    }

    pub fn hint(&self) -> Rank {
        self.hint
    }

    pub fn bag(&self, tile: Rank) -> u8 {
        match tile {
            1..=3 => self.bag[tile as usize - 1],
            _ => 0,
        }
    }

    pub fn last_slide(&self) -> Option<Direction> {
        self.last_slide
    }

    pub fn max_rank(&self) -> Rank {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of the tile scores currently on the board.
    pub fn score(&self) -> Reward {
        self.grid.iter().flatten().map(|&rank| tile_score(rank)).sum()
    }

    /// The same position turned 90 degrees clockwise.
    pub fn rotate_clockwise(&self) -> Board {
        let mut rotated = self.clone();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                rotated.grid[col][BOARD_SIZE - 1 - row] = self.grid[row][col];
            }
        }
        rotated
    }
}

/// Face value printed on a tile of the given rank.
pub fn tile_value(rank: Rank) -> u32 {
    match rank {
        0..=2 => rank as u32,
        _ => 3 << (rank - 3),
    }
}

/// Score contributed by one tile: 3^(rank-2) from the "3" tile upwards.
pub fn tile_score(rank: Rank) -> Reward {
    match rank {
        0..=2 => 0,
        _ => 3i32.pow((rank - 2) as u32),
    }
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    pub fn to_string(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_values_and_scores() {
        assert_eq!(tile_value(1), 1);
        assert_eq!(tile_value(3), 3);
        assert_eq!(tile_value(4), 6);
        assert_eq!(tile_value(7), 48);
        assert_eq!(tile_score(2), 0);
        assert_eq!(tile_score(3), 3);
        assert_eq!(tile_score(5), 27);
    }

    #[test]
    fn rotate_four_times_is_identity() {
        let mut grid = Grid::default();
        for (i, cell) in grid.iter_mut().flatten().enumerate() {
            *cell = (i % 7) as Rank;
        }
        let board = Board::from_grid(grid);
        let rotated = board.rotate_clockwise();
        assert_eq!(rotated.rank(0, 3), board.rank(0, 0));
        assert_eq!(rotated.rank(3, 3), board.rank(0, 3));
        let back = rotated
            .rotate_clockwise()
            .rotate_clockwise()
            .rotate_clockwise();
        assert_eq!(back, board);
    }

    #[test]
    fn directions_scan_in_opcode_order() {
        let order: Vec<usize> = Direction::iter().map(|direction| direction as usize).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
