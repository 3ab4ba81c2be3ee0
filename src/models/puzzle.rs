use serde::{Deserialize, Serialize};

/// A cell coordinate inside the puzzle grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `steps` cells along `direction`, returning `None` when the result
    /// leaves an `size x size` grid.
    pub fn offset(self, direction: Direction, steps: usize, size: usize) -> Option<Position> {
        let (d_row, d_col) = direction.delta();
        let row = self.row as isize + d_row * steps as isize;
        let col = self.col as isize + d_col * steps as isize;
        let size = size as isize;

        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// The eight compass directions a word may be written in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    East,
    West,
    South,
    North,
    SouthEast,
    NorthWest,
    SouthWest,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
    ];

    /// Per-step `(row, col)` change
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::SouthEast => (1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (1, -1),
            Direction::NorthEast => (-1, 1),
        }
    }
}

/// A committed word: where it starts, which way it runs, and every cell it covers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordPlacement {
    pub word: String,
    pub direction: Direction,
    pub start: Position,
    /// One position per letter, in reading order
    pub path: Vec<Position>,
}

/// Filled puzzle grid, indexed `grid[row][col]`
pub type Grid = Vec<Vec<char>>;

/// Output of one generator run. Words that could not be placed are absent
/// from `placed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    pub size: usize,
    pub grid: Grid,
    /// Placements in the order words were attempted (longest first)
    pub placed: Vec<WordPlacement>,
}

impl GenerationResult {
    /// Whether any placed word covers this cell
    pub fn is_cell_in_answer(&self, row: usize, col: usize) -> bool {
        let target = Position::new(row, col);
        self.placed
            .iter()
            .any(|placement| placement.path.contains(&target))
    }

    /// Answer key as a boolean grid, `true` where a placed word passes
    pub fn answer_mask(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.is_cell_in_answer(row, col))
                    .collect()
            })
            .collect()
    }

    /// The words to list under the puzzle
    pub fn placed_words(&self) -> Vec<&str> {
        self.placed.iter().map(|p| p.word.as_str()).collect()
    }
}
