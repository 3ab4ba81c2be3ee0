use crate::models::{GenerationResult, Grid, Position, WordPlacement};

pub struct PlacementValidator;

impl PlacementValidator {
    /// Extract word from grid positions
    pub fn extract_word(grid: &Grid, positions: &[Position]) -> String {
        positions
            .iter()
            .map(|pos| grid[pos.row][pos.col])
            .collect()
    }

    /// Validate that a placement's path is a straight, in-bounds run that
    /// starts at `start` and has one cell per letter
    pub fn is_valid_path(size: usize, placement: &WordPlacement) -> bool {
        if placement.path.len() != placement.word.chars().count() {
            return false;
        }

        if placement.path.first() != Some(&placement.start) {
            return false;
        }

        if !placement
            .path
            .iter()
            .all(|pos| pos.row < size && pos.col < size)
        {
            return false;
        }

        placement
            .path
            .windows(2)
            .all(|pair| Self::is_step(&pair[0], &pair[1], placement))
    }

    fn is_step(from: &Position, to: &Position, placement: &WordPlacement) -> bool {
        let (d_row, d_col) = placement.direction.delta();
        to.row as isize - from.row as isize == d_row
            && to.col as isize - from.col as isize == d_col
    }

    /// Check a finished result: square grid of letters, every placement on a
    /// valid path and reading back its word
    pub fn check_result(result: &GenerationResult) -> Result<(), String> {
        if result.grid.len() != result.size {
            return Err(format!(
                "grid has {} rows, expected {}",
                result.grid.len(),
                result.size
            ));
        }

        for (r, row) in result.grid.iter().enumerate() {
            if row.len() != result.size {
                return Err(format!("row {} has {} cells", r, row.len()));
            }
        }

        for placement in &result.placed {
            if !Self::is_valid_path(result.size, placement) {
                return Err(format!("{} has an invalid path", placement.word));
            }

            let spelled = Self::extract_word(&result.grid, &placement.path);
            if spelled != placement.word {
                return Err(format!("{} reads back as {}", placement.word, spelled));
            }
        }

        Ok(())
    }
}
