use std::cmp::Reverse;

use rand::Rng;
use thiserror::Error;

use crate::{
    models::{Direction, GenerationResult, Grid, Position, WordPlacement},
    puzzle::validator::PlacementValidator,
    utils::letters::NoiseFill,
};

/// Grid size the worksheet UI asks for when none is picked
pub const DEFAULT_GRID_SIZE: usize = 15;
/// Random placement tries per word before it is given up on
pub const DEFAULT_ATTEMPT_BUDGET: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("grid size must be at least 1 (got {0})")]
    InvalidSize(usize),
    #[error("attempt budget must be at least 1")]
    InvalidAttemptBudget,
}

/// Tunables for a generator run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub attempt_budget: usize,
    pub noise: NoiseFill,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            noise: NoiseFill::Uniform,
        }
    }
}

/// Working grid, `None` marks a cell no word has claimed yet
type Cells = Vec<Vec<Option<char>>>;

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a word search with the thread RNG and default options
    #[allow(dead_code)]
    pub fn generate<S: AsRef<str>>(
        words: &[S],
        size: usize,
    ) -> Result<GenerationResult, PuzzleError> {
        let mut rng = rand::rng();
        Self::generate_with(words, size, &GeneratorOptions::default(), &mut rng)
    }

    /// Generate a word search drawing every random choice from `rng`.
    ///
    /// Words are tried longest first. Each gets up to `attempt_budget` random
    /// (direction, start) candidates; the first one whose cells are empty or
    /// already hold the same letter is committed. Words that never fit are
    /// left out of `placed`. Empty cells are filled with noise only after
    /// every word has been tried.
    pub fn generate_with<S, R>(
        words: &[S],
        size: usize,
        options: &GeneratorOptions,
        rng: &mut R,
    ) -> Result<GenerationResult, PuzzleError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if size == 0 {
            return Err(PuzzleError::InvalidSize(size));
        }
        if options.attempt_budget == 0 {
            return Err(PuzzleError::InvalidAttemptBudget);
        }

        let mut cells: Cells = vec![vec![None; size]; size];

        // Stable sort keeps caller order among equal lengths
        let mut order: Vec<&str> = words.iter().map(|word| word.as_ref()).collect();
        order.sort_by_key(|word| Reverse(word.chars().count()));

        let mut placed = Vec::with_capacity(order.len());
        for word in order {
            match Self::place_word(&mut cells, word, options.attempt_budget, rng) {
                Some(placement) => placed.push(placement),
                None => tracing::debug!("Skipped word {:?} in {}x{} grid", word, size, size),
            }
        }

        let grid = Self::fill_noise(cells, options.noise, rng);
        let result = GenerationResult { size, grid, placed };
        debug_assert!(PlacementValidator::check_result(&result).is_ok());

        tracing::debug!(
            "Placed {} of {} words in {}x{} grid",
            result.placed.len(),
            words.len(),
            size,
            size
        );

        Ok(result)
    }

    fn place_word<R: Rng + ?Sized>(
        cells: &mut Cells,
        word: &str,
        attempt_budget: usize,
        rng: &mut R,
    ) -> Option<WordPlacement> {
        let size = cells.len();
        let letters: Vec<char> = word.chars().collect();

        // Nothing to place, or too long for any row, column or diagonal
        if letters.is_empty() || letters.len() > size {
            return None;
        }

        for _ in 0..attempt_budget {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let start = Self::random_start(direction, letters.len(), size, rng);
            let Some(path) = Self::path(start, direction, letters.len(), size) else {
                continue;
            };

            if Self::fits(cells, &path, &letters) {
                for (pos, letter) in path.iter().zip(&letters) {
                    cells[pos.row][pos.col] = Some(*letter);
                }
                return Some(WordPlacement {
                    word: word.to_string(),
                    direction,
                    start,
                    path,
                });
            }
        }

        None
    }

    /// Pick a start so a word of `len` letters stays inside the grid
    fn random_start<R: Rng + ?Sized>(
        direction: Direction,
        len: usize,
        size: usize,
        rng: &mut R,
    ) -> Position {
        let (d_row, d_col) = direction.delta();
        let row = Self::random_axis(d_row, len, size, rng);
        let col = Self::random_axis(d_col, len, size, rng);
        Position::new(row, col)
    }

    fn random_axis<R: Rng + ?Sized>(delta: isize, len: usize, size: usize, rng: &mut R) -> usize {
        match delta {
            1 => rng.random_range(0..=size - len),
            -1 => rng.random_range(len - 1..size),
            _ => rng.random_range(0..size),
        }
    }

    fn path(start: Position, direction: Direction, len: usize, size: usize) -> Option<Vec<Position>> {
        (0..len)
            .map(|step| start.offset(direction, step, size))
            .collect()
    }

    /// Every cell is free or already carries the letter we want there
    fn fits(cells: &Cells, path: &[Position], letters: &[char]) -> bool {
        path.iter()
            .zip(letters)
            .all(|(pos, letter)| match cells[pos.row][pos.col] {
                None => true,
                Some(existing) => existing == *letter,
            })
    }

    fn fill_noise<R: Rng + ?Sized>(cells: Cells, noise: NoiseFill, rng: &mut R) -> Grid {
        cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| noise.random_letter(rng)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    fn seeded(words: &[&str], size: usize, seed: u64) -> GenerationResult {
        let mut rng = StdRng::seed_from_u64(seed);
        GridGenerator::generate_with(words, size, &GeneratorOptions::default(), &mut rng)
            .expect("valid size")
    }

    fn assert_structurally_valid(result: &GenerationResult, words: &[&str]) {
        assert_eq!(result.grid.len(), result.size);
        for row in &result.grid {
            assert_eq!(row.len(), result.size);
        }
        assert!(result.placed.len() <= words.len());
        PlacementValidator::check_result(result).expect("placements read back");

        // Every placed word came from the input, no more often than given
        let mut available: HashMap<&str, usize> = HashMap::new();
        for word in words {
            *available.entry(*word).or_default() += 1;
        }
        for placement in &result.placed {
            let remaining = available
                .get_mut(placement.word.as_str())
                .expect("placed word must come from the input");
            assert!(*remaining > 0, "{} placed too many times", placement.word);
            *remaining -= 1;
        }
    }

    #[test]
    fn test_cat_and_dog_in_five_by_five() {
        let words = ["CAT", "DOG"];
        let result = seeded(&words, 5, 1);

        assert_eq!(result.grid.len(), 5);
        assert!(result.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
        assert_eq!(result.placed.len(), 2);

        let mut spelled: Vec<String> = result
            .placed
            .iter()
            .map(|p| PlacementValidator::extract_word(&result.grid, &p.path))
            .collect();
        spelled.sort();
        assert_eq!(spelled, vec!["CAT", "DOG"]);
        assert_structurally_valid(&result, &words);
    }

    #[test]
    fn test_word_longer_than_grid_is_skipped() {
        let words = ["ABCDEFGHIJKLMNOPQRST"];
        let result = seeded(&words, 10, 5);

        assert!(result.placed.is_empty());
        assert_eq!(result.grid.len(), 10);
        assert!(result
            .grid
            .iter()
            .all(|row| row.len() == 10 && row.iter().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_crossing_words_agree_on_shared_cells() {
        let words = ["CAT", "TAP"];
        let mut overlapping_runs = 0;

        for seed in 0..200 {
            let result = seeded(&words, 3, seed);
            assert_eq!(result.placed.len(), 2, "seed {} should fit both words", seed);
            assert_structurally_valid(&result, &words);

            let (first, second) = (&result.placed[0], &result.placed[1]);
            for (i, pos) in first.path.iter().enumerate() {
                if let Some(j) = second.path.iter().position(|p| p == pos) {
                    let a = first.word.chars().nth(i);
                    let b = second.word.chars().nth(j);
                    assert_eq!(a, b, "conflicting letters at {:?}", pos);
                    overlapping_runs += 1;
                }
            }
        }

        assert!(overlapping_runs > 0, "some run should cross the words");
    }

    #[test]
    fn test_identical_single_letters_share_the_only_cell() {
        let words = ["A", "A"];
        let result = seeded(&words, 1, 9);

        assert_eq!(result.grid, vec![vec!['A']]);
        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.placed[0].path, result.placed[1].path);
    }

    #[test]
    fn test_conflicting_single_letters_in_one_cell() {
        let words = ["A", "B"];
        let result = seeded(&words, 1, 9);

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].word, "A");
        assert_eq!(result.grid, vec![vec!['A']]);
    }

    #[test]
    fn test_placements_are_longest_first() {
        let words = ["AB", "ABCD", "XYZ", "ABC"];
        let result = seeded(&words, 10, 21);

        assert_eq!(result.placed_words(), vec!["ABCD", "XYZ", "ABC", "AB"]);
    }

    #[test]
    fn test_overfull_grid_degrades_gracefully() {
        let words = [
            "ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF", "HOTEL",
            "INDIA", "JULIET", "KILO", "LIMA", "MIKE", "NOVEMBER", "OSCAR", "PAPA",
        ];
        let result = seeded(&words, 6, 13);

        assert!(result.placed.len() < words.len());
        assert_structurally_valid(&result, &words);
    }

    #[test]
    fn test_repeated_runs_stay_valid() {
        let words = ["PLANET", "COMET", "STAR", "MOON", "ORBIT", "SUN"];
        for _ in 0..50 {
            let result = GridGenerator::generate(&words, 8).expect("valid size");
            assert_structurally_valid(&result, &words);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let words = ["RIVER", "MOUNTAIN", "VALLEY", "OCEAN", "DESERT"];
        let first = seeded(&words, 12, 42);
        let second = seeded(&words, 12, 42);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_word_is_skipped() {
        let words = ["", "CAT"];
        let result = seeded(&words, 5, 2);

        assert_eq!(result.placed_words(), vec!["CAT"]);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = GridGenerator::generate(&["CAT"], 0).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidSize(0));
    }

    #[test]
    fn test_zero_attempt_budget_is_rejected() {
        let options = GeneratorOptions {
            attempt_budget: 0,
            ..GeneratorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let err = GridGenerator::generate_with(&["CAT"], 5, &options, &mut rng).unwrap_err();
        assert_eq!(err, PuzzleError::InvalidAttemptBudget);
    }

    #[test]
    fn test_weighted_noise_fills_every_cell() {
        let options = GeneratorOptions {
            noise: NoiseFill::Weighted,
            ..GeneratorOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        let result = GridGenerator::generate_with(&["LETTER"], 9, &options, &mut rng).unwrap();

        assert_eq!(result.placed.len(), 1);
        assert!(result.grid.iter().flatten().all(|c| c.is_ascii_uppercase()));
    }
}
