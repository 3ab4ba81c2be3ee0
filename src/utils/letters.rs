use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Letters used for uniform noise
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letter frequency distribution for English (approximate)
pub static LETTER_DISTRIBUTION: Lazy<Vec<(char, f32)>> = Lazy::new(|| {
    vec![
        ('E', 12.70),
        ('T', 9.05),
        ('A', 8.16),
        ('O', 7.50),
        ('I', 6.96),
        ('N', 6.74),
        ('S', 6.32),
        ('H', 6.09),
        ('R', 5.98),
        ('D', 4.25),
        ('L', 4.02),
        ('C', 2.78),
        ('U', 2.75),
        ('M', 2.40),
        ('W', 2.36),
        ('F', 2.22),
        ('G', 2.01),
        ('Y', 1.97),
        ('P', 1.92),
        ('B', 1.49),
        ('V', 0.97),
        ('K', 0.77),
        ('J', 0.15),
        ('X', 0.15),
        ('Q', 0.09),
        ('Z', 0.07),
    ]
});

/// Running totals over `LETTER_DISTRIBUTION`, built once
static CUMULATIVE_DISTRIBUTION: Lazy<Vec<(char, f32)>> = Lazy::new(get_cumulative_distribution);

/// How empty cells are filled once every word has been placed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoiseFill {
    /// Every letter A-Z equally likely
    #[default]
    Uniform,
    /// Letters drawn by English frequency, so noise blends in with real words
    Weighted,
}

impl NoiseFill {
    pub fn random_letter<R: Rng + ?Sized>(self, rng: &mut R) -> char {
        match self {
            NoiseFill::Uniform => ALPHABET[rng.random_range(0..ALPHABET.len())] as char,
            NoiseFill::Weighted => weighted_letter(&CUMULATIVE_DISTRIBUTION, rng),
        }
    }
}

/// Calculate the cumulative distribution for weighted random selection
pub fn get_cumulative_distribution() -> Vec<(char, f32)> {
    let mut cumulative = 0.0;
    LETTER_DISTRIBUTION
        .iter()
        .map(|(ch, freq)| {
            cumulative += freq;
            (*ch, cumulative)
        })
        .collect()
}

fn weighted_letter<R: Rng + ?Sized>(cumulative_dist: &[(char, f32)], rng: &mut R) -> char {
    let total = cumulative_dist.last().map_or(0.0, |(_, c)| *c);
    let random_value = rng.random::<f32>() * total;

    for (letter, cumulative) in cumulative_dist {
        if random_value <= *cumulative {
            return *letter;
        }
    }

    'E' // Fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_cumulative_distribution() {
        let dist = get_cumulative_distribution();
        assert!(dist.len() == 26);
        // Last entry should be close to 100%
        assert!((dist.last().unwrap().1 - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_uniform_letters_are_uppercase() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let letter = NoiseFill::Uniform.random_letter(&mut rng);
            assert!(letter.is_ascii_uppercase(), "got {:?}", letter);
        }
    }

    #[test]
    fn test_uniform_covers_alphabet() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: std::collections::HashSet<char> = (0..5000)
            .map(|_| NoiseFill::Uniform.random_letter(&mut rng))
            .collect();
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn test_weighted_favours_common_letters() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e_count = 0;
        let mut z_count = 0;
        for _ in 0..10_000 {
            match NoiseFill::Weighted.random_letter(&mut rng) {
                'E' => e_count += 1,
                'Z' => z_count += 1,
                letter => assert!(letter.is_ascii_uppercase()),
            }
        }
        assert!(e_count > z_count * 10);
    }
}
