use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

use crate::puzzle::{
    grid::{DEFAULT_ATTEMPT_BUDGET, DEFAULT_GRID_SIZE},
    GeneratorOptions,
};
use crate::utils::letters::NoiseFill;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub default_size: usize,
    pub max_size: usize,
    pub attempt_budget: usize,
    pub weighted_noise: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_GRID_SIZE,
            max_size: 40,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            weighted_noise: false,
        }
    }
}

impl PuzzleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            bail!("PUZZLE_MAX_SIZE must be at least 1");
        }
        if self.default_size == 0 || self.default_size > self.max_size {
            bail!(
                "PUZZLE_DEFAULT_SIZE must be between 1 and {} (got {})",
                self.max_size,
                self.default_size
            );
        }
        if self.attempt_budget == 0 {
            bail!("PUZZLE_ATTEMPT_BUDGET must be at least 1");
        }
        Ok(())
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            attempt_budget: self.attempt_budget,
            noise: if self.weighted_noise {
                NoiseFill::Weighted
            } else {
                NoiseFill::Uniform
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "../frontend".to_string()),
        };

        let defaults = PuzzleConfig::default();
        let puzzle = PuzzleConfig {
            default_size: env::var("PUZZLE_DEFAULT_SIZE")
                .unwrap_or_else(|_| defaults.default_size.to_string())
                .parse()
                .context("PUZZLE_DEFAULT_SIZE must be a number")?,
            max_size: env::var("PUZZLE_MAX_SIZE")
                .unwrap_or_else(|_| defaults.max_size.to_string())
                .parse()
                .context("PUZZLE_MAX_SIZE must be a number")?,
            attempt_budget: env::var("PUZZLE_ATTEMPT_BUDGET")
                .unwrap_or_else(|_| defaults.attempt_budget.to_string())
                .parse()
                .context("PUZZLE_ATTEMPT_BUDGET must be a number")?,
            weighted_noise: env::var("PUZZLE_WEIGHTED_NOISE")
                .unwrap_or_else(|_| defaults.weighted_noise.to_string())
                .parse()
                .context("PUZZLE_WEIGHTED_NOISE must be true or false")?,
        };
        puzzle.validate()?;

        Ok(Config { server, puzzle })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_puzzle_config_is_valid() {
        let puzzle = PuzzleConfig::default();
        assert!(puzzle.validate().is_ok());
        assert_eq!(puzzle.default_size, 15);
        assert_eq!(puzzle.generator_options(), GeneratorOptions::default());
    }

    #[test]
    fn test_default_size_above_max_is_rejected() {
        let puzzle = PuzzleConfig {
            default_size: 50,
            max_size: 20,
            ..PuzzleConfig::default()
        };
        assert!(puzzle.validate().is_err());
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let puzzle = PuzzleConfig {
            attempt_budget: 0,
            ..PuzzleConfig::default()
        };
        assert!(puzzle.validate().is_err());
    }

    #[test]
    fn test_weighted_noise_option() {
        let puzzle = PuzzleConfig {
            weighted_noise: true,
            ..PuzzleConfig::default()
        };
        assert_eq!(puzzle.generator_options().noise, NoiseFill::Weighted);
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                frontend_dir: "dist".to_string(),
            },
            puzzle: PuzzleConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
