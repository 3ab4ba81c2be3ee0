use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::PuzzleConfig,
    models::{Grid, WordPlacement},
    puzzle::GridGenerator,
    wordlist::{normalize_word, parse_word_list},
    AppState,
};

/// Title used when the request leaves it blank
pub const DEFAULT_TITLE: &str = "My Word Search";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub title: Option<String>,
    /// Individual words, normalized one by one
    #[serde(default)]
    pub words: Vec<String>,
    /// Free text, newline or comma separated
    pub text: Option<String>,
    pub size: Option<usize>,
    /// Makes the puzzle reproducible, e.g. to reprint the same sheet
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub title: String,
    pub size: usize,
    pub grid: Grid,
    pub placed: Vec<WordPlacement>,
    /// Words for the "find these words" list, in placement order
    pub words: Vec<String>,
    /// `true` for every cell covered by a placed word
    pub answer_key: Vec<Vec<bool>>,
    /// Number of words asked for after normalization
    pub requested: usize,
    pub placed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Generate a word search puzzle from a word list
pub async fn generate_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    build_puzzle(&state.config.puzzle, payload).map(Json)
}

fn build_puzzle(
    config: &PuzzleConfig,
    payload: GenerateRequest,
) -> Result<GenerateResponse, StatusCode> {
    let mut words: Vec<String> = payload
        .words
        .iter()
        .filter_map(|word| normalize_word(word))
        .collect();
    if let Some(text) = &payload.text {
        words.extend(parse_word_list(text));
    }

    if words.is_empty() {
        tracing::warn!("Rejected puzzle request without words");
        return Err(StatusCode::BAD_REQUEST);
    }

    let size = payload.size.unwrap_or(config.default_size);
    if size > config.max_size {
        tracing::warn!(
            "Rejected puzzle size {} (maximum is {})",
            size,
            config.max_size
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    let options = config.generator_options();
    let result = match payload.seed {
        Some(seed) => {
            GridGenerator::generate_with(&words, size, &options, &mut StdRng::seed_from_u64(seed))
        }
        None => GridGenerator::generate_with(&words, size, &options, &mut rand::rng()),
    }
    .map_err(|e| {
        tracing::warn!("Failed to generate puzzle: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let requested = words.len();
    let placed_count = result.placed.len();
    let warning = shortfall_warning(placed_count, requested);
    if warning.is_some() {
        tracing::info!(
            "Placed {} of {} words in {}x{} puzzle",
            placed_count,
            requested,
            size,
            size
        );
    }

    let title = payload
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let placed_words = result
        .placed_words()
        .into_iter()
        .map(str::to_string)
        .collect();
    let answer_key = result.answer_mask();

    Ok(GenerateResponse {
        title,
        size: result.size,
        grid: result.grid,
        placed: result.placed,
        words: placed_words,
        answer_key,
        requested,
        placed_count,
        warning,
    })
}

/// Message shown to the user when some words did not fit
pub fn shortfall_warning(placed: usize, requested: usize) -> Option<String> {
    (placed < requested).then(|| {
        format!(
            "Could not fit all words. Placed {} of {}. Try fewer or shorter words.",
            placed, requested
        )
    })
}
