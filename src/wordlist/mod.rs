/// Shortest word worth hiding in a puzzle
pub const MIN_WORD_LEN: usize = 2;

/// Normalize a single entry the way the worksheet UI does: trim and
/// uppercase, dropping anything shorter than `MIN_WORD_LEN`
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_uppercase();
    (word.chars().count() >= MIN_WORD_LEN).then_some(word)
}

/// Split a free-text word list on newlines and commas.
/// Order is kept and duplicates are not removed.
pub fn parse_word_list(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split(['\n', ','])
        .filter_map(normalize_word)
        .collect();

    tracing::debug!("Parsed {} words from word list", words.len());

    words
}
