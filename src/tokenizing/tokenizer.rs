//! Address tokenizer

use super::classes::{is_han, is_word_separator, remove_emoji, STRIPPED, WORD_SEPARATOR};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// A run of word characters and the run of separators after it.
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "([^{WORD_SEPARATOR}]+)([{WORD_SEPARATOR}]+|$)"
    ))
    .unwrap()
});

/// House numbers joined across `-` or `/`: 1-2, 1/2, 1-2a, 1/2-3b.
static NUMBER_RANGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(-|/)([0-9]+)((-|/)([0-9]+))?[a-z]?$").unwrap());

/// How the input should be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenizeMode {
    #[default]
    Forward,
    /// Coordinate queries. Reserved; always rejected.
    LonLat,
}

/// Errors during tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    UnsupportedMode(TokenizeMode),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::UnsupportedMode(mode) => {
                write!(f, "Unsupported tokenize mode {:?}; use reverse lookup instead", mode)
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Tokens, their trailing separators, and the index of the input token each
/// one came from (currently always its own index).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    pub separators: Vec<String>,
    pub owner: Vec<usize>,
}

impl Tokenized {
    fn push(&mut self, token: String, separator: String) {
        self.owner.push(self.tokens.len());
        self.tokens.push(token);
        self.separators.push(separator);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of gaps between tokens.
    pub fn boundaries(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    /// `(token, separator)` pairs in reading order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .map(String::as_str)
            .zip(self.separators.iter().map(String::as_str))
    }

    /// Tokens and separators joined back together.
    pub fn to_text(&self) -> String {
        self.pairs().flat_map(|(t, s)| [t, s]).collect()
    }
}

/// Lowercase, delete apostrophes/periods/carets, drop leading separators.
pub fn normalize(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();
    folded.trim_start_matches(is_word_separator).to_string()
}

/// Tokenize an address in forward mode.
pub fn tokenize(input: &str) -> Tokenized {
    let normalized = normalize(input);
    let mut out = Tokenized::default();
    // A word whose separator was `-` or `/`, waiting to see if the next word
    // completes a house-number range.
    let mut tail: Option<(String, String)> = None;

    for caps in WORD_REGEX.captures_iter(&normalized) {
        let mut word = caps[1].to_string();
        let separator = caps.get(2).map_or("", |m| m.as_str()).to_string();

        if let Some((held, held_separator)) = tail.take() {
            let combined = format!("{held}{held_separator}{word}");
            if NUMBER_RANGE_REGEX.is_match(&combined) {
                word = combined;
            } else {
                out.push(held, held_separator);
            }
        }

        if remove_emoji(&word).is_empty() {
            continue;
        }

        let mut runs = split_han_runs(&word);
        let Some(last) = runs.pop() else {
            continue;
        };
        for run in runs {
            out.push(run, String::new());
        }

        if separator == "-" || separator == "/" {
            tail = Some((last, separator));
        } else {
            out.push(last, separator);
        }
    }

    if let Some((held, held_separator)) = tail {
        out.push(held, held_separator);
    }

    out
}

/// Tokenize with an explicit mode. Only [`TokenizeMode::Forward`] is supported.
pub fn tokenize_with(input: &str, mode: TokenizeMode) -> Result<Tokenized, TokenizeError> {
    match mode {
        TokenizeMode::Forward => Ok(tokenize(input)),
        TokenizeMode::LonLat => Err(TokenizeError::UnsupportedMode(mode)),
    }
}

/// Maximal runs of Han and non-Han characters, in order.
fn split_han_runs(word: &str) -> Vec<String> {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_is_han = None;

    for c in word.chars() {
        let han = is_han(c);
        if current_is_han.is_some_and(|h| h != han) {
            runs.push(std::mem::take(&mut current));
        }
        current_is_han = Some(han);
        current.push(c);
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        tokenize(input).tokens
    }

    #[test]
    fn test_simple_address() {
        let result = tokenize("123 Main St");
        assert_eq!(result.tokens, vec!["123", "main", "st"]);
        assert_eq!(result.separators, vec![" ", " ", ""]);
        assert_eq!(result.owner, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), Tokenized::default());
        assert_eq!(tokenize(" ,- "), Tokenized::default());
    }

    #[test]
    fn test_strips_apostrophes_periods_and_carets() {
        assert_eq!(tokens("St. John's Rd."), vec!["st", "johns", "rd"]);
        assert_eq!(tokens("o\u{2019}brien^"), vec!["obrien"]);
    }

    #[test]
    fn test_leading_separators_removed() {
        let result = tokenize("  , 5 ave");
        assert_eq!(result.tokens, vec!["5", "ave"]);
        assert_eq!(result.separators, vec![" ", ""]);
    }

    #[test]
    fn test_number_range_joined() {
        let result = tokenize("12-14 Main St");
        assert_eq!(result.tokens, vec!["12-14", "main", "st"]);
        assert_eq!(result.separators, vec![" ", " ", ""]);
    }

    #[test]
    fn test_words_not_joined_across_hyphen() {
        let result = tokenize("foo-bar");
        assert_eq!(result.tokens, vec!["foo", "bar"]);
        assert_eq!(result.separators, vec!["-", ""]);
    }

    #[test]
    fn test_range_chains_and_letter_suffix() {
        assert_eq!(tokens("1/2-3b"), vec!["1/2-3b"]);
        assert_eq!(tokens("12-14a elm"), vec!["12-14a", "elm"]);
        // A third joint is past what a house-number range can hold
        assert_eq!(tokens("1-2-3-4"), vec!["1-2-3", "4"]);
    }

    #[test]
    fn test_trailing_hyphen_flushed() {
        let result = tokenize("unit 5-");
        assert_eq!(result.tokens, vec!["unit", "5"]);
        assert_eq!(result.separators, vec![" ", "-"]);
    }

    #[test]
    fn test_spaced_hyphen_not_joined() {
        assert_eq!(tokens("12 - 14"), vec!["12", "14"]);
    }

    #[test]
    fn test_emoji_words_dropped() {
        let result = tokenize("main 🏠 st");
        assert_eq!(result.tokens, vec!["main", "st"]);
        assert_eq!(result.separators, vec![" ", ""]);
        assert_eq!(result.owner, vec![0, 1]);
    }

    #[test]
    fn test_han_runs_split_from_numbers() {
        let result = tokenize("東京都1-2-3");
        assert_eq!(result.tokens, vec!["東京都", "1-2-3"]);
        assert_eq!(result.separators, vec!["", ""]);
    }

    #[test]
    fn test_han_split_keeps_trailing_separator_on_last_run() {
        let result = tokenize("abc東京def ghi");
        assert_eq!(result.tokens, vec!["abc", "東京", "def", "ghi"]);
        assert_eq!(result.separators, vec!["", "", " ", ""]);
    }

    #[test]
    fn test_full_width_separators() {
        assert_eq!(tokens("大阪市\u{3000}北区"), vec!["大阪市", "北区"]);
        assert_eq!(tokens("a\u{FF0C}b"), vec!["a", "b"]);
    }

    #[test]
    fn test_round_trips_to_normalized_text() {
        let input = "  Apt. 4B, 12-14 Rue d'Alésia / Paris";
        assert_eq!(tokenize(input).to_text(), normalize(input));
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(tokenize("post office box").boundaries(), 2);
        assert_eq!(tokenize("").boundaries(), 0);
    }

    #[test]
    fn test_lonlat_mode_rejected() {
        assert_eq!(
            tokenize_with("1,2", TokenizeMode::LonLat),
            Err(TokenizeError::UnsupportedMode(TokenizeMode::LonLat))
        );
        assert_eq!(tokenize_with("1 main", TokenizeMode::Forward).unwrap().len(), 2);
    }
}
