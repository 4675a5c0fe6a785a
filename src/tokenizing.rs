//! Address tokenization
//!
//! Splits a free-form address into word tokens and the separators that
//! follow them. The rules are tuned for addresses:
//!
//! - case is folded and apostrophes, periods and carets vanish (`st.` is `st`)
//! - house-number ranges survive: `12-14`, `1/2`, `12-14a` stay one token
//! - words made only of emoji are dropped
//! - Han characters never share a token with non-Han characters, so
//!   `東京都1-2-3` yields `東京都` and `1-2-3`
//!
//! Concatenating tokens and separators gives back [`normalize`]d input, minus
//! dropped emoji words.

mod classes;
mod tokenizer;

pub use classes::{is_han, is_word_separator, remove_emoji, WORD_SEPARATOR};
pub use tokenizer::{normalize, tokenize, tokenize_with, TokenizeError, TokenizeMode, Tokenized};
