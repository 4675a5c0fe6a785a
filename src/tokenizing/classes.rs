//! Character classes used by the tokenizer

use once_cell::sync::Lazy;
use regex::Regex;

/// Body of the separator character class, ready to be wrapped in `[...]`.
///
/// Whitespace, General Punctuation, Supplemental Punctuation, ASCII
/// punctuation and its full-width forms.
pub const WORD_SEPARATOR: &str = concat!(
    r"\s\x{FEFF}",
    r"\x{2000}-\x{206F}",
    r"\x{2E00}-\x{2E7F}",
    // !"#$%&'()*+,-./
    r"\x{21}-\x{2F}",
    // :;<=>?@
    r"\x{3A}-\x{40}",
    // [\]^_`
    r"\x{5B}-\x{60}",
    // {|}~
    r"\x{7B}-\x{7E}",
    r"\x{FF01}-\x{FF0F}",
    r"\x{FF1A}-\x{FF20}",
    r"\x{FF3B}-\x{FF40}",
    r"\x{FF5B}-\x{FF65}",
);

/// Characters deleted before splitting: apostrophes, period, caret.
pub(super) const STRIPPED: &[char] = &[
    '\u{2018}', '\u{2019}', '\u{02BC}', '\u{02BB}', '\u{FF07}', '\'', '.', '^',
];

/// Keycaps, pictographs, dingbats and friends, each with an optional
/// variation selector.
static EMOJI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[#0-9]\x{20E3}",
        r"|[\x{A9}\x{AE}\x{203C}\x{2047}-\x{2049}\x{2122}\x{2139}\x{3030}\x{303D}\x{3297}\x{3299}",
        r"\x{2190}-\x{21FF}\x{2300}-\x{23FF}\x{2460}-\x{24FF}\x{25A0}-\x{25FF}\x{2600}-\x{27BF}",
        r"\x{2900}-\x{297F}\x{2B00}-\x{2BF0}\x{1F000}-\x{1F6FF}][\x{FE00}-\x{FEFF}]?",
        r"|[\x{FE00}-\x{FE0F}]",
    ))
    .unwrap()
});

/// Whether `c` belongs to [`WORD_SEPARATOR`].
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(c,
            '\u{FEFF}'
            | '\u{2000}'..='\u{206F}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{21}'..='\u{2F}'
            | '\u{3A}'..='\u{40}'
            | '\u{5B}'..='\u{60}'
            | '\u{7B}'..='\u{7E}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}')
}

/// CJK Unified Ideographs.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// `text` with every emoji sequence removed.
pub fn remove_emoji(text: &str) -> String {
    EMOJI_REGEX.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_agrees_with_class() {
        let class = Regex::new(&format!("^[{WORD_SEPARATOR}]$")).unwrap();
        for c in ('\u{0}'..='\u{3100}').chain('\u{FEF0}'..='\u{FFFF}') {
            assert_eq!(
                is_word_separator(c),
                class.is_match(&c.to_string()),
                "disagreement on U+{:04X}",
                c as u32
            );
        }
    }

    #[test]
    fn test_address_punctuation_separates() {
        for c in [' ', ',', '-', '/', '#', '(', '\u{3000}', '\u{FF0C}', '\u{2014}'] {
            assert!(is_word_separator(c), "{c:?}");
        }
        for c in ['a', '1', 'ß', '東', '\u{FF11}'] {
            assert!(!is_word_separator(c), "{c:?}");
        }
    }

    #[test]
    fn test_remove_emoji() {
        assert_eq!(remove_emoji("🏠"), "");
        assert_eq!(remove_emoji("☀\u{FE0F}"), "");
        assert_eq!(remove_emoji("1\u{20E3}"), "");
        assert_eq!(remove_emoji("main🏠"), "main");
        assert_eq!(remove_emoji("straße"), "straße");
    }

    #[test]
    fn test_is_han() {
        assert!(is_han('東'));
        assert!(!is_han('1'));
        assert!(!is_han('ア'));
    }
}
