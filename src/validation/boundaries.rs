//! Token-boundary consistency
//!
//! Matching replaces one phrase of a group with another, so all phrases that
//! can be replaced (everything but the canonical one) have to cover the same
//! number of token boundaries. Phrases are split by the real tokenizer; when
//! a group doesn't declare `spanBoundaries`, consumers fall back to a naive
//! split on spaces, so that split has to agree with the tokenizer.

use crate::tables::AdvancedGroup;
use crate::tokenizing::tokenize;
use std::collections::BTreeSet;
use std::fmt;

/// A way a group breaks boundary consistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryViolation {
    /// The phrase doesn't span the group's declared `spanBoundaries`.
    SpanMismatch {
        phrase: String,
        expected: usize,
        found: usize,
    },
    /// Splitting the phrase on spaces disagrees with the tokenizer.
    SplitMismatch {
        phrase: String,
        tokenized: usize,
        split: usize,
    },
    /// Non-canonical phrases span different boundary counts.
    Inconsistent {
        tokens: Vec<String>,
        counts: BTreeSet<usize>,
    },
}

impl fmt::Display for BoundaryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryViolation::SpanMismatch {
                phrase,
                expected,
                found,
            } => write!(
                f,
                "'{}' spans {} boundaries, group declares {}",
                phrase, found, expected
            ),
            BoundaryViolation::SplitMismatch {
                phrase,
                tokenized,
                split,
            } => write!(
                f,
                "'{}' tokenizes to {} boundaries but splits on spaces to {}",
                phrase, tokenized, split
            ),
            BoundaryViolation::Inconsistent { tokens, counts } => write!(
                f,
                "phrases {:?} span different boundary counts {:?}",
                tokens, counts
            ),
        }
    }
}

impl std::error::Error for BoundaryViolation {}

/// Boundaries between the tokens of `phrase`.
pub fn count_boundaries(phrase: &str) -> usize {
    tokenize(phrase).boundaries()
}

/// Check one group. Regex groups only need consistent counts.
pub fn check_boundaries(group: &AdvancedGroup) -> Result<(), BoundaryViolation> {
    // A declared span of 0 counts as no declaration
    let declared = group.span_boundaries.filter(|&n| n > 0).map(|n| n as usize);

    let mut counts = BTreeSet::new();
    let canonical = group.canonical.as_deref();
    for phrase in group.tokens.iter().filter(|p| canonical != Some(p.as_str())) {
        let found = count_boundaries(phrase);
        if found > 0 && !group.is_regex() {
            match declared {
                Some(expected) if found != expected => {
                    return Err(BoundaryViolation::SpanMismatch {
                        phrase: phrase.clone(),
                        expected,
                        found,
                    });
                }
                Some(_) => {}
                None => {
                    let split = phrase.split(' ').count() - 1;
                    if found != split {
                        return Err(BoundaryViolation::SplitMismatch {
                            phrase: phrase.clone(),
                            tokenized: found,
                            split,
                        });
                    }
                }
            }
        }
        counts.insert(found);
    }

    if group.tokens.len() > 1 && counts.len() != 1 {
        return Err(BoundaryViolation::Inconsistent {
            tokens: group.tokens.clone(),
            counts,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(tokens: &[&str], canonical: &str) -> AdvancedGroup {
        let mut group = AdvancedGroup::from_tokens(tokens.iter().copied());
        group.canonical = Some(canonical.to_string());
        group
    }

    #[test]
    fn test_single_word_phrases_pass() {
        assert_eq!(check_boundaries(&group(&["st", "street", "str"], "st")), Ok(()));
    }

    #[test]
    fn test_canonical_may_differ_in_length() {
        assert_eq!(
            check_boundaries(&group(&["gv", "gran via", "gran vía"], "gv")),
            Ok(())
        );
        assert_eq!(
            check_boundaries(&group(&["po box", "pobox", "p o box"], "pobox")),
            Err(BoundaryViolation::Inconsistent {
                tokens: vec!["po box".into(), "pobox".into(), "p o box".into()],
                counts: BTreeSet::from([1, 2]),
            })
        );
    }

    #[test]
    fn test_hyphenated_phrase_needs_declared_span() {
        let mut bahn = group(&["ubahn", "u-bahn"], "ubahn");
        assert!(matches!(
            check_boundaries(&bahn),
            Err(BoundaryViolation::SplitMismatch { tokenized: 1, split: 0, .. })
        ));

        bahn.span_boundaries = Some(1);
        assert_eq!(check_boundaries(&bahn), Ok(()));

        bahn.span_boundaries = Some(2);
        assert!(matches!(
            check_boundaries(&bahn),
            Err(BoundaryViolation::SpanMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_regex_groups_skip_the_count_check() {
        let mut ordinal = group(&["([0-9]+)(?:st|nd)", "([0-9]+)(?:er|e)"], "$1");
        ordinal.regex = Some(true);
        assert_eq!(check_boundaries(&ordinal), Ok(()));
    }

    #[test]
    fn test_all_canonical_multi_token_group_is_inconsistent() {
        assert!(matches!(
            check_boundaries(&group(&["st", "st"], "st")),
            Err(BoundaryViolation::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_count_boundaries() {
        assert_eq!(count_boundaries("post office box"), 2);
        assert_eq!(count_boundaries("12-14"), 0);
        assert_eq!(count_boundaries("st."), 0);
    }
}
