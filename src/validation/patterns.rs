//! Regular expressions that have to compile

use crate::tables::AdvancedGroup;
use regex::Regex;
use std::fmt;

/// A pattern the regex engine rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternViolation {
    pub pattern: String,
    pub message: String,
}

impl fmt::Display for PatternViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern '{}' does not compile: {}", self.pattern, self.message)
    }
}

impl std::error::Error for PatternViolation {}

pub fn check_pattern(pattern: &str) -> Result<(), PatternViolation> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| PatternViolation {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Every token of a `regex` group, and its `full` form, must compile.
/// Literal groups have nothing to check.
pub fn check_regex_group(group: &AdvancedGroup) -> Vec<PatternViolation> {
    if !group.is_regex() {
        return Vec::new();
    }

    let mut patterns: Vec<&str> = group.tokens.iter().map(String::as_str).collect();
    if let Some(full) = group.full.as_deref() {
        if !patterns.contains(&full) {
            patterns.push(full);
        }
    }

    patterns
        .into_iter()
        .filter_map(|pattern| check_pattern(pattern).err())
        .collect()
}
