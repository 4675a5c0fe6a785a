//! Structural rewrite rules (the `global` table)

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One `pattern -> template` rewrite. Templates use `$n` group references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRule {
    pub pattern: String,
    pub replacement: String,
}

/// Ordered rewrite rules, serialized as a JSON object in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct GlobalTable {
    rules: Vec<GlobalRule>,
}

impl GlobalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. A rule with the same pattern is replaced in place.
    pub fn insert(&mut self, pattern: impl Into<String>, replacement: impl Into<String>) {
        let pattern = pattern.into();
        let replacement = replacement.into();
        match self.rules.iter_mut().find(|r| r.pattern == pattern) {
            Some(rule) => rule.replacement = replacement,
            None => self.rules.push(GlobalRule {
                pattern,
                replacement,
            }),
        }
    }

    pub fn rules(&self) -> &[GlobalRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile every pattern, failing on the first invalid one.
    pub fn compile_rules(&self) -> Result<Vec<(Regex, &str)>, regex::Error> {
        self.rules
            .iter()
            .map(|rule| Ok((Regex::new(&rule.pattern)?, rule.replacement.as_str())))
            .collect()
    }

    /// Apply all rules to `text`, in order.
    pub fn apply(&self, text: &str) -> Result<String, regex::Error> {
        let mut out = text.to_string();
        for (regex, replacement) in self.compile_rules()? {
            out = regex.replace_all(&out, replacement).into_owned();
        }
        Ok(out)
    }
}

/// Raised when a global table holds a non-string template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonStringTemplate(pub String);

impl fmt::Display for NonStringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replacement for pattern '{}' is not a string", self.0)
    }
}

impl std::error::Error for NonStringTemplate {}

impl TryFrom<Map<String, Value>> for GlobalTable {
    type Error = NonStringTemplate;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut table = GlobalTable::new();
        for (pattern, replacement) in map {
            match replacement {
                Value::String(replacement) => table.insert(pattern, replacement),
                _ => return Err(NonStringTemplate(pattern)),
            }
        }
        Ok(table)
    }
}

impl From<GlobalTable> for Map<String, Value> {
    fn from(table: GlobalTable) -> Self {
        table
            .rules
            .into_iter()
            .map(|rule| (rule.pattern, Value::String(rule.replacement)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keeps_rule_order() {
        let table: GlobalTable = serde_json::from_value(json!({
            "b+": "B",
            "a+": "A"
        }))
        .unwrap();
        let patterns: Vec<_> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["b+", "a+"]);
    }

    #[test]
    fn test_rejects_non_string_template() {
        let result: Result<GlobalTable, _> = serde_json::from_value(json!({ "a": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_uses_group_references() {
        let mut table = GlobalTable::new();
        table.insert(r"^(\d+) (\w+)$", "$2 $1");
        assert_eq!(table.apply("12 main").unwrap(), "main 12");
    }

    #[test]
    fn test_insert_replaces_existing_pattern() {
        let mut table = GlobalTable::new();
        table.insert("x", "1");
        table.insert("x", "2");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].replacement, "2");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut table = GlobalTable::new();
        table.insert("(unclosed", "");
        assert!(table.compile_rules().is_err());
    }
}
