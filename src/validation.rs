//! Data-quality checks for compiled tables
//!
//! The compiler passes table contents through as-is. These checks are run by
//! callers (the `abbrev check` command, the test suite) on compiled output:
//!
//! - [`schema`]: every group has exactly the fields the format defines, with
//!   the right types and allowed values
//! - [`boundaries`]: the phrases of a group span a consistent number of token
//!   boundaries, matching what a naive space split would produce
//! - [`patterns`]: global rule patterns and the phrases of `regex` groups
//!   compile

pub mod boundaries;
pub mod patterns;
pub mod schema;

pub use boundaries::{check_boundaries, count_boundaries, BoundaryViolation};
pub use patterns::{check_pattern, check_regex_group, PatternViolation};
pub use schema::{validate_group, FieldKind, SchemaViolation};

use crate::tables::{AdvancedGroup, GlobalTable, TokenTable};
use serde_json::Value;
use std::fmt;

/// A problem with one group or rule of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Schema { group: usize, violation: SchemaViolation },
    Boundary { group: usize, violation: BoundaryViolation },
    Pattern { group: usize, violation: PatternViolation },
    /// A global rule whose pattern doesn't compile.
    Rule { rule: usize, violation: PatternViolation },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Schema { group, violation } => write!(f, "group {}: {}", group, violation),
            Finding::Boundary { group, violation } => write!(f, "group {}: {}", group, violation),
            Finding::Pattern { group, violation } => write!(f, "group {}: {}", group, violation),
            Finding::Rule { rule, violation } => write!(f, "rule {}: {}", rule, violation),
        }
    }
}

/// Run every check that applies to the table's shape. Flat tables have
/// nothing to check.
pub fn audit(table: &TokenTable) -> Vec<Finding> {
    let findings = match table {
        TokenTable::Advanced(groups) => audit_groups(groups),
        TokenTable::Global(rules) => audit_rules(rules),
        TokenTable::Flat(_) => Vec::new(),
    };

    tracing::debug!(entries = table.len(), findings = findings.len(), "audited table");
    findings
}

fn audit_groups(groups: &[AdvancedGroup]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        // Serialized form is the group as written, ill-typed fields included
        let value = Value::Object(group.clone().into());
        findings.extend(
            validate_group(&value)
                .into_iter()
                .map(|violation| Finding::Schema { group: index, violation }),
        );
        if let Err(violation) = check_boundaries(group) {
            findings.push(Finding::Boundary { group: index, violation });
        }
        findings.extend(
            check_regex_group(group)
                .into_iter()
                .map(|violation| Finding::Pattern { group: index, violation }),
        );
    }
    findings
}

fn audit_rules(table: &GlobalTable) -> Vec<Finding> {
    table
        .rules()
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            check_pattern(&rule.pattern)
                .err()
                .map(|violation| Finding::Rule { rule: index, violation })
        })
        .collect()
}
