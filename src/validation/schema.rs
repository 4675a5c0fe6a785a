//! Advanced-group schema

use crate::tables::{GroupType, UsePhase};
use serde_json::Value;
use std::fmt;

/// JSON type a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Array,
    Boolean,
    Number,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Array => value.is_array(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Number => value.is_number(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Array => "array",
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
        }
    }
}

/// A way a group fails the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    NotAnObject(String),
    MissingField(&'static str),
    WrongType { field: &'static str, expected: FieldKind },
    DisallowedValue { field: &'static str, value: String },
    UnexpectedField(String),
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::NotAnObject(found) => write!(f, "group is not an object: {}", found),
            SchemaViolation::MissingField(field) => write!(f, "missing property {}", field),
            SchemaViolation::WrongType { field, expected } => {
                write!(f, "property {} should be type {}", field, expected.name())
            }
            SchemaViolation::DisallowedValue { field, value } => {
                write!(f, "property {} does not allow {}", field, value)
            }
            SchemaViolation::UnexpectedField(field) => write!(f, "unexpected property {}", field),
        }
    }
}

impl std::error::Error for SchemaViolation {}

struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    allowed: Option<fn(&str) -> bool>,
}

const fn rule(name: &'static str, kind: FieldKind, required: bool) -> FieldRule {
    FieldRule {
        name,
        kind,
        required,
        allowed: None,
    }
}

fn is_layer(value: &str) -> bool {
    value == "address"
}

fn is_use_phase(value: &str) -> bool {
    value.parse::<UsePhase>().is_ok()
}

fn is_group_type(value: &str) -> bool {
    value.parse::<GroupType>().is_ok()
}

const FIELDS: &[FieldRule] = &[
    rule("tokens", FieldKind::Array, true),
    rule("full", FieldKind::String, true),
    rule("canonical", FieldKind::String, true),
    rule("note", FieldKind::String, false),
    rule("onlyCountries", FieldKind::Array, false),
    FieldRule {
        allowed: Some(is_layer),
        ..rule("onlyLayers", FieldKind::Array, false)
    },
    FieldRule {
        allowed: Some(is_use_phase),
        ..rule("onlyUseWhile", FieldKind::Array, false)
    },
    rule("preferFull", FieldKind::Boolean, false),
    rule("regex", FieldKind::Boolean, false),
    rule("reduceRelevance", FieldKind::Boolean, false),
    rule("skipBoundaries", FieldKind::Boolean, false),
    rule("skipDiacriticStripping", FieldKind::Boolean, false),
    rule("spanBoundaries", FieldKind::Number, false),
    FieldRule {
        allowed: Some(is_group_type),
        ..rule("type", FieldKind::String, false)
    },
];

/// Check one advanced group, given as raw JSON.
pub fn validate_group(group: &Value) -> Vec<SchemaViolation> {
    let Some(object) = group.as_object() else {
        return vec![SchemaViolation::NotAnObject(group.to_string())];
    };

    let mut violations = Vec::new();
    for field in FIELDS {
        let Some(value) = object.get(field.name) else {
            if field.required {
                violations.push(SchemaViolation::MissingField(field.name));
            }
            continue;
        };

        if !field.kind.matches(value) {
            violations.push(SchemaViolation::WrongType {
                field: field.name,
                expected: field.kind,
            });
            continue;
        }

        if let Some(allowed) = field.allowed {
            let items: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            for item in items {
                if !item.as_str().is_some_and(allowed) {
                    violations.push(SchemaViolation::DisallowedValue {
                        field: field.name,
                        value: item.to_string(),
                    });
                }
            }
        }
    }

    for key in object.keys() {
        if !FIELDS.iter().any(|field| field.name == key) {
            violations.push(SchemaViolation::UnexpectedField(key.clone()));
        }
    }

    violations
}
