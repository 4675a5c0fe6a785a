//! Tagged table documents and the sources that produce them

use super::global::GlobalTable;
use super::group::{AdvancedGroup, FlatGroup};
use crate::merging;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A table in one of the three shapes providers may hand out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenTable {
    Flat(Vec<FlatGroup>),
    Advanced(Vec<AdvancedGroup>),
    Global(GlobalTable),
}

impl TokenTable {
    /// Decide the shape from the JSON value.
    ///
    /// Arrays of objects are advanced, arrays of arrays (and the empty array)
    /// are flat, and objects are global rule tables.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let advanced = match &value {
            Value::Array(items) => items.first().is_some_and(Value::is_object),
            _ => false,
        };
        match value {
            Value::Object(_) => serde_json::from_value(value).map(TokenTable::Global),
            _ if advanced => serde_json::from_value(value).map(TokenTable::Advanced),
            _ => serde_json::from_value(value).map(TokenTable::Flat),
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(source)?)
    }

    pub fn len(&self) -> usize {
        match self {
            TokenTable::Flat(groups) => groups.len(),
            TokenTable::Advanced(groups) => groups.len(),
            TokenTable::Global(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_global(&self) -> bool {
        matches!(self, TokenTable::Global(_))
    }

    /// Drop groups with fewer than two tokens. Global tables are untouched.
    pub fn without_singletons(self) -> Self {
        match self {
            TokenTable::Flat(groups) => {
                TokenTable::Flat(groups.into_iter().filter(|g| g.len() >= 2).collect())
            }
            TokenTable::Advanced(groups) => {
                TokenTable::Advanced(groups.into_iter().filter(|g| !g.is_singleton()).collect())
            }
            global @ TokenTable::Global(_) => global,
        }
    }

    /// Merge advanced groups into disjoint flat groups.
    ///
    /// Flat and global tables pass through unchanged.
    pub fn flattened(self) -> Self {
        match self {
            TokenTable::Advanced(groups) => TokenTable::Flat(merging::flatten(&groups)),
            other => other,
        }
    }
}

/// Produces a table on demand, for tables that are computed rather than stored.
pub type TableGenerator = Arc<dyn Fn() -> TokenTable + Send + Sync>;

/// What a provider returns for a language: a table, or a way to make one.
#[derive(Clone)]
pub enum RawSource {
    Table(TokenTable),
    Generator(TableGenerator),
}

impl RawSource {
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn() -> TokenTable + Send + Sync + 'static,
    {
        RawSource::Generator(Arc::new(f))
    }

    /// Run the generator, if any, and return the table.
    pub fn resolve(self) -> TokenTable {
        match self {
            RawSource::Table(table) => table,
            RawSource::Generator(generate) => generate(),
        }
    }
}

impl From<TokenTable> for RawSource {
    fn from(table: TokenTable) -> Self {
        RawSource::Table(table)
    }
}

impl fmt::Debug for RawSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawSource::Table(table) => f.debug_tuple("Table").field(table).finish(),
            RawSource::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}
