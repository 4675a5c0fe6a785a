//! Tables registered at runtime

use super::{SourceError, TokenSource};
use crate::tables::{RawSource, TokenTable, GLOBAL_KEY};
use std::collections::{BTreeMap, BTreeSet};

/// An in-memory provider. Useful for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, RawSource>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a static table, replacing any previous entry for `code`.
    pub fn insert(&mut self, code: impl Into<String>, table: TokenTable) {
        self.entries.insert(code.into(), RawSource::Table(table));
    }

    /// Register a table produced on every load.
    pub fn insert_generator<F>(&mut self, code: impl Into<String>, generate: F)
    where
        F: Fn() -> TokenTable + Send + Sync + 'static,
    {
        self.entries
            .insert(code.into(), RawSource::generator(generate));
    }

    pub fn with(mut self, code: impl Into<String>, table: TokenTable) -> Self {
        self.insert(code, table);
        self
    }
}

impl TokenSource for MemorySource {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        Ok(self
            .entries
            .keys()
            .filter(|code| code.as_str() != GLOBAL_KEY)
            .cloned()
            .collect())
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        Ok(self.entries.get(code).cloned())
    }
}
