//! Caller-owned memoization of resolved tables

use super::{SourceError, TokenSource};
use crate::tables::{RawSource, TokenTable};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Wraps a provider and keeps every table it resolves, generators included,
/// for as long as the wrapper lives. Misses are remembered too.
#[derive(Debug)]
pub struct CachingSource<S> {
    inner: S,
    cache: Mutex<HashMap<String, Option<TokenTable>>>,
}

impl<S: TokenSource> CachingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of codes currently cached, hits and misses alike.
    pub fn cached(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Option<TokenTable>>> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: TokenSource> TokenSource for CachingSource<S> {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        self.inner.language_codes()
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        if let Some(cached) = self.lock().get(code) {
            tracing::trace!(code, "token table cache hit");
            return Ok(cached.clone().map(RawSource::Table));
        }

        let table = self.inner.load(code)?.map(RawSource::resolve);
        self.lock().insert(code.to_string(), table.clone());
        Ok(table.map(RawSource::Table))
    }
}
