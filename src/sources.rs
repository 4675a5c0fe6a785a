//! Token-source providers
//!
//! A provider knows which language tables exist and hands out the raw table
//! (or a generator for it) by code. The compiler only ever reads from it.
//!
//! - [`BundledSource`]: tables compiled into the crate
//! - [`DirectorySource`]: `<code>.json` files in a directory
//! - [`MemorySource`]: tables registered at runtime
//! - [`CachingSource`]: memoizes resolved tables of another provider

mod bundled;
mod caching;
mod directory;
mod memory;

pub use bundled::BundledSource;
pub use caching::CachingSource;
pub use directory::DirectorySource;
pub use memory::MemorySource;

use crate::tables::RawSource;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while reading raw tables
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The backing store could not be read.
    Io { path: PathBuf, message: String },
    /// A table was found but is not valid table JSON.
    Malformed { code: String, message: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, message } => {
                write!(f, "Failed to read '{}': {}", path.display(), message)
            }
            SourceError::Malformed { code, message } => {
                write!(f, "Malformed token table '{}': {}", code, message)
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Supplies raw per-language tables by code.
pub trait TokenSource: Send + Sync {
    /// Codes with a table available. Does not include the global table.
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError>;

    /// The raw table for `code`, or `None` if there is none. The global table
    /// is requested with [`crate::tables::GLOBAL_KEY`].
    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError>;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        (**self).language_codes()
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        (**self).load(code)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        (**self).language_codes()
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        (**self).load(code)
    }
}

/// Parse table JSON, tagging failures with the code they belong to.
pub(crate) fn parse_table(code: &str, json: &str) -> Result<RawSource, SourceError> {
    crate::tables::TokenTable::from_json_str(json)
        .map(RawSource::Table)
        .map_err(|e| SourceError::Malformed {
            code: code.to_string(),
            message: e.to_string(),
        })
}
