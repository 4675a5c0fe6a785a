//! The table compiler

use super::options::CompileOptions;
use crate::sources::{BundledSource, SourceError, TokenSource};
use crate::tables::{RawSource, TokenTable, GLOBAL_KEY};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Errors during compilation
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A language code was given but is not two characters long.
    InvalidLanguageCode(String),
    Source(SourceError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::InvalidLanguageCode(code) => {
                write!(f, "Invalid language code '{}': expected 2 characters", code)
            }
            CompileError::Source(e) => write!(f, "Token source failed: {}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Source(e) => Some(e),
            CompileError::InvalidLanguageCode(_) => None,
        }
    }
}

impl From<SourceError> for CompileError {
    fn from(e: SourceError) -> Self {
        CompileError::Source(e)
    }
}

/// Result of a compile request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Compiled {
    /// One language's table.
    Single(TokenTable),
    /// Every language's table, plus `global`.
    All(BTreeMap<String, TokenTable>),
}

/// Whether `code` is shaped like a language code.
pub fn is_language_code(code: &str) -> bool {
    code.chars().count() == 2
}

/// Compiles tables from a token source.
#[derive(Debug, Clone, Default)]
pub struct Compiler<S = BundledSource> {
    source: S,
    options: CompileOptions,
}

impl Compiler<BundledSource> {
    /// A compiler over the bundled tables with default options.
    pub fn new() -> Self {
        Self::with_source(BundledSource)
    }
}

impl<S: TokenSource> Compiler<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Compile one language, or every language when `code` is `None`.
    pub fn compile(&self, code: Option<&str>) -> Result<Compiled, CompileError> {
        match code {
            Some(code) => self.compile_language(code).map(Compiled::Single),
            None => self.compile_all().map(Compiled::All),
        }
    }

    /// Compile one language. A language without a table yields an empty list.
    #[tracing::instrument(level = "debug", skip(self), fields(
        singletons = self.options.include_singletons,
        advanced = self.options.advanced,
    ))]
    pub fn compile_language(&self, code: &str) -> Result<TokenTable, CompileError> {
        if !is_language_code(code) {
            return Err(CompileError::InvalidLanguageCode(code.to_string()));
        }

        match self.source.load(code)? {
            Some(raw) => Ok(self.process(raw)),
            None => {
                tracing::debug!(code, "no token table for language");
                Ok(self.empty())
            }
        }
    }

    /// Compile every language the source lists, plus the global table.
    #[tracing::instrument(level = "debug", skip_all, fields(parallel = self.options.parallel))]
    pub fn compile_all(&self) -> Result<BTreeMap<String, TokenTable>, CompileError> {
        let codes: Vec<String> = self
            .source
            .language_codes()?
            .into_iter()
            .filter(|code| is_language_code(code))
            .collect();

        let compile_one = |code: &String| -> Result<(String, TokenTable), CompileError> {
            Ok((code.clone(), self.compile_language(code)?))
        };
        let mut tables: BTreeMap<String, TokenTable> = if self.options.parallel {
            codes.par_iter().map(compile_one).collect::<Result<_, _>>()?
        } else {
            codes.iter().map(compile_one).collect::<Result<_, _>>()?
        };

        if let Some(global) = self.source.load(GLOBAL_KEY)? {
            tables.insert(GLOBAL_KEY.to_string(), global.resolve());
        }

        tracing::debug!(languages = codes.len(), "compiled all token tables");
        Ok(tables)
    }

    fn process(&self, raw: RawSource) -> TokenTable {
        let table = raw.resolve();
        if table.is_global() {
            return table;
        }

        let table = if self.options.include_singletons {
            table
        } else {
            table.without_singletons()
        };

        if self.options.advanced {
            table
        } else {
            table.flattened()
        }
    }

    fn empty(&self) -> TokenTable {
        if self.options.advanced {
            TokenTable::Advanced(Vec::new())
        } else {
            TokenTable::Flat(Vec::new())
        }
    }
}

/// Compile from the bundled tables.
///
/// `compile(Some("de"), false, false)` gives German as merged flat groups
/// without singletons; `compile(None, ..)` gives every language and `global`.
pub fn compile(
    code: Option<&str>,
    include_singletons: bool,
    advanced: bool,
) -> Result<Compiled, CompileError> {
    Compiler::new()
        .with_options(CompileOptions::new(include_singletons, advanced))
        .compile(code)
}
