//! # geocoder-abbreviations
//!
//! Address tokenization and per-language abbreviation tables for geocoding.
//!
//! - [`tokenizing`] splits free-form addresses into tokens and separators
//! - [`compiling`] turns raw per-language tables into disjoint synonym groups,
//!   merging overlapping groups with [`merging`]
//! - [`sources`] supplies the raw tables: bundled, from a directory, or in memory
//! - [`validation`] checks advanced tables for schema and boundary problems
//!
//! ```rust,ignore
//! use geocoder_abbreviations::{compile, tokenize};
//!
//! let tokens = tokenize("12-14 Main St.");
//! assert_eq!(tokens.tokens, vec!["12-14", "main", "st"]);
//!
//! let german = compile(Some("de"), false, false)?;
//! ```

pub mod compiling;
pub mod formats;
pub mod merging;
pub mod settings;
pub mod sources;
pub mod tables;
pub mod tokenizing;
pub mod validation;

pub use compiling::{compile, CompileError, CompileOptions, Compiled, Compiler};
pub use tables::{AdvancedGroup, FlatGroup, TokenTable, GLOBAL_KEY};
pub use tokenizing::{tokenize, Tokenized};
