//! Token table compilation
//!
//! Turns raw per-language tables into what matching consumes:
//!
//! 1. fetch the raw table from a [`TokenSource`](crate::sources::TokenSource)
//!    and run its generator, if it has one
//! 2. drop singleton groups unless asked to keep them
//! 3. merge advanced groups into disjoint flat groups unless the advanced form
//!    was requested
//!
//! The global rule table skips steps 2 and 3.

mod compiler;
mod options;

pub use compiler::{compile, is_language_code, CompileError, Compiled, Compiler};
pub use options::CompileOptions;
