//! Compile options

use serde::Deserialize;

/// Knobs for a compile request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Keep groups with fewer than two tokens.
    pub include_singletons: bool,
    /// Return advanced groups instead of merged flat groups.
    pub advanced: bool,
    /// Compile languages concurrently when compiling all of them.
    pub parallel: bool,
}

impl CompileOptions {
    pub fn new(include_singletons: bool, advanced: bool) -> Self {
        Self {
            include_singletons,
            advanced,
            ..Self::default()
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_singletons: false,
            advanced: false,
            parallel: true,
        }
    }
}
