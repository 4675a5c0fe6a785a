//! Token table shapes
//!
//! A per-language table arrives in one of three shapes:
//!
//! - flat: `[["st", "street"], ...]`, disjoint synonym groups
//! - advanced: `[{"tokens": [...], "full": ..., "canonical": ..., ...}, ...]`,
//!   possibly overlapping groups carrying metadata
//! - global: `{"<pattern>": "<template>", ...}`, structural rewrite rules
//!
//! [`TokenTable`] is the tagged form of all three. Providers hand out
//! [`RawSource`]s, which are either a table or a generator producing one.

mod document;
mod global;
mod group;

pub use document::{RawSource, TableGenerator, TokenTable};
pub use global::{GlobalRule, GlobalTable};
pub use group::{AdvancedGroup, FlatGroup, GroupType, UsePhase};

/// Key of the structural rewrite table in "all languages" results.
pub const GLOBAL_KEY: &str = "global";
