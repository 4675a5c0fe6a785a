//! Output formats for compiled tables and tokenizations
//!
//! Results are converted to a JSON value first; each format renders that
//! value. `json` is the default.

pub mod json;
pub mod registry;
pub mod yaml;

pub use json::{CompactJsonFormatter, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use yaml::YamlFormatter;
