//! YAML output

use super::registry::{FormatError, Formatter};
use serde_json::Value;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn render(&self, value: &Value) -> Result<String, FormatError> {
        serde_yaml::to_string(value).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML document"
    }
}
