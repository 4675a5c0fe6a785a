//! JSON output

use super::registry::{FormatError, Formatter};
use serde_json::Value;

/// Pretty-printed JSON
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, value: &Value) -> Result<String, FormatError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

/// Single-line JSON, the shape the data files use
pub struct CompactJsonFormatter;

impl Formatter for CompactJsonFormatter {
    fn name(&self) -> &str {
        "json-compact"
    }

    fn render(&self, value: &Value) -> Result<String, FormatError> {
        serde_json::to_string(value).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON on a single line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact() {
        let value = json!([["st", "street"]]);
        assert_eq!(
            CompactJsonFormatter.render(&value).unwrap(),
            r#"[["st","street"]]"#
        );
    }

    #[test]
    fn test_pretty_parses_back() {
        let value = json!({ "en": [["st", "street"]] });
        let text = JsonFormatter.render(&value).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), value);
    }
}
