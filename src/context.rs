//! Parsing of the `--extra-context` value into template variables.

use crate::error::{Error, Result};
use log::debug;

/// Template variable overrides supplied on the command line.
pub type ContextMap = serde_json::Map<String, serde_json::Value>;

/// Parses `raw` as a JSON object.
///
/// Values are kept verbatim, so nested objects and arrays reach the
/// templates untouched. Anything that is not an object at the top level
/// is rejected.
///
/// # Errors
/// * `Error::InvalidContext` if `raw` is malformed JSON or not an object
pub fn parse_extra_context(raw: &str) -> Result<ContextMap> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| Error::InvalidContext(e.to_string()))?;

    match value {
        serde_json::Value::Object(map) => {
            debug!("Parsed {} extra context value(s)", map.len());
            Ok(map)
        }
        other => Err(Error::InvalidContext(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
