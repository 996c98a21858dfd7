//! Helpers shared by tool definitions for decoding call arguments and
//! declaring input schemas.
//!
//! Arguments arrive as a JSON object. Each tool decodes it into its own
//! params struct with serde, which rejects values of the wrong type. Presence
//! of mandatory fields is checked separately so that a missing field is
//! reported as such rather than as a generic decode failure.

use rmcp::model::JsonObject;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::{ToolError, ToolResult};

/// Decode a tool's arguments object into its params struct.
pub fn parse_arguments<T: DeserializeOwned>(arguments: JsonObject) -> ToolResult<T> {
    serde_json::from_value(Value::Object(arguments)).map_err(ToolError::from)
}

/// Return the value of a mandatory text argument.
///
/// Absent, empty and whitespace-only values all count as missing.
pub fn require_text<'a>(value: &'a Option<String>, name: &'static str) -> ToolResult<&'a str> {
    match value.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ToolError::missing(name)),
    }
}

/// Like [`require_text`], for a value passed as a positional argument.
///
/// A leading `-` would make `task-master` read the value as an option, so
/// such values are rejected.
pub fn require_positional<'a>(value: &'a Option<String>, name: &'static str) -> ToolResult<&'a str> {
    let text = require_text(value, name)?;
    if text.trim_start().starts_with('-') {
        return Err(ToolError::invalid_arguments(format!(
            "{} must not start with '-'",
            name
        )));
    }
    Ok(text)
}

/// Return the value of an optional text argument, treating "" as absent.
pub fn optional_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Deserialize an identifier that clients may send either as a string or a number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// Build an `object` input schema from its properties and required names.
pub fn object_schema(properties: Value, required: &[&str]) -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), properties);
    if !required.is_empty() {
        schema.insert("required".to_string(), serde_json::json!(required));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_or_number")]
        id: Option<String>,
        #[serde(default)]
        flag: Option<bool>,
    }

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_id_accepts_string_and_number() {
        let s: Sample = parse_arguments(object(json!({ "id": "1.2" }))).unwrap();
        assert_eq!(s.id.as_deref(), Some("1.2"));

        let n: Sample = parse_arguments(object(json!({ "id": 15 }))).unwrap();
        assert_eq!(n.id.as_deref(), Some("15"));

        let none: Sample = parse_arguments(object(json!({}))).unwrap();
        assert!(none.id.is_none());
    }

    #[test]
    fn test_wrong_type_is_invalid_arguments() {
        let err = parse_arguments::<Sample>(object(json!({ "id": ["x"] }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = parse_arguments::<Sample>(object(json!({ "flag": "yes" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(&Some("7".into()), "id").unwrap(), "7");
        assert!(matches!(
            require_text(&None, "id"),
            Err(ToolError::MissingArgument("id"))
        ));
        assert!(matches!(
            require_text(&Some("   ".into()), "id"),
            Err(ToolError::MissingArgument("id"))
        ));
    }

    #[test]
    fn test_require_positional_rejects_option_lookalikes() {
        assert_eq!(
            require_positional(&Some("what is -O3?".into()), "prompt").unwrap(),
            "what is -O3?"
        );
        assert!(matches!(
            require_positional(&Some(" --help".into()), "prompt"),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            require_positional(&None, "prompt"),
            Err(ToolError::MissingArgument("prompt"))
        ));
    }

    #[test]
    fn test_optional_text_skips_empty() {
        assert_eq!(optional_text(&Some(String::new())), None);
        assert_eq!(optional_text(&Some("high".into())), Some("high"));
        assert_eq!(optional_text(&None), None);
    }

    #[test]
    fn test_object_schema_omits_empty_required() {
        let schema = object_schema(json!({}), &[]);
        assert_eq!(schema.get("type"), Some(&json!("object")));
        assert!(!schema.contains_key("required"));

        let schema = object_schema(json!({ "id": { "type": "string" } }), &["id"]);
        assert_eq!(schema.get("required"), Some(&json!(["id"])));
    }
}
