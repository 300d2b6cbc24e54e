//! Raw string to [`Value`] conversion.

use crate::field::{SemanticType, Value};

/// Coerces `raw` into `semantic_type`.
///
/// Returns `None` when the text doesn't parse; strings and string lists
/// always succeed.
pub fn coerce(raw: &str, semantic_type: SemanticType, delimiter: &str) -> Option<Value> {
    match semantic_type {
        SemanticType::String => Some(Value::String(raw.to_string())),
        SemanticType::Bool => parse_bool(raw).map(Value::Bool),
        SemanticType::Int => parse_int(raw).map(Value::Int),
        SemanticType::StringList => Some(Value::StringList(split_list(raw, delimiter))),
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Base-10 signed integer with an optional leading sign.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

/// Trims delimiter characters from both ends, then splits on the delimiter.
///
/// An empty remainder yields a single empty element. An empty delimiter
/// splits into characters.
pub fn split_list(raw: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return raw.chars().map(String::from).collect();
    }

    raw.trim_matches(|c: char| delimiter.contains(c))
        .split(delimiter)
        .map(String::from)
        .collect()
}

/// Phrase used in `InvalidValue` messages
pub(crate) fn expected_phrase(semantic_type: SemanticType) -> &'static str {
    match semantic_type {
        SemanticType::Bool => "a boolean",
        SemanticType::Int => "an int",
        SemanticType::String => "a string",
        SemanticType::StringList => "a string list",
    }
}
