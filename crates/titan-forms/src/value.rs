//! Coercions over submission values
//!
//! Submission data and layout attributes are untyped JSON on the wire. They
//! are carried as [`serde_json::Value`], which is already a closed variant
//! over string, number, bool, null, object and array, so every check below
//! is total.

use serde_json::Value;
use std::collections::HashMap;

/// A single submitted value
pub type FieldValue = Value;

/// Submission payload keyed by field name
pub type FormData = HashMap<String, FieldValue>;

/// Whether a value counts as "not provided".
///
/// Absent, `null`, whitespace-only strings, empty collections and `false`
/// (an unchecked checkbox) are empty.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(_)) => false,
    }
}

/// String form of a scalar value, `None` for null and collections.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric form of a value: JSON numbers, or strings that parse as a finite
/// float once trimmed.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parse a finite float from text
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Look up `key` in `data`, falling back to a dotted path through nested
/// objects when no top-level key matches.
pub fn lookup<'a>(data: &'a FormData, key: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(key) {
        return Some(value);
    }
    if !key.contains('.') {
        return None;
    }
    let mut segments = key.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
