//! Field probing helpers shared by the extractors
//!
//! Producers disagree on field names (`id` vs `name`, `hash` vs `digest`, ...), so most
//! lookups are a chain of candidate keys where the first "truthy" value wins.

use serde_json::{Map, Value};

/// Whether a value counts as present in a synonym chain.
///
/// `null`, `false`, zero, and empty strings/arrays/objects are all treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// First truthy value among `keys`, in order.
pub fn first_truthy<'v>(map: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| is_truthy(value))
}

/// First truthy value among `keys`, rendered with [`display_value`].
pub fn first_display(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_truthy(map, keys).map(display_value)
}

/// First truthy array among `keys`.
///
/// Mirrors `a or b or c`: the first truthy candidate is taken even if it is not an
/// array, in which case the result is `None`.
pub fn first_array<'v>(map: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Vec<Value>> {
    first_truthy(map, keys).and_then(Value::as_array)
}

/// Human-facing rendering of a scalar: strings unquoted, `null` as `none`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

/// Like [`display_value`] but for an optional lookup.
pub fn display_opt(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_else(|| "none".to_string())
}
