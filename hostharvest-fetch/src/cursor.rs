//! Next-cursor extraction.

use hostharvest_core::{CursorPath, Page};
use serde_json::Value;

/// Walks `page` along `path` and returns the next cursor, if any.
///
/// The walk yields `None` as soon as a step is not an object or lacks the
/// key. A terminal value that is falsy (null, `false`, zero, an empty string,
/// an empty array or object) also yields `None`, which ends pagination.
pub fn next_cursor(page: &Page, path: &CursorPath) -> Option<String> {
    let mut current = page;
    for key in path.keys() {
        current = current.as_object()?.get(key)?;
    }
    cursor_value(current)
}

fn cursor_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
