//! Dot-path access over nested JSON objects
//!
//! A path such as `"banners.2x"` names the key `2x` inside the object stored
//! under `banners`. Missing segments are a normal outcome, never an error.

use serde_json::{Map, Value};

const SEPARATOR: char = '.';

/// Looks up `path` inside `container`.
///
/// Returns `None` when a segment is missing or when an intermediate value is
/// not an object.
pub fn get<'a>(container: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(SEPARATOR)
        .try_fold(container, |current, segment| current.as_object()?.get(segment))
}

/// Same as [`get`] on an object root.
pub fn get_in<'a>(container: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let (head, rest) = match path.split_once(SEPARATOR) {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    let value = container.get(head)?;
    match rest {
        Some(rest) => get(value, rest),
        None => Some(value),
    }
}

/// Looks up `path`, cloning the value found or returning `default`.
pub fn get_or(container: &Value, path: &str, default: Value) -> Value {
    get(container, path).cloned().unwrap_or(default)
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// A non-object value met mid-path is replaced by a fresh object. Writing the
/// same path twice keeps the last value.
pub fn set<'a>(
    container: &'a mut Map<String, Value>,
    path: &str,
    value: Value,
) -> &'a mut Map<String, Value> {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    set_segments(container, &segments, value);
    container
}

fn set_segments(container: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            container.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = container
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(child) = slot {
                set_segments(child, rest, value);
            }
        }
    }
}
