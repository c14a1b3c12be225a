//! Shallow structural merge for JSON objects.

use serde_json::{Map, Value};

/// Copy every top-level entry of `source` into `target`, overwriting existing keys.
///
/// Nested objects are replaced, not merged.
pub fn extend(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}
