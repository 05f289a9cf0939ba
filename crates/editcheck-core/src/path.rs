//! Dotted field path resolution over nested mapping structures.
//!
//! Paths such as `studentInfo.dateOfBirth` address values inside a nested
//! JSON object. Resolution is total: any path that cannot be walked (empty
//! path, missing segment, traversal into a non-mapping node) yields `None`
//! rather than an error. Paths never index into arrays; a segment that
//! lands on an array element resolves to `None`.

use serde_json::{Map, Value};

/// Resolve a dotted path against a record, returning the addressed value.
///
/// Returns `None` for an empty path, a missing segment, or when the walk
/// reaches a non-mapping node before the path is exhausted.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = record;
    for segment in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

/// Set the value at a dotted path, creating intermediate mapping nodes.
///
/// Any non-mapping node encountered along the way (including the leaf's
/// parent) is overwritten with an empty mapping. A no-op for empty paths.
pub fn assign(record: &mut Value, path: &str, value: Value) {
    if path.is_empty() {
        return;
    }
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = record;
    for segment in &segments[..segments.len() - 1] {
        current = ensure_object(current)
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    let leaf = segments[segments.len() - 1];
    ensure_object(current).insert(leaf.to_string(), value);
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}
