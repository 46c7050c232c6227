//! Dotted-path access into JSON prompt documents.

use serde_json::Value;

/// Follows a dotted path such as `streamer.big` through nested objects.
/// Numeric segments index into arrays. Returns `None` as soon as a segment
/// is missing.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Turns a page route like `/streamer/big` into the key path `streamer.big`.
pub fn route_norm(path: &str) -> String {
    let mut chars = path.chars();
    chars.next();
    chars.as_str().replace('/', ".")
}
