// ABOUTME: Dotted-path resolution against nested JSON data
// ABOUTME: Resolves keys like `a.b.c`, `items[0].name` or `items.0.name`

use serde_json::Value as JsonValue;

/// Resolve a dotted path against `data`.
///
/// A key present literally at the top level (e.g. `"a.b"`) wins over
/// path splitting. An empty path never resolves. JSON `null` is a
/// defined value and is returned as such; only absence yields `None`.
pub fn resolve<'a>(data: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    if path.is_empty() {
        return None;
    }

    if let Some(value) = data.as_object().and_then(|map| map.get(path)) {
        return Some(value);
    }

    let mut current = data;
    for segment in segments(path) {
        current = step(current, &segment)?;
    }
    Some(current)
}

/// Resolve a dotted path, returning `fallback` untouched when absent
pub fn resolve_or<'a>(
    data: &'a JsonValue,
    path: &str,
    fallback: Option<&'a JsonValue>,
) -> Option<&'a JsonValue> {
    resolve(data, path).or(fallback)
}

fn step<'a>(value: &'a JsonValue, segment: &str) -> Option<&'a JsonValue> {
    match value {
        JsonValue::Object(map) => map.get(segment),
        JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Split a path into segments, honouring `.` separators and `[..]` brackets.
///
/// Bracket contents may be quoted (`a["x.y"]`), in which case dots, brackets
/// and other quote characters inside the quotes are part of the segment.
pub fn segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut after_bracket = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !after_bracket {
                    segments.push(std::mem::take(&mut current));
                }
                after_bracket = false;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let quote = match chars.peek() {
                    Some(&q) if q == '"' || q == '\'' => {
                        chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut inner = String::new();
                while let Some(c) = chars.next() {
                    match quote {
                        Some(q) if c == q && chars.peek() == Some(&']') => {
                            chars.next();
                            break;
                        }
                        None if c == ']' => break,
                        _ => inner.push(c),
                    }
                }
                segments.push(inner);
                after_bracket = true;
            }
            _ => {
                after_bracket = false;
                current.push(c);
            }
        }
    }

    if !current.is_empty() || !after_bracket {
        segments.push(current);
    }

    segments
}
