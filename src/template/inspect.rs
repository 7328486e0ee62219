// ABOUTME: Human-readable rendering of structured values spliced into templates
// ABOUTME: Bounded-depth pretty printer for JSON objects and arrays

use serde_json::{Map, Value as JsonValue};

/// Containers nested deeper than this render as `[Object]` / `[Array]`
pub const MAX_DEPTH: usize = 4;

/// Entries fitting within this width stay on a single line
const LINE_WIDTH: usize = 72;

/// Render a value the way it is shown when spliced into a template.
///
/// Objects and arrays are dumped structurally up to [`MAX_DEPTH`] levels
/// below the top. Short containers stay on one line (`{ a: 1, b: 'x' }`),
/// longer ones break into one entry per line with two-space indentation.
/// Strings nested inside containers are single-quoted; a top-level string
/// is returned as-is.
pub fn inspect(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => render(other, 0),
    }
}

fn render(value: &JsonValue, depth: usize) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => quote(s),
        JsonValue::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if depth > MAX_DEPTH {
                return "[Array]".to_string();
            }
            let entries: Vec<String> = items.iter().map(|item| render(item, depth + 1)).collect();
            wrap('[', ']', entries)
        }
        JsonValue::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            if depth > MAX_DEPTH {
                return "[Object]".to_string();
            }
            wrap('{', '}', object_entries(map, depth))
        }
    }
}

fn object_entries(map: &Map<String, JsonValue>, depth: usize) -> Vec<String> {
    map.iter()
        .map(|(key, value)| format!("{}: {}", format_key(key), render(value, depth + 1)))
        .collect()
}

fn wrap(open: char, close: char, entries: Vec<String>) -> String {
    let single_line_width = entries.iter().map(|e| e.chars().count() + 2).sum::<usize>() + 2;
    let multi_line_entry = entries.iter().any(|e| e.contains('\n'));

    if !multi_line_entry && single_line_width <= LINE_WIDTH {
        return format!("{} {} {}", open, entries.join(", "), close);
    }

    let mut out = String::new();
    out.push(open);
    for (i, entry) in entries.iter().enumerate() {
        out.push('\n');
        for (j, line) in entry.lines().enumerate() {
            if j > 0 {
                out.push('\n');
            }
            out.push_str("  ");
            out.push_str(line);
        }
        if i + 1 < entries.len() {
            out.push(',');
        }
    }
    out.push('\n');
    out.push(close);
    out
}

fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
