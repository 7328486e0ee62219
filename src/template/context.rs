// ABOUTME: Data object construction for template substitution
// ABOUTME: Loads JSON/YAML sources, deep-merges them and applies dotted key overrides

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use super::error::{Result, TemplateError};
use super::lookup;

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            _ => Err(TemplateError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// The data object placeholders are resolved against.
///
/// Always an object at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateData {
    root: JsonValue,
}

impl TemplateData {
    pub fn new() -> Self {
        Self {
            root: JsonValue::Object(Map::new()),
        }
    }

    /// Wrap an existing JSON value, which must be an object
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(_) => Ok(Self { root: value }),
            other => Err(TemplateError::InvalidDataType(type_name(&other).to_string())),
        }
    }

    /// Serialize any value into a data object
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Self::from_json(serde_json::to_value(value)?)
    }

    /// Parse data text in the given format
    pub fn parse(content: &str, format: DataFormat) -> Result<Self> {
        let value: JsonValue = match format {
            DataFormat::Json => serde_json::from_str(content)?,
            DataFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Self::from_json(value)
    }

    /// Load a data file, choosing the format from its extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Insert `value` at a dotted path, creating intermediate objects.
    ///
    /// Intermediate values that are not objects are replaced.
    pub fn set(&mut self, path: &str, value: JsonValue) {
        let segments = lookup::segments(path);
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = ensure_object(current)
                .entry(segment.clone())
                .or_insert_with(|| JsonValue::Object(Map::new()));
        }
        ensure_object(current).insert(last.clone(), value);
    }

    /// Deep-merge another data object into this one; `other` wins on conflicts
    pub fn merge(&mut self, other: TemplateData) {
        merge_values(&mut self.root, other.root);
    }

    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        lookup::resolve(&self.root, path)
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.root
    }

    pub fn into_json(self) -> JsonValue {
        self.root
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_object(value: &mut JsonValue) -> &mut Map<String, JsonValue> {
    if !value.is_object() {
        *value = JsonValue::Object(Map::new());
    }
    match value {
        JsonValue::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

fn merge_values(target: &mut JsonValue, source: JsonValue) {
    match (target, source) {
        (JsonValue::Object(target), JsonValue::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Short name of a JSON value's type, used in error messages
pub fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
