// ABOUTME: Placeholder substitution engine
// ABOUTME: Compiles delimiters into a matcher and splices resolved values into templates

use regex::Regex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, trace, warn};

use super::context::{type_name, TemplateData};
use super::error::{Result, TemplateError};
use super::inspect::inspect;
use super::lookup;
use super::options::ReplacerOptions;
use super::placeholder::Placeholder;
use super::transforms::Substitution;

/// Text handed to the transform when a key is missing and missing keys are ignored
pub const UNDEFINED: &str = "undefined";

/// Replaces delimiter-bounded placeholders with values from a data object.
///
/// Configuration is fixed at construction; every call to [`Replacer::replace`]
/// is independent, so one instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Replacer {
    options: ReplacerOptions,
    pattern: Regex,
}

impl Replacer {
    /// Validate the options and compile the placeholder matcher
    pub fn new(options: ReplacerOptions) -> Result<Self> {
        options.delimiters.validate()?;

        // Delimiters are literal text; the inner group is lazy and spans lines.
        let pattern = Regex::new(&format!(
            "(?s){}(.*?){}",
            regex::escape(&options.delimiters.starting),
            regex::escape(&options.delimiters.closing)
        ))?;

        debug!(
            "Replacer compiled for delimiters {:?} ... {:?} (ignore_missing: {}, transform: {})",
            options.delimiters.starting,
            options.delimiters.closing,
            options.ignore_missing,
            options.transform.name()
        );

        Ok(Self { options, pattern })
    }

    pub fn options(&self) -> &ReplacerOptions {
        &self.options
    }

    /// Replace every placeholder in `template` with its value from `data`.
    ///
    /// Fails on the first key that resolves to nothing when missing keys
    /// are not ignored; later placeholders are never evaluated.
    pub fn replace(&self, template: &str, data: &JsonValue) -> Result<String> {
        ensure_data(data)?;

        let mut output = String::with_capacity(template.len());
        let mut last_end = 0;

        for placeholder in self.scan(template) {
            output.push_str(&template[last_end..placeholder.span.start]);
            output.push_str(&self.substitute(&placeholder, data)?);
            last_end = placeholder.span.end;
        }
        output.push_str(&template[last_end..]);

        Ok(output)
    }

    /// Like [`Replacer::replace`], for templates that arrive as untyped JSON
    pub fn replace_value(&self, template: &JsonValue, data: &JsonValue) -> Result<String> {
        match template {
            JsonValue::String(template) => self.replace(template, data),
            other => Err(TemplateError::InvalidTemplateType(
                type_name(other).to_string(),
            )),
        }
    }

    /// Serialize `data` into a data object and replace against it
    pub fn replace_serialize<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        let data = TemplateData::from_serialize(data)?;
        self.replace(template, data.as_json())
    }

    /// Recursively replace placeholders in every string of a JSON document.
    ///
    /// Object keys are substituted too; two keys of one object that render
    /// to the same text are rejected rather than merged.
    pub fn replace_json(&self, value: &JsonValue, data: &JsonValue) -> Result<JsonValue> {
        ensure_data(data)?;

        match value {
            JsonValue::String(s) => Ok(JsonValue::String(self.replace(s, data)?)),
            JsonValue::Array(items) => {
                let resolved: Result<Vec<JsonValue>> = items
                    .iter()
                    .map(|item| self.replace_json(item, data))
                    .collect();
                Ok(JsonValue::Array(resolved?))
            }
            JsonValue::Object(map) => {
                let mut resolved = serde_json::Map::new();
                for (key, val) in map {
                    let resolved_key = if self.has_placeholders(key) {
                        self.replace(key, data)?
                    } else {
                        key.clone()
                    };
                    if resolved.contains_key(&resolved_key) {
                        return Err(TemplateError::DuplicateKey(resolved_key));
                    }
                    resolved.insert(resolved_key, self.replace_json(val, data)?);
                }
                Ok(JsonValue::Object(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    /// All placeholders in `template`, in order of appearance
    pub fn placeholders(&self, template: &str) -> Vec<Placeholder> {
        self.scan(template).collect()
    }

    /// Keys that would fail as missing, in template order without repeats
    pub fn missing_keys(&self, template: &str, data: &JsonValue) -> Result<Vec<String>> {
        ensure_data(data)?;

        let mut missing: Vec<String> = Vec::new();
        for placeholder in self.scan(template) {
            if placeholder.has_default() || lookup::resolve(data, &placeholder.key).is_some() {
                continue;
            }
            if !missing.contains(&placeholder.key) {
                missing.push(placeholder.key);
            }
        }
        Ok(missing)
    }

    /// Check whether `text` contains at least one complete placeholder
    pub fn has_placeholders(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    fn scan<'t>(&'t self, template: &'t str) -> impl Iterator<Item = Placeholder> + 't {
        self.pattern.captures_iter(template).filter_map(|caps| {
            let span = caps.get(0)?;
            let expression = caps.get(1)?;
            Some(Placeholder::parse(span.range(), expression.as_str()))
        })
    }

    fn substitute(&self, placeholder: &Placeholder, data: &JsonValue) -> Result<String> {
        // A default is plain text, so inspect hands it back verbatim.
        let default = placeholder.default.clone().map(JsonValue::String);
        let value = match lookup::resolve_or(data, &placeholder.key, default.as_ref()) {
            Some(value) => inspect(value),
            None if self.options.ignore_missing => {
                warn!("Template key '{}' is missing, leaving it undefined", placeholder.key);
                UNDEFINED.to_string()
            }
            None => return Err(TemplateError::MissingKey(placeholder.key.clone())),
        };

        trace!(
            "Substituting '{}' at {}..{}",
            placeholder.key,
            placeholder.span.start,
            placeholder.span.end
        );

        Ok(self.options.transform.apply(&Substitution {
            value: &value,
            key: &placeholder.key,
            default: placeholder.default.as_deref(),
        }))
    }
}

impl Default for Replacer {
    fn default() -> Self {
        Self::new(ReplacerOptions::default()).expect("Failed to create default replacer")
    }
}

fn ensure_data(data: &JsonValue) -> Result<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(TemplateError::InvalidDataType(type_name(data).to_string()))
    }
}
