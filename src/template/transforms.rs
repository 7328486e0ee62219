// ABOUTME: Transform hook applied to every resolved value before it is spliced
// ABOUTME: Wraps caller closures and provides the built-in named transforms

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;
use std::sync::Arc;

use super::error::{Result, TemplateError};

/// Names accepted by [`Transform::builtin`]
pub const BUILTIN_TRANSFORMS: &[&str] =
    &["identity", "upper", "lower", "trim", "base64", "json", "shell"];

/// Everything the transform hook gets to see for one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution<'a> {
    /// Resolved value, already rendered as text
    pub value: &'a str,
    /// Trimmed lookup key
    pub key: &'a str,
    /// Raw default expression, if the placeholder carried one
    pub default: Option<&'a str>,
}

type TransformFn = dyn Fn(&Substitution<'_>) -> String + Send + Sync;

/// Post-processing step producing the replacement text for a placeholder.
///
/// Whatever the wrapped closure returns is converted with `to_string`,
/// so a closure returning `false` or `0` splices `"false"` or `"0"`.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wrap a caller-supplied closure
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn(&Substitution<'_>) -> R + Send + Sync + 'static,
        R: fmt::Display,
    {
        Self {
            name: "custom".to_string(),
            func: Arc::new(move |s: &Substitution<'_>| func(s).to_string()),
        }
    }

    /// Passes the rendered value through unchanged
    pub fn identity() -> Self {
        Self::named("identity", |s| s.value.to_string())
    }

    /// Look up a built-in transform by name
    pub fn builtin(name: &str) -> Result<Self> {
        let transform = match name {
            "identity" => Self::identity(),
            "upper" => Self::named(name, |s| s.value.to_uppercase()),
            "lower" => Self::named(name, |s| s.value.to_lowercase()),
            "trim" => Self::named(name, |s| s.value.trim().to_string()),
            "base64" => Self::named(name, |s| BASE64.encode(s.value.as_bytes())),
            "json" => Self::named(name, |s| json_escape(s.value)),
            "shell" => Self::named(name, |s| shell_quote(s.value)),
            other => return Err(TemplateError::UnknownTransform(other.to_string())),
        };
        Ok(transform)
    }

    fn named<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Substitution<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, substitution: &Substitution<'_>) -> String {
        (self.func)(substitution)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("name", &self.name).finish()
    }
}

/// Escape text for embedding inside a JSON string literal
fn json_escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Quote text as a single POSIX shell word
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
