// ABOUTME: Replacer configuration: delimiters, missing-key policy and transform
// ABOUTME: Defaults are applied once here and validated before a matcher is compiled

use serde::{Deserialize, Serialize};

use super::error::{Result, TemplateError};
use super::transforms::Transform;

pub const DEFAULT_STARTING_DELIMITER: &str = "<{";
pub const DEFAULT_CLOSING_DELIMITER: &str = "}>";

/// Literal text opening and closing a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    #[serde(default = "default_starting")]
    pub starting: String,

    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_starting() -> String {
    DEFAULT_STARTING_DELIMITER.to_string()
}

fn default_closing() -> String {
    DEFAULT_CLOSING_DELIMITER.to_string()
}

impl Delimiters {
    pub fn new(starting: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            starting: starting.into(),
            closing: closing.into(),
        }
    }

    /// Reject empty delimiters
    pub fn validate(&self) -> Result<()> {
        if self.starting.is_empty() {
            return Err(TemplateError::EmptyDelimiter("starting"));
        }
        if self.closing.is_empty() {
            return Err(TemplateError::EmptyDelimiter("closing"));
        }
        Ok(())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_DELIMITER, DEFAULT_CLOSING_DELIMITER)
    }
}

/// Options a [`Replacer`](super::Replacer) is built from
#[derive(Debug, Clone, Default)]
pub struct ReplacerOptions {
    pub delimiters: Delimiters,
    pub ignore_missing: bool,
    pub transform: Transform,
}

impl ReplacerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(mut self, starting: impl Into<String>, closing: impl Into<String>) -> Self {
        self.delimiters = Delimiters::new(starting, closing);
        self
    }

    pub fn with_ignore_missing(mut self, ignore_missing: bool) -> Self {
        self.ignore_missing = ignore_missing;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}
