// ABOUTME: Parsing of the text captured between a pair of delimiters
// ABOUTME: Splits a key expression into a lookup key and an optional default

use std::ops::Range;

/// Separator between the lookup key and its default expression
pub const DEFAULT_SEPARATOR: &str = "||";

/// One delimiter-bounded span found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole span, delimiters included
    pub span: Range<usize>,
    /// Trimmed lookup path
    pub key: String,
    /// Raw default text after the first `||`, untrimmed
    pub default: Option<String>,
}

impl Placeholder {
    /// Parse the raw text found between the delimiters.
    ///
    /// Only the first `||` separates key from default; anything after it,
    /// further separators included, belongs to the default verbatim.
    pub fn parse(span: Range<usize>, expression: &str) -> Self {
        let (key, default) = match expression.split_once(DEFAULT_SEPARATOR) {
            Some((key, default)) => (key, Some(default.to_string())),
            None => (expression, None),
        };

        Self {
            span,
            key: key.trim().to_string(),
            default,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
