// ABOUTME: Error types for placeholder substitution
// ABOUTME: Covers caller input errors, missing keys, and data loading failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template must be a string, got {0}")]
    InvalidTemplateType(String),

    #[error("Data must be an object, got {0}")]
    InvalidDataType(String),

    #[error("Missing template key: {0}")]
    MissingKey(String),

    #[error("Substituted object key collides with another key: {0}")]
    DuplicateKey(String),

    #[error("The {0} delimiter must not be empty")]
    EmptyDelimiter(&'static str),

    #[error("Unknown transform: {0}")]
    UnknownTransform(String),

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TemplateError {
    /// The offending key, when this is a missing key error
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            TemplateError::MissingKey(key) => Some(key),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
