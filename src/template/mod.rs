// ABOUTME: Placeholder substitution module for stencil
// ABOUTME: Replaces delimiter-bounded keys in text with values from a data object

pub mod context;
pub mod engine;
pub mod error;
pub mod inspect;
pub mod lookup;
pub mod options;
pub mod placeholder;
pub mod transforms;

pub use context::{DataFormat, TemplateData};
pub use engine::Replacer;
pub use error::{Result, TemplateError};
pub use options::{Delimiters, ReplacerOptions};
pub use placeholder::Placeholder;
pub use transforms::{Substitution, Transform};
