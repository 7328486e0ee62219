// ABOUTME: Main library module for stencil, a delimiter-based placeholder replacer
// ABOUTME: Exports the substitution engine and the CLI building blocks

pub mod cli;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use template::{
    Delimiters, Placeholder, Replacer, ReplacerOptions, Substitution, TemplateData,
    TemplateError, Transform,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
