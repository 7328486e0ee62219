// ABOUTME: CLI module for stencil
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::{Args, Commands, SubstitutionArgs};
pub use config::Config;
