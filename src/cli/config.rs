// ABOUTME: Configuration management for the stencil CLI
// ABOUTME: Loads defaults from YAML files and environment variables and builds replacer options

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::{Delimiters, ReplacerOptions, Transform};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delimiters: Delimiters,

    #[serde(default)]
    pub ignore_missing: bool,

    #[serde(default = "default_transform")]
    pub transform: String,

    /// Data files loaded before any given on the command line
    #[serde(default)]
    pub data: Vec<PathBuf>,

    /// Dotted key overrides applied before any given on the command line
    #[serde(default)]
    pub vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_transform() -> String {
    "identity".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            ignore_missing: false,
            transform: default_transform(),
            data: Vec::new(),
            vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            Self::from_yaml(&contents)
                .with_context(|| format!("Invalid config {}", config_path.display()))?
        } else {
            Config::default()
        };

        config.merge_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("stencil.yaml"),
            PathBuf::from("stencil.yml"),
            PathBuf::from(".stencil.yaml"),
            PathBuf::from(".stencil.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".stencil").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("stencil.yaml")
    }

    /// Merge `STENCIL_*` environment variables into configuration
    pub fn merge_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(starting) = var("STENCIL_START_DELIMITER") {
            self.delimiters.starting = starting;
        }
        if let Some(closing) = var("STENCIL_END_DELIMITER") {
            self.delimiters.closing = closing;
        }
        if let Some(ignore) = var("STENCIL_IGNORE_MISSING") {
            self.ignore_missing = parse_bool(&ignore).context("Invalid STENCIL_IGNORE_MISSING")?;
        }
        if let Some(transform) = var("STENCIL_TRANSFORM") {
            self.transform = transform;
        }
        if let Some(level) = var("STENCIL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("STENCIL_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Build replacer options from this configuration
    pub fn replacer_options(&self) -> Result<ReplacerOptions> {
        let transform = Transform::builtin(&self.transform)?;
        Ok(ReplacerOptions {
            delimiters: self.delimiters.clone(),
            ignore_missing: self.ignore_missing,
            transform,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("Expected a boolean, got '{}'", other)),
    }
}
