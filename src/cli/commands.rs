// ABOUTME: Command implementations for the stencil CLI
// ABOUTME: Handles template loading, data assembly, rendering and checking

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::args::{Args, SubstitutionArgs};
use super::config::Config;
use crate::template::{DataFormat, Replacer, TemplateData, Transform};

/// Render a template to stdout or a file
pub async fn render_template(
    template_path: PathBuf,
    substitution: SubstitutionArgs,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Rendering template: {}", template_path.display());

    let template = read_template(&template_path).await?;
    let data = load_data(&substitution, config).await?;
    let replacer = build_replacer(&substitution, config)?;

    let rendered = replacer
        .replace(&template, data.as_json())
        .with_context(|| format!("Failed to render {}", template_path.display()))?;

    match output {
        Some(output_path) => {
            tokio::fs::write(&output_path, &rendered)
                .await
                .with_context(|| format!("Failed to write output file {}", output_path.display()))?;
            info!("Rendered output written to: {}", output_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// List placeholders and report the keys the data cannot satisfy
pub async fn check_template(
    template_path: PathBuf,
    substitution: SubstitutionArgs,
    config: &Config,
) -> Result<()> {
    info!("Checking template: {}", template_path.display());

    let template = read_template(&template_path).await?;
    let data = load_data(&substitution, config).await?;
    let replacer = build_replacer(&substitution, config)?;

    let placeholders = replacer.placeholders(&template);
    let missing = replacer.missing_keys(&template, data.as_json())?;

    println!("Placeholders: {}", placeholders.len());
    for placeholder in &placeholders {
        if placeholder.has_default() {
            println!("  {} (has default)", placeholder.key);
        } else {
            println!("  {}", placeholder.key);
        }
    }

    if missing.is_empty() {
        println!("✓ All keys resolve");
        return Ok(());
    }

    println!("Missing keys: {}", missing.len());
    for key in &missing {
        println!("  {}", key);
    }

    if replacer.options().ignore_missing {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Template {} has {} missing key(s)",
            template_path.display(),
            missing.len()
        ))
    }
}

/// Read the template from a file, or stdin for `-`
async fn read_template(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut template = String::new();
        tokio::io::stdin()
            .read_to_string(&mut template)
            .await
            .context("Failed to read template from stdin")?;
        return Ok(template);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template {}", path.display()))
}

/// Assemble the data object: configured files, then command line files,
/// then configured vars, then command line vars
pub async fn load_data(substitution: &SubstitutionArgs, config: &Config) -> Result<TemplateData> {
    let mut data = TemplateData::new();

    for path in config.data.iter().chain(&substitution.data) {
        let format = DataFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read data file {}", path.display()))?;
        let source = TemplateData::parse(&content, format)
            .with_context(|| format!("Invalid data file {}", path.display()))?;
        debug!("Loaded data file: {}", path.display());
        data.merge(source);
    }

    // Configured vars have no inherent order; command line vars apply in argv order.
    let mut vars: Vec<(String, String)> = config
        .vars
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    vars.sort();
    vars.extend(Args::parse_variables(&substitution.vars)?);

    for (key, value) in vars {
        data.set(&key, JsonValue::String(value));
    }

    Ok(data)
}

/// Build a replacer from config with command line flags taking precedence
pub fn build_replacer(substitution: &SubstitutionArgs, config: &Config) -> Result<Replacer> {
    let mut options = config.replacer_options()?;

    if let Some(ref starting) = substitution.start {
        options.delimiters.starting = starting.clone();
    }
    if let Some(ref closing) = substitution.end {
        options.delimiters.closing = closing.clone();
    }
    if substitution.ignore_missing {
        options.ignore_missing = true;
    }
    if let Some(ref name) = substitution.transform {
        options.transform = Transform::builtin(name)?;
    }

    Ok(Replacer::new(options)?)
}
