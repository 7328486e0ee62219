// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the stencil CLI structure, its subcommands and shared substitution flags

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Replace delimited placeholders in text templates with values from JSON or YAML data")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template, replacing every placeholder
    Render {
        #[arg(help = "Path to the template file, or - for stdin")]
        template: PathBuf,

        #[command(flatten)]
        substitution: SubstitutionArgs,

        #[arg(short, long, help = "Write the rendered output to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// List the placeholders of a template and report missing keys
    Check {
        #[arg(help = "Path to the template file, or - for stdin")]
        template: PathBuf,

        #[command(flatten)]
        substitution: SubstitutionArgs,
    },
}

/// Flags shared by every command that substitutes
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SubstitutionArgs {
    #[arg(short, long = "data", help = "JSON or YAML data file (repeatable, later files win)")]
    pub data: Vec<PathBuf>,

    #[arg(
        short = 'V',
        long = "var",
        help = "Set a data value at a dotted key (key=value)"
    )]
    pub vars: Vec<String>,

    #[arg(long, help = "Starting delimiter")]
    pub start: Option<String>,

    #[arg(long, help = "Closing delimiter")]
    pub end: Option<String>,

    #[arg(long, help = "Leave missing keys as 'undefined' instead of failing")]
    pub ignore_missing: bool,

    #[arg(short, long, help = "Transform applied to every value")]
    pub transform: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format, keeping command line order
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<Vec<(String, String)>> {
        let mut variables = Vec::with_capacity(vars.len());

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.push((key.trim().to_string(), value.to_string()));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = vec![
            "env=production".to_string(),
            "app.version=1.0.0".to_string(),
            "query=a=b".to_string(),
        ];

        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(
            parsed,
            vec![
                ("env".to_string(), "production".to_string()),
                ("app.version".to_string(), "1.0.0".to_string()),
                ("query".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_variables_invalid() {
        let vars = vec!["invalid_format".to_string()];
        let result = Args::parse_variables(&vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_render_command() {
        let args = Args::try_parse_from([
            "stencil",
            "render",
            "page.md",
            "--data",
            "site.yaml",
            "-V",
            "title=Home",
            "--start",
            "{{",
            "--end",
            "}}",
            "--ignore-missing",
            "-t",
            "upper",
            "-o",
            "out.md",
        ])
        .unwrap();

        match args.command {
            Commands::Render {
                template,
                substitution,
                output,
            } => {
                assert_eq!(template, PathBuf::from("page.md"));
                assert_eq!(substitution.data, vec![PathBuf::from("site.yaml")]);
                assert_eq!(substitution.vars, vec!["title=Home".to_string()]);
                assert_eq!(substitution.start.as_deref(), Some("{{"));
                assert_eq!(substitution.end.as_deref(), Some("}}"));
                assert!(substitution.ignore_missing);
                assert_eq!(substitution.transform.as_deref(), Some("upper"));
                assert_eq!(output, Some(PathBuf::from("out.md")));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_parse_check_command_with_globals() {
        let args = Args::try_parse_from(["stencil", "check", "-", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Commands::Check { ref template, .. } if template == &PathBuf::from("-")));
    }
}
