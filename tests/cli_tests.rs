// ABOUTME: Integration tests for the CLI application
// ABOUTME: Tests rendering and checking templates end to end through the stencil binary

mod common;
use common::{stderr, stdout, TestEnvironment};

#[test]
fn test_cli_help_command() {
    let env = TestEnvironment::new();
    let output = env.run(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("stencil") || stdout.contains("placeholders"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_cli_version_command() {
    let env = TestEnvironment::new();
    let output = env.run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(stencil::VERSION));
}

#[tokio::test]
async fn test_cli_render_with_data_file() {
    let env = TestEnvironment::new();
    env.write_file("page.md", "# <{site.title}>\n\nBy <{author||anonymous}>\n")
        .await;
    env.write_file("site.yaml", "site:\n  title: Welcome\n").await;

    let output = env.run(&["render", "page.md", "--data", "site.yaml"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "# Welcome\n\nBy anonymous\n");
}

#[tokio::test]
async fn test_cli_render_to_output_file() {
    let env = TestEnvironment::new();
    env.write_file("greeting.txt", "Hello <{name}>!").await;

    let output = env.run(&[
        "render",
        "greeting.txt",
        "-V",
        "name=World",
        "--output",
        "out.txt",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert_eq!(env.read_file("out.txt").await, "Hello World!");
}

#[test]
fn test_cli_render_from_stdin_with_custom_delimiters() {
    let env = TestEnvironment::new();
    let output = env.run_with_stdin(
        &[
            "render", "-", "--start", "{{", "--end", "}}", "-V", "who=stdin", "-t", "upper",
        ],
        Some("from {{who}}"),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "from STDIN");
}

#[tokio::test]
async fn test_cli_render_missing_key_fails() {
    let env = TestEnvironment::new();
    env.write_file("t.txt", "<{present}> <{absent}>").await;

    let output = env.run(&["render", "t.txt", "-V", "present=yes"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("absent"));
}

#[tokio::test]
async fn test_cli_render_ignore_missing() {
    let env = TestEnvironment::new();
    env.write_file("t.txt", "<{present}> <{absent}>").await;

    let output = env.run(&["render", "t.txt", "-V", "present=yes", "--ignore-missing"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "yes undefined");
}

#[tokio::test]
async fn test_cli_uses_config_file() {
    let env = TestEnvironment::new();
    env.write_file(
        "stencil.yaml",
        "delimiters:\n  starting: \"[[\"\n  closing: \"]]\"\nvars:\n  name: configured\n",
    )
    .await;
    env.write_file("t.txt", "[[name]] <{name}>").await;

    let output = env.run(&["render", "t.txt"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "configured <{name}>");
}

#[tokio::test]
async fn test_cli_check_reports_missing_keys() {
    let env = TestEnvironment::new();
    env.write_file("t.txt", "<{a}> <{b||x}> <{c.d}>").await;
    env.write_file("data.json", r#"{"a": 1}"#).await;

    let output = env.run(&["check", "t.txt", "--data", "data.json"]);

    assert!(!output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Placeholders: 3"));
    assert!(stdout.contains("b (has default)"));
    assert!(stdout.contains("Missing keys: 1"));
    assert!(stdout.contains("c.d"));
}

#[tokio::test]
async fn test_cli_check_passes_when_complete() {
    let env = TestEnvironment::new();
    env.write_file("t.txt", "<{a}> <{b||x}>").await;

    let output = env.run(&["check", "t.txt", "-V", "a=1"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("All keys resolve"));
}

#[test]
fn test_cli_unknown_transform_fails() {
    let env = TestEnvironment::new();
    let output = env.run_with_stdin(&["render", "-", "-t", "reverse"], Some("x"));

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown transform"));
}
