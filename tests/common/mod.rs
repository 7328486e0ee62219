// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a temp-dir fixture for templates, data files, and a CLI runner

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use tokio::fs;

use stencil::{Replacer, ReplacerOptions};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content)
            .await
            .expect("Failed to write test file");
        path
    }

    pub async fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name))
            .await
            .expect("Failed to read test file")
    }

    /// Run the stencil binary from inside the temp dir
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, None)
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_stencil"))
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("STENCIL_START_DELIMITER")
            .env_remove("STENCIL_END_DELIMITER")
            .env_remove("STENCIL_IGNORE_MISSING")
            .env_remove("STENCIL_TRANSFORM")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute command");

        if let Some(input) = stdin {
            child
                .stdin
                .take()
                .expect("stdin is piped")
                .write_all(input.as_bytes())
                .expect("Failed to write stdin");
        } else {
            drop(child.stdin.take());
        }

        child.wait_with_output().expect("Failed to wait for command")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn replacer_with_delimiters(starting: &str, closing: &str) -> Replacer {
    Replacer::new(ReplacerOptions::new().with_delimiters(starting, closing))
        .expect("Failed to build replacer")
}
