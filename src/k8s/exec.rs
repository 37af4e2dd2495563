//! Subprocess execution with captured output
//!
//! A non-zero exit status is data, not an error: callers inspect
//! [`ExecOutput::succeeded`] and decide. `Err` means the process could not be
//! spawned at all (binary missing, permission denied).

use anyhow::{Context, Result};
use std::process::Command;

/// Captured result of one external command invocation
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub succeeded: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    /// First non-empty diagnostic line, preferring stderr
    pub fn diagnostic(&self) -> String {
        let text = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        text.lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("(no output)")
            .trim()
            .to_string()
    }
}

/// Run a command synchronously and capture its output
pub fn run(program: &str, args: &[&str]) -> Result<ExecOutput> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {} {}", program, args.join(" ")))?;

    Ok(ExecOutput {
        succeeded: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
