//! External command execution utilities.
//!
//! Provides a Builder-based API for running external processes with
//! command echoing and proper output handling.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Captured output
//! let output = Cmd::new("git").args(["status", "-s"]).run()?;
//!
//! // Echo the command line, stream output to the terminal
//! Cmd::new("git")
//!     .args(["push", "origin", "master"])
//!     .cwd(checkout)
//!     .echo(true)
//!     .stream(true)
//!     .run()?;
//! ```

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
///
/// Provides a fluent API for configuring and running external commands.
/// Execution is synchronous and blocking; no timeout is applied.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stream: bool,
    echo: bool,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set environment variables for the subprocess.
    pub fn envs<K, V, I>(mut self, vars: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in vars {
            self.envs
                .push((k.as_ref().to_owned(), v.as_ref().to_owned()));
        }
        self
    }

    /// Print the shell-equivalent command line before execution.
    pub fn echo(mut self, enable: bool) -> Self {
        self.echo = enable;
        self
    }

    /// Inherit stdio so the command's own output reaches the terminal.
    ///
    /// Use for long-running commands whose progress the operator should
    /// see as it happens (clone, push). Streamed output cannot be captured,
    /// so failures report the exit status only.
    pub fn stream(mut self, enable: bool) -> Self {
        self.stream = enable;
        self
    }

    /// Execute the command and return output.
    pub fn run(self) -> Result<Output> {
        if self.echo {
            self.print_command();
        }

        if self.stream {
            self.run_streamed()
        } else {
            self.run_captured()
        }
    }
}

// ============================================================================
// Execution
// ============================================================================

impl Cmd {
    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Print the command as an operator would type it, shell-trace style.
    fn print_command(&self) {
        let mut line = self.program_name();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        println!("{} {line}", "+".dimmed());
    }

    /// Shared process setup.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(self.envs.iter().cloned());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        cmd
    }

    /// Execution with captured output.
    fn run_captured(self) -> Result<Output> {
        let name = self.program_name();

        let output = self
            .command()
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        if !output.status.success() {
            anyhow::bail!(format_error(&name, &output));
        }

        Ok(output)
    }

    /// Execution with inherited stdio.
    fn run_streamed(self) -> Result<Output> {
        let name = self.program_name();

        let status = self
            .command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        if !status.success() {
            anyhow::bail!("Command `{name}` failed with {status}");
        }

        Ok(Output {
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Format error message for failed command.
fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = format!("Command `{name}` failed with {}", output.status);

    let stderr_trimmed = stderr.trim();
    if !stderr_trimmed.is_empty() {
        msg.push('\n');
        msg.push_str(stderr_trimmed);
    }

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() {
        msg.push_str("\nStdout:\n");
        msg.push_str(stdout_trimmed);
    }

    msg
}

// ============================================================================
// Tests
// ============================================================================
