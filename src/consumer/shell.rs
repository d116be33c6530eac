//! Shell command execution.
//!
//! Command lines come straight from query results. Nothing here restricts
//! what they do.

use crate::error::{Result, StepsError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Default shell used to interpret command lines.
pub const DEFAULT_SHELL: &str = "sh";

/// Runs one command line to completion.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Runs `command_line` and waits for it.
    ///
    /// A non-zero exit is `StepsError::CommandFailure`; failing to start the
    /// process at all is `StepsError::Command`.
    async fn run(&self, command_line: &str) -> Result<()>;
}

/// Hands command lines to `<shell> -c`, discarding their output.
///
/// Stdin is inherited so steps can prompt.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    /// Uses another shell program, e.g. `bash`.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn run(&self, command_line: &str) -> Result<()> {
        debug!(shell = %self.shell, command = command_line, "spawning step");

        // Null sinks are opened per invocation and dropped with the child.
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| StepsError::command(format!("Failed to run {}: {e}", self.shell)))?;

        if status.success() {
            Ok(())
        } else {
            Err(StepsError::CommandFailure {
                status: status.code(),
                output: String::new(),
            })
        }
    }
}
