//! Command-running consumer.
//!
//! Each row is a named unit of work. Rows keyed `Step …` carry a shell
//! command in their `description`; every other row (the guide's `Title`) is
//! only announced.

use super::shell::{CommandExecutor, ShellExecutor};
use super::ResultConsumer;
use crate::sparql::BindingRow;
use async_trait::async_trait;
use std::fmt;
use std::io::{self, Write};
use tracing::{info, warn};

/// Key prefix marking an executable row.
const STEP_PREFIX: &str = "Step";

/// Prompt marker some descriptions embed before a command.
const PROMPT_MARKER: &str = "$ ";

/// Returns true if a row with this key is an executable step.
pub fn is_step(key: &str) -> bool {
    key.starts_with(STEP_PREFIX)
}

/// Removes every `"$ "` from a description.
///
/// This is cosmetic. The result is still arbitrary shell text.
pub fn sanitize_command(description: &str) -> String {
    description.replace(PROMPT_MARKER, "")
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Runs step rows sequentially and reports each outcome on its own line.
///
/// Failures never stop the run.
pub struct CommandRunner<E = ShellExecutor, W = io::Stdout> {
    executor: E,
    out: W,
    columns: Vec<String>,
    summary: RunSummary,
    dry_run: bool,
}

impl CommandRunner {
    /// Runs steps with `sh` and reports to stdout.
    pub fn new() -> Self {
        Self::with_executor(ShellExecutor::new(), io::stdout())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor, W: Write + Send> CommandRunner<E, W> {
    /// Creates a runner with a custom executor and output.
    pub fn with_executor(executor: E, out: W) -> Self {
        Self {
            executor,
            out,
            columns: Vec::new(),
            summary: RunSummary::default(),
            dry_run: false,
        }
    }

    /// Announces steps and their commands without running anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Columns captured by the last `start`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Consumes the runner, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // Flushed so the announcement is visible while the step runs.
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            warn!("Failed to write step output: {e}");
        }
    }

    async fn run_step(&mut self, row: &BindingRow) {
        let Some(description) = row.text("description") else {
            self.summary.failed += 1;
            self.emit(format_args!(" failed: missing column 'description'\n"));
            return;
        };
        let command = sanitize_command(description);

        if self.dry_run {
            self.summary.skipped += 1;
            self.emit(format_args!(" dry-run: {command}\n"));
            return;
        }

        self.summary.executed += 1;
        match self.executor.run(&command).await {
            Ok(()) => {
                self.summary.succeeded += 1;
                self.emit(format_args!(" success\n"));
            }
            Err(e) => {
                self.summary.failed += 1;
                self.emit(format_args!(" failed: {e}\n"));
            }
        }
    }
}

#[async_trait]
impl<E: CommandExecutor, W: Write + Send> ResultConsumer for CommandRunner<E, W> {
    async fn start(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        self.summary = RunSummary::default();
    }

    async fn handle_row(&mut self, row: &BindingRow) {
        let (Some(key), Some(value)) = (row.text("key"), row.text("value")) else {
            let missing = if row.text("key").is_none() { "key" } else { "value" };
            self.summary.failed += 1;
            self.emit(format_args!("Running row failed: missing column '{missing}'\n"));
            return;
        };

        self.emit(format_args!("Running {key} : {value}"));

        if is_step(key) {
            self.run_step(row).await;
        } else {
            self.emit(format_args!("\n"));
        }
    }

    async fn end(&mut self) {
        let RunSummary {
            executed,
            succeeded,
            failed,
            skipped,
        } = self.summary;
        info!(executed, succeeded, failed, skipped, "run finished");
    }
}
