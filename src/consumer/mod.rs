//! Result consumers.
//!
//! A consumer processes a result set incrementally through three callbacks
//! instead of receiving it whole. The client calls `start` once with the
//! column names, `handle_row` once per row in endpoint order, then `end` once.

mod printer;
mod runner;
mod shell;

pub use printer::TerminalPrinter;
pub use runner::{is_step, sanitize_command, CommandRunner, RunSummary};
pub use shell::{CommandExecutor, ShellExecutor, DEFAULT_SHELL};

use crate::sparql::{BindingRow, ResultSet};
use async_trait::async_trait;

/// Incremental sink for a result set. Every callback defaults to a no-op.
///
/// A consumer that is reused across runs must reset its own state in `start`.
#[async_trait]
pub trait ResultConsumer: Send {
    /// Called once, before any row, with the declared column order.
    async fn start(&mut self, _columns: &[String]) {}

    /// Called once per row, in received order.
    async fn handle_row(&mut self, _row: &BindingRow) {}

    /// Called once after the last row.
    async fn end(&mut self) {}
}

/// Feeds a result set to a consumer: `start`, every row in order, `end`.
pub async fn stream(results: &ResultSet, consumer: &mut dyn ResultConsumer) {
    consumer.start(results.columns()).await;
    for row in results.rows() {
        consumer.handle_row(row).await;
    }
    consumer.end().await;
}
