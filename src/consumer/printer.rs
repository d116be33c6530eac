//! Terminal-printing consumer.

use super::ResultConsumer;
use crate::sparql::BindingRow;
use async_trait::async_trait;
use std::io::{self, Write};
use tracing::warn;

/// Prints the column names, then every row as `name:value` lines.
pub struct TerminalPrinter<W = io::Stdout> {
    out: W,
    columns: Vec<String>,
}

impl TerminalPrinter {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TerminalPrinter<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            columns: Vec::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> io::Result<()> {
        for column in &self.columns {
            writeln!(self.out, "binding: {column}")?;
        }
        writeln!(self.out)
    }

    fn write_row(&mut self, row: &BindingRow) -> io::Result<()> {
        for column in &self.columns {
            writeln!(self.out, "{column}:{}", row.text(column).unwrap_or_default())?;
        }
        writeln!(self.out)
    }
}

#[async_trait]
impl<W: Write + Send> ResultConsumer for TerminalPrinter<W> {
    async fn start(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        if let Err(e) = self.write_header() {
            warn!("Failed to print result header: {e}");
        }
    }

    async fn handle_row(&mut self, row: &BindingRow) {
        if let Err(e) = self.write_row(row) {
            warn!("Failed to print result row: {e}");
        }
    }

    async fn end(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush output: {e}");
        }
    }
}
