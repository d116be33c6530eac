//! linked-steps - run step-by-step guides published on a SPARQL endpoint.
//!
//! The library exposes the query client, the result consumers and the
//! configuration layer used by the `linked-steps` binary.

pub mod config;
pub mod consumer;
pub mod error;
pub mod logging;
pub mod query;
pub mod sparql;

pub use consumer::{CommandRunner, ResultConsumer, TerminalPrinter};
pub use error::{Result, StepsError};
pub use sparql::{ResultSet, SparqlClient};
