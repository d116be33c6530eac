//! Error types for linked-steps.
//!
//! Request-layer errors abort a run. Command-layer errors are caught by the
//! command runner and reported next to the step that produced them.

use thiserror::Error;

/// Main error type for linked-steps operations.
#[derive(Error, Debug)]
pub enum StepsError {
    /// The endpoint answered 404.
    #[error("404 : not found {endpoint}")]
    NotFound { endpoint: String },

    /// The endpoint answered 401. The password is kept for diagnostics but
    /// never rendered.
    #[error("401 : unauthorized {user}")]
    Unauthorized { user: String, password: String },

    /// The endpoint reported a server-side failure (503 and other 5xx).
    #[error("{status} : server error")]
    ServerError { status: u16 },

    /// Transport failures and any other non-success status.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body or a result row did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A step exited with a non-zero status.
    #[error("{} {}", exit_text(.status), .output)]
    CommandFailure { status: Option<i32>, output: String },

    /// The shell could not be spawned.
    #[error("Command error: {0}")]
    Command(String),

    /// Configuration errors (invalid config file, bad endpoint URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StepsError {
    /// Creates a request error with the given message.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Creates a decode error with the given message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates a command error with the given message.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Not Found",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::ServerError { .. } => "Server Error",
            Self::Request(_) => "Request Error",
            Self::Decode(_) => "Decode Error",
            Self::CommandFailure { .. } => "Command Failure",
            Self::Command(_) => "Command Error",
            Self::Config(_) => "Configuration Error",
        }
    }

    /// Returns true for errors raised while talking to the endpoint.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Unauthorized { .. }
                | Self::ServerError { .. }
                | Self::Request(_)
                | Self::Decode(_)
        )
    }
}

fn exit_text(status: &Option<i32>) -> String {
    status.map_or_else(|| "signal".to_string(), |code| code.to_string())
}

/// Result type alias using StepsError.
pub type Result<T> = std::result::Result<T, StepsError>;
