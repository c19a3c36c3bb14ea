//! Error types for the FunFam CLI
//!
//! User-facing error types with messages that say what failed and what to
//! try next.

use funfam_common::FunfamError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI and workflow operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The service could not be reached or answered with a non-success status
    #[error("Request to {endpoint} failed: {message}. Check your connection and the --base-url setting.")]
    Transport { endpoint: String, message: String },

    /// The service answered but the body lacked an expected field
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// The job did not report ready before the poll deadline
    #[error("Task '{task_id}' was still running after {attempts} status checks ({elapsed:?}). Re-run 'funfam results {task_id}' later or raise --timeout-secs.")]
    PollTimeout {
        task_id: String,
        attempts: u32,
        elapsed: Duration,
    },

    /// The caller aborted the poll
    #[error("Polling for task '{task_id}' was cancelled. Fetch results later with 'funfam results {task_id}'.")]
    Cancelled { task_id: String },

    /// The script submission fallback could not be written or run
    #[error("Submission script failed: {0}")]
    Script(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables and flags.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response arrived
    #[error("Network request failed: {0}. Check your internet connection and server URL.")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Shared type validation failed
    #[error(transparent)]
    Common(#[from] FunfamError),
}

impl CliError {
    /// Create a transport error
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a script error
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// True for failures to reach the service, as opposed to bad payloads
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Http(_))
    }

    /// True when the service answered with something we could not use
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::JsonParse(_) | Self::Common(FunfamError::MalformedRecord { .. })
        )
    }
}
