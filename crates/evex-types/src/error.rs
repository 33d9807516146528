//! Error types for evex.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for evex operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while triggering, polling, or downloading an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Missing or invalid client configuration (credential, host).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid SSE-C key material.
    #[error(transparent)]
    SseKey(#[from] SseKeyError),

    /// The polling deadline elapsed before the task reached a terminal state.
    #[error("Timed out after {}s waiting for task {task_uuid}", waited.as_secs())]
    Timeout {
        /// The task that was being polled.
        task_uuid: String,
        /// How long the poller waited in total.
        waited: Duration,
    },

    /// The server reported a terminal failure state for the task.
    #[error("Task ended with status={state}. Details: {detail}")]
    TaskFailed {
        /// The server-reported state string (e.g. `FAILED`, `CANCELLED`).
        state: String,
        /// Server-provided failure detail, or the raw response body.
        detail: String,
    },

    /// HTTP request failed or returned a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid SSE-C key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SseKeyError {
    /// The decoded key is not exactly 32 bytes.
    #[error(
        "SSE-C key must be exactly 32 bytes (256 bits). Got {0} bytes after base64 decoding. \
         Generate a valid key with: openssl rand -base64 32"
    )]
    InvalidKeyLength(usize),

    /// The key is not valid base64 text.
    #[error("SSE-C key is not valid base64: {0}")]
    InvalidKeyEncoding(String),
}
