//! Error types and handling for rill-stream
//!
//! A pipeline fails either inside the source itself or, under pull usage,
//! on the producer thread; either way the same `StreamError` surfaces to
//! the caller with its message intact.

use thiserror::Error;

/// Main error type for stream operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// I/O related errors
    #[error("IO error: {0}")]
    IO(String),
    /// The pull worker thread died without completing the protocol
    #[error("pull worker disconnected")]
    Disconnected,
    /// Custom error with message
    #[error("Stream error: {0}")]
    Custom(String),
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::IO(err.to_string())
    }
}

/// Result type for rill-stream operations
pub type StreamResult<T> = Result<T, StreamError>;
