//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can end a transport.
///
/// Per-request failures are not transport errors; they are answered with a
/// JSON-RPC error reply and the session carries on.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while reading requests or writing replies.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A session task panicked or was cancelled.
    #[error("Session task failed: {0}")]
    TaskError(String),

    /// HTTP-specific error.
    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create a task error.
    pub fn task(msg: impl Into<String>) -> Self {
        Self::TaskError(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }
}
