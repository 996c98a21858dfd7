//! Tool-specific error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for tool execution.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// A mandatory argument was absent (or blank).
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Arguments were present but malformed (wrong type, unknown enum value).
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The external command could not be started at all.
    #[error("Failed to execute {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but exited unsuccessfully.
    #[error("{command} failed with {}: {}", describe_exit(.code), .stderr.trim_end())]
    ExternalFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external command exceeded the configured time bound.
    #[error("{command} timed out after {after:?}")]
    Timeout { command: String, after: Duration },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`ToolError`], stable for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    MissingRequiredArgument,
    InvalidArguments,
    SpawnError,
    ExternalFailure,
    Timeout,
    Internal,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing(name: &'static str) -> Self {
        Self::MissingArgument(name)
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::NotFound(_) => ToolErrorKind::UnknownTool,
            Self::MissingArgument(_) => ToolErrorKind::MissingRequiredArgument,
            Self::InvalidArguments(_) => ToolErrorKind::InvalidArguments,
            Self::SpawnFailed { .. } => ToolErrorKind::SpawnError,
            Self::ExternalFailure { .. } => ToolErrorKind::ExternalFailure,
            Self::Timeout { .. } => ToolErrorKind::Timeout,
            Self::Internal(_) => ToolErrorKind::Internal,
        }
    }

    /// JSON-RPC error code used when this error is reported to a client.
    ///
    /// Caller mistakes map to "invalid params", everything that went wrong
    /// after the request was accepted maps to "internal error".
    pub fn rpc_code(&self) -> i32 {
        match self.kind() {
            ToolErrorKind::UnknownTool
            | ToolErrorKind::MissingRequiredArgument
            | ToolErrorKind::InvalidArguments => -32602,
            ToolErrorKind::SpawnError
            | ToolErrorKind::ExternalFailure
            | ToolErrorKind::Timeout
            | ToolErrorKind::Internal => -32603,
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}
