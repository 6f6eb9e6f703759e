//! Unified error type for the mill refactoring crates
//!
//! `MillError` covers faults only, such as a malformed input document or a
//! broken configuration file. A refactoring that
//! simply does not apply to the current selection is not an error, see
//! [`crate::protocol::ErrorReason`].

use thiserror::Error;

/// Result type alias used across the workspace
pub type MillResult<T> = Result<T, MillError>;

/// Core error type used throughout mill
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MillError {
    /// The input text is not valid for the supported grammar
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        /// Zero-based line of the offending token
        line: Option<u32>,
        /// Zero-based column of the offending token
        column: Option<u32>,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid data: {message}")]
    InvalidData {
        message: String,
        field: Option<String>,
    },

    #[error("Operation not supported: {operation}")]
    NotSupported {
        operation: String,
        reason: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        context: Option<String>,
    },
}

impl MillError {
    /// Create a parse error pointing at a zero-based line and column
    pub fn parse_at(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            field: None,
        }
    }

    /// Create a not supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
            reason: None,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to an internal error
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        if let Self::Internal { context, .. } = &mut self {
            *context = Some(ctx.into());
        }
        self
    }

    /// Stable machine-readable category, used by the CLI's JSON output
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Config { .. } => "config",
            Self::InvalidData { .. } => "invalid_data",
            Self::NotSupported { .. } => "not_supported",
            Self::Internal { .. } => "internal",
        }
    }
}
