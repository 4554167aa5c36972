//! Error types for catalog-dl
//!
//! This module provides the error handling for the library:
//! - Template errors (syntax errors at compile time, unknown fields at render time)
//! - Configuration and file name parsing errors
//! - Structured error details with machine-readable codes for display layers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for catalog-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for catalog-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "naming.track_pattern")
        key: Option<String>,
    },

    /// Pattern compile or render error
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A file name did not have the expected track naming layout
    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors produced while compiling or rendering a file name pattern
///
/// The first three variants are syntax errors and are raised by
/// [`Template::compile`](crate::template::Template::compile). `UnknownField`
/// is raised by rendering, once the record is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{` was not closed before the end of the pattern or before another `{`
    #[error("unterminated field reference starting at position {position}")]
    UnterminatedField {
        /// Character offset of the opening brace
        position: usize,
    },

    /// `{}` or `{|modifier}`
    #[error("empty field name at position {position}")]
    EmptyFieldName {
        /// Character offset of the opening brace
        position: usize,
    },

    /// Modifier that cannot apply to the field's kind
    #[error("invalid modifier '{modifier}' for field '{field}': {reason}")]
    InvalidModifier {
        /// The field the modifier was attached to
        field: String,
        /// The modifier text as written
        modifier: String,
        /// Why it was rejected
        reason: String,
    },

    /// The pattern references a field the record does not provide
    #[error("unknown field '{name}'")]
    UnknownField {
        /// The offending field name
        name: String,
    },
}

impl TemplateError {
    /// Whether this error was caused by malformed pattern text
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self, TemplateError::UnknownField { .. })
    }
}

/// Structured error information for display layers
///
/// Serialized as:
///
/// ```json
/// {
///   "code": "unknown_field",
///   "message": "unknown field 'nope'",
///   "details": { "field": "nope" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "syntax_error", "unknown_field")
    pub code: String,

    /// Human-readable error message, suitable for an inline hint next to an editor
    pub message: String,

    /// Optional additional context (field name, position, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// Create a new error detail with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error detail with additional context
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Machine-readable classification of errors
pub trait ErrorCode {
    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ErrorCode for TemplateError {
    fn error_code(&self) -> &str {
        match self {
            TemplateError::UnknownField { .. } => "unknown_field",
            _ => "syntax_error",
        }
    }
}

impl ErrorCode for Error {
    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Template(e) => e.error_code(),
            Error::InvalidFileName(_) => "invalid_file_name",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}

impl From<&TemplateError> for ErrorDetail {
    fn from(error: &TemplateError) -> Self {
        let details = match error {
            TemplateError::UnterminatedField { position }
            | TemplateError::EmptyFieldName { position } => {
                Some(serde_json::json!({ "position": position }))
            }
            TemplateError::InvalidModifier {
                field, modifier, ..
            } => Some(serde_json::json!({ "field": field, "modifier": modifier })),
            TemplateError::UnknownField { name } => Some(serde_json::json!({ "field": name })),
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<&Error> for ErrorDetail {
    fn from(error: &Error) -> Self {
        match error {
            Error::Template(e) => e.into(),
            Error::Config {
                key: Some(key),
                message,
            } => ErrorDetail::with_details(
                error.error_code(),
                format!("configuration error: {message}"),
                serde_json::json!({ "key": key }),
            ),
            _ => ErrorDetail::new(error.error_code(), error.to_string()),
        }
    }
}
