//! Error types for codec operations

use thiserror::Error;

/// Result type alias using FormatError
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors produced while decoding or encoding a wire format
#[derive(Debug, Error)]
pub enum FormatError {
    /// Malformed input document
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A quad that cannot be expressed in the target format
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Underlying byte stream failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize(message.into())
    }
}
