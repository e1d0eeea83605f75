//! Error types for the codec crate.
//!
//! Public decode entry points fail closed and return `None`; these errors
//! exist so the reason can be logged or reported by callers that ask for it.
//! Encoding fails only when the token would not fit the transport.

use thiserror::Error;

use slabkit_core::ConfigurationError;

/// Errors that can occur while encoding or decoding a design token.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The metadata carries no design token at all.
    #[error("No design token in metadata")]
    MissingToken,

    /// The chunk count field is missing, not a number, or out of range.
    #[error("Invalid chunk count: {0}")]
    BadChunkCount(String),

    /// A chunk named by the chunk count is absent.
    #[error("Missing chunk {0}")]
    MissingChunk(usize),

    /// A metadata field is longer than the transport allows.
    #[error("Field '{field}' is {len} characters (limit {limit})")]
    FieldTooLong {
        field: String,
        len: usize,
        limit: usize,
    },

    /// The encoded token needs more chunks than a reader accepts.
    #[error("Token is {len} characters (max {max})")]
    TokenTooLong { len: usize, max: usize },

    /// The token is not valid JSON for the compact design format.
    #[error("Malformed token: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The token was written by a newer encoder.
    #[error("Unsupported token version {0}")]
    UnsupportedVersion(u32),

    /// A field decoded but its value is not meaningful.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// The decoded design breaks a placement or geometry rule.
    #[error("Invalid design: {0}")]
    Invalid(#[from] ConfigurationError),
}

impl CodecError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        assert_eq!(CodecError::MissingChunk(2).to_string(), "Missing chunk 2");
        let err = CodecError::FieldTooLong {
            field: "design_0".to_string(),
            len: 612,
            limit: 500,
        };
        assert_eq!(err.to_string(), "Field 'design_0' is 612 characters (limit 500)");
        assert_eq!(
            CodecError::invalid("s", "unknown shape tag 'x'").to_string(),
            "Invalid value for 's': unknown shape tag 'x'"
        );
    }

    #[test]
    fn test_token_too_long_display() {
        let err = CodecError::TokenTooLong {
            len: 18_451,
            max: 18_000,
        };
        assert_eq!(err.to_string(), "Token is 18451 characters (max 18000)");
    }

    #[test]
    fn test_configuration_error_conversion() {
        let err: CodecError = ConfigurationError::InvalidLayout.into();
        assert!(matches!(err, CodecError::Invalid(_)));
    }
}
