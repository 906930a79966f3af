//! Error types for the scoring crate

use thiserror::Error;

/// Errors surfaced around the scoring core.
///
/// Scoring itself is total over any text, so `InvalidInput` is reserved for
/// callers that want to reject non-text payloads before scoring.
#[derive(Debug, Error)]
pub enum RecitationError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("invalid value for {field}: {reason}")]
    Config { field: &'static str, reason: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RecitationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }

    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }
}
