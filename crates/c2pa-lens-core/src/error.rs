//! Error types for the C2PA Lens core

use thiserror::Error;

/// Result type alias using LensError
pub type Result<T> = std::result::Result<T, LensError>;

/// Errors that can occur at the core's boundaries
///
/// Summarization itself is infallible. These errors only surface while
/// turning raw upstream bytes into a [`VerificationResult`](crate::VerificationResult)
/// or while rendering a summary.
#[derive(Error, Debug)]
pub enum LensError {
    /// Upstream payload is not a structurally valid verification result
    #[error("Malformed verification result: {0}")]
    MalformedPayload(String),

    /// Training/mining usage value outside `allowed|notAllowed|constrained`
    #[error("Unknown training-mining use: '{0}'")]
    UnknownTrainingUse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        LensError::SerializationError(err.to_string())
    }
}
