//! Error types for the upstream adapter

use thiserror::Error;

/// Result type for upstream adapter operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the upstream C2PA service
///
/// These are transport-level failures. They are never folded into a
/// verification verdict: an unreachable upstream is not an "Invalid" image.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, timeout, or the body could not be read
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// Upstream answered with a non-success status
    #[error("Upstream rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Upstream answered 2xx with a body that is not a verification result
    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    /// The request could not be built (e.g. an invalid content type)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Adapter misconfiguration (e.g. an unusable base URL)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::InvalidConfiguration(err.to_string())
        } else {
            ClientError::Unavailable(err.to_string())
        }
    }
}

impl From<c2pa_lens_core::LensError> for ClientError {
    fn from(err: c2pa_lens_core::LensError) -> Self {
        ClientError::MalformedPayload(err.to_string())
    }
}
