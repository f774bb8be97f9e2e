//! API error types and responses

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use c2pa_lens_client::ClientError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream rejected request with status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("Malformed upstream payload: {0}")]
    UpstreamMalformed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status this error is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamRejected { .. }
            | ApiError::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            ApiError::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
            ApiError::UpstreamMalformed(_) => "UPSTREAM_MALFORMED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // The upstream body stays in the logs; clients only see its status.
        let (message, details) = match &self {
            ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::UpstreamMalformed(msg)
            | ApiError::Internal(msg) => (msg.clone(), None),
            ApiError::UpstreamRejected { status, .. } => (
                format!("Upstream service rejected the request with status {}", status),
                Some(serde_json::json!({ "upstream_status": status })),
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unavailable(msg) => ApiError::UpstreamUnavailable(msg),
            ClientError::Rejected { status, body } => ApiError::UpstreamRejected { status, body },
            ClientError::MalformedPayload(msg) => ApiError::UpstreamMalformed(msg),
            ClientError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ClientError::InvalidConfiguration(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_gateway_codes() {
        let cases = [
            (ClientError::Unavailable("refused".into()), "UPSTREAM_UNAVAILABLE"),
            (
                ClientError::Rejected { status: 500, body: "boom".into() },
                "UPSTREAM_REJECTED",
            ),
            (ClientError::MalformedPayload("garbage".into()), "UPSTREAM_MALFORMED"),
        ];

        for (client_err, code) in cases {
            let err = ApiError::from(client_err);
            assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_invalid_request_is_bad_request() {
        let err = ApiError::from(ClientError::InvalidRequest("bad mime".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_configuration_is_internal() {
        let err = ApiError::from(ClientError::InvalidConfiguration("ftp://".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
