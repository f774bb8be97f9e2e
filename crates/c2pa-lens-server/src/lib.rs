//! C2PA Lens Gateway
//!
//! HTTP front for an upstream C2PA service. The gateway:
//! - Forwards uploaded images to the upstream service for verification
//! - Summarizes the returned manifests into a flat, renderer-friendly view
//! - Forwards signing requests with optional AI-usage declarations
//!
//! No cryptography happens here; the upstream service owns all of it.
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `POST /api/c2pa/verify` - Verify an image (`image` multipart field),
//!   answers with a summary
//! - `POST /api/c2pa/sign` - Sign an image (`image`, `title`, optional
//!   `ai_inference`, `ai_generative_training` and their
//!   `*_constraints_info` fields), answers with the signed bytes
//!
//! ## Error Responses
//!
//! Errors are JSON bodies `{ "error", "code", "details"? }`. Upstream
//! failures answer 502 and never masquerade as an `Invalid` verdict.

pub mod api;
pub mod config;

pub use api::create_router;
pub use api::error::{ApiError, ErrorResponse};
pub use api::handlers::AppState;
pub use config::{ConfigError, ServerConfig};
