//! Upstream Adapter
//!
//! Reaches the upstream C2PA verification and signing service. The service
//! performs all cryptographic work; this crate only ships image bytes to it
//! and brings back either a [`VerificationResult`](c2pa_lens_core::VerificationResult)
//! or a signed byte stream.
//!
//! ## Backends
//!
//! - **HTTP**: multipart POSTs to the upstream core API (`/verify`, `/sign`)
//! - **Mock**: canned results and injectable failures, for testing
//!
//! ## Usage
//!
//! ```ignore
//! use c2pa_lens_client::{HttpProvenanceService, ImageUpload, ProvenanceService};
//!
//! let service = HttpProvenanceService::new("http://localhost:5000")?;
//! let result = service
//!     .verify(ImageUpload::new(bytes, "photo.jpg").with_content_type("image/jpeg"))
//!     .await?;
//! let summary = c2pa_lens_core::summarize(&result);
//! ```
//!
//! ## Failure semantics
//!
//! Transport failures, non-success statuses and unparseable payloads surface
//! as distinct [`ClientError`] kinds. No retries are attempted here; callers
//! own any retry policy.

pub mod backends;
pub mod error;
pub mod service;
pub mod types;

pub use backends::{
    HttpProvenanceService, MockFailure, MockProvenanceService, DEFAULT_TIMEOUT,
    MOCK_SIGNATURE_PREFIX,
};
pub use error::{ClientError, Result};
pub use service::{ProvenanceService, SharedProvenanceService};
pub use types::{AiUsageDeclaration, ImageUpload, SignRequest, DEFAULT_CONTENT_TYPE};
