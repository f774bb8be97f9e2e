//! Backends for the upstream C2PA service

pub mod http;
pub mod mock;

pub use http::{HttpProvenanceService, DEFAULT_TIMEOUT};
pub use mock::{MockFailure, MockProvenanceService, MOCK_SIGNATURE_PREFIX};
