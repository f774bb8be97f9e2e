//! The upstream verification and signing service

use async_trait::async_trait;
use std::sync::Arc;

use c2pa_lens_core::VerificationResult;

use crate::error::Result;
use crate::types::{ImageUpload, SignRequest};

/// Trait for upstream C2PA service backends
///
/// Each backend reaches a service that performs the actual signature
/// verification and signing. This crate only moves bytes to and from it.
#[async_trait]
pub trait ProvenanceService: Send + Sync {
    /// Verify an image and return the raw verification result
    ///
    /// # Returns
    /// * `Ok(VerificationResult)` - Upstream verdict and manifest graph
    /// * `Err(ClientError)` - If the upstream call itself fails
    async fn verify(&self, upload: ImageUpload) -> Result<VerificationResult>;

    /// Sign an image and return the signed byte stream
    async fn sign(&self, request: SignRequest) -> Result<Vec<u8>>;

    /// Get a description of this backend (for logging)
    fn description(&self) -> &str {
        "provenance service"
    }
}

/// Shared handle to a backend
pub type SharedProvenanceService = Arc<dyn ProvenanceService>;
