//! Mock Backend
//!
//! For testing purposes - answers verification with a canned result and
//! "signs" by prefixing the image bytes with a marker.

use async_trait::async_trait;
use std::sync::Mutex;

use c2pa_lens_core::VerificationResult;

use crate::error::{ClientError, Result};
use crate::service::ProvenanceService;
use crate::types::{ImageUpload, SignRequest};

/// Marker prepended to image bytes by [`MockProvenanceService::sign`]
pub const MOCK_SIGNATURE_PREFIX: &[u8] = b"MOCK-C2PA:";

/// Failure the mock should simulate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Transport failure (connection refused, timeout)
    Unavailable,
    /// Non-success status from upstream
    Rejected(u16),
    /// Success status with an unparseable body
    Malformed,
}

impl From<&MockFailure> for ClientError {
    fn from(failure: &MockFailure) -> Self {
        match failure {
            MockFailure::Unavailable => ClientError::Unavailable("mock upstream unavailable".into()),
            MockFailure::Rejected(status) => ClientError::Rejected {
                status: *status,
                body: "mock upstream rejected request".into(),
            },
            MockFailure::Malformed => {
                ClientError::MalformedPayload("mock upstream returned garbage".into())
            }
        }
    }
}

/// Mock upstream service for testing
pub struct MockProvenanceService {
    verification: VerificationResult,
    failure: Option<MockFailure>,
    sign_requests: Mutex<Vec<SignRequest>>,
}

impl MockProvenanceService {
    /// Create a mock that answers every verification with `verification`
    pub fn new(verification: VerificationResult) -> Self {
        Self {
            verification,
            failure: None,
            sign_requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every call fail with the given failure
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(VerificationResult::default())
        }
    }

    /// Sign requests received so far, oldest first
    pub fn sign_requests(&self) -> Vec<SignRequest> {
        self.sign_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(failure) => Err(ClientError::from(failure)),
            None => Ok(()),
        }
    }
}

impl Default for MockProvenanceService {
    fn default() -> Self {
        Self::new(VerificationResult::new("Valid"))
    }
}

#[async_trait]
impl ProvenanceService for MockProvenanceService {
    fn description(&self) -> &str {
        "mock provenance service"
    }

    async fn verify(&self, upload: ImageUpload) -> Result<VerificationResult> {
        self.check_failure()?;

        if upload.is_empty() {
            return Err(ClientError::Rejected {
                status: 400,
                body: "file is required".into(),
            });
        }

        Ok(self.verification.clone())
    }

    async fn sign(&self, request: SignRequest) -> Result<Vec<u8>> {
        self.check_failure()?;

        let mut signed = MOCK_SIGNATURE_PREFIX.to_vec();
        signed.extend_from_slice(&request.image.bytes);

        if let Ok(mut requests) = self.sign_requests.lock() {
            requests.push(request);
        }

        Ok(signed)
    }
}
