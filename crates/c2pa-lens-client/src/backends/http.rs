//! HTTP backend
//!
//! Talks to the upstream core API over multipart POSTs:
//! - `POST {base}/verify` with an `image` part, answered with JSON
//! - `POST {base}/sign` with `title`, `image` and optional AI-usage fields,
//!   answered with the signed image bytes

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{info, warn};

use c2pa_lens_core::VerificationResult;

use crate::error::{ClientError, Result};
use crate::service::ProvenanceService;
use crate::types::{AiUsageDeclaration, ImageUpload, SignRequest};

/// Default timeout for upstream calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the upstream core API
pub struct HttpProvenanceService {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client with the configured timeout
    http_client: reqwest::Client,
}

impl HttpProvenanceService {
    /// Create a client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&base_url).map_err(|e| {
            ClientError::InvalidConfiguration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ClientError::InvalidConfiguration(format!(
                "Base URL must be http(s) with a host, got '{}'",
                base_url
            )));
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST a multipart form and fail on any non-success status
    async fn post(&self, path: &str, form: Form) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Upstream request failed");
                ClientError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to read upstream error body");
                    format!("<unreadable body: {}>", e)
                }
            };
            warn!(url = %url, status = status.as_u16(), body = %body, "Upstream rejected request");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

fn image_part(upload: ImageUpload) -> Result<Part> {
    let part = Part::bytes(upload.bytes).file_name(upload.file_name);

    match upload.content_type {
        Some(content_type) => part.mime_str(&content_type).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid content type '{}': {}", content_type, e))
        }),
        None => Ok(part),
    }
}

/// Append `name` and `name_constraints_info` when a declaration is present
fn add_declaration(form: Form, name: &str, declaration: Option<AiUsageDeclaration>) -> Form {
    let Some(declaration) = declaration else {
        return form;
    };

    let form = form.text(name.to_string(), declaration.usage.to_string());
    match declaration.constraints_info {
        Some(info) => form.text(format!("{}_constraints_info", name), info),
        None => form,
    }
}

#[async_trait]
impl ProvenanceService for HttpProvenanceService {
    fn description(&self) -> &str {
        "upstream core API over HTTP"
    }

    async fn verify(&self, upload: ImageUpload) -> Result<VerificationResult> {
        let file_name = upload.file_name.clone();
        let size = upload.len();

        let form = Form::new().part("image", image_part(upload)?);
        let response = self.post("verify", form).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;

        let result = VerificationResult::from_json(&body)?;

        info!(
            file_name = %file_name,
            bytes = size,
            validation_state = ?result.validation_state,
            manifests = result.manifests.len(),
            "Verified image upstream"
        );

        Ok(result)
    }

    async fn sign(&self, request: SignRequest) -> Result<Vec<u8>> {
        let file_name = request.image.file_name.clone();

        let mut form = Form::new()
            .text("title", request.title)
            .part("image", image_part(request.image)?);
        form = add_declaration(form, "ai_inference", request.ai_inference);
        form = add_declaration(form, "ai_generative_training", request.ai_generative_training);

        let response = self.post("sign", form).await?;
        let signed = response
            .bytes()
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;

        info!(file_name = %file_name, bytes = signed.len(), "Signed image upstream");

        Ok(signed.to_vec())
    }
}
