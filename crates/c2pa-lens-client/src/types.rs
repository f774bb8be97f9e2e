//! Request types for the upstream adapter

use c2pa_lens_core::TrainingUse;

/// Fallback MIME type for uploads without a declared content type
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw image bytes
    pub bytes: Vec<u8>,

    /// Original file name, forwarded to the upstream service
    pub file_name: String,

    /// Declared MIME type (e.g. `image/jpeg`)
    pub content_type: Option<String>,
}

impl ImageUpload {
    /// Create a new upload
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: None,
        }
    }

    /// Set the content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Content type to answer with, falling back to `application/octet-stream`
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Size of the upload in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the upload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Declared permission for one AI-use category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiUsageDeclaration {
    pub usage: TrainingUse,

    /// Free-text constraints, meaningful for `constrained`
    pub constraints_info: Option<String>,
}

impl AiUsageDeclaration {
    pub fn new(usage: TrainingUse) -> Self {
        Self {
            usage,
            constraints_info: None,
        }
    }

    pub fn with_constraints_info(mut self, constraints_info: impl Into<String>) -> Self {
        self.constraints_info = Some(constraints_info.into());
        self
    }
}

/// Request to sign an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    /// Title recorded in the new manifest
    pub title: String,

    pub image: ImageUpload,

    /// Declaration for `c2pa.ai_inference`
    pub ai_inference: Option<AiUsageDeclaration>,

    /// Declaration for `c2pa.ai_generative_training`
    pub ai_generative_training: Option<AiUsageDeclaration>,
}

impl SignRequest {
    /// Create a sign request without AI-usage declarations
    pub fn new(title: impl Into<String>, image: ImageUpload) -> Self {
        Self {
            title: title.into(),
            image,
            ai_inference: None,
            ai_generative_training: None,
        }
    }

    pub fn with_ai_inference(mut self, declaration: AiUsageDeclaration) -> Self {
        self.ai_inference = Some(declaration);
        self
    }

    pub fn with_ai_generative_training(mut self, declaration: AiUsageDeclaration) -> Self {
        self.ai_generative_training = Some(declaration);
        self
    }
}
