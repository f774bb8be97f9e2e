//! Signing Handler
//!
//! Forwards an image, a title and optional AI-usage declarations to the
//! upstream service and streams the signed image back.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use c2pa_lens_client::{AiUsageDeclaration, SignRequest, DEFAULT_CONTENT_TYPE};
use c2pa_lens_core::TrainingUse;

use super::form::UploadForm;
use super::AppState;
use crate::api::error::ApiError;

pub const TITLE_FIELD: &str = "title";
pub const AI_INFERENCE_FIELD: &str = "ai_inference";
pub const AI_GENERATIVE_TRAINING_FIELD: &str = "ai_generative_training";

/// Sign an image with a new manifest
///
/// POST /api/c2pa/sign
pub async fn sign_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = UploadForm::read(multipart, state.config.max_upload_bytes).await?;
    let upload = form.take_image()?;
    let title = form.required_text(TITLE_FIELD)?.to_string();

    let content_type = HeaderValue::from_str(upload.content_type_or_default())
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let file_name = upload.file_name.clone();

    let mut request = SignRequest::new(title, upload);
    if let Some(declaration) = declaration(&form, AI_INFERENCE_FIELD)? {
        request = request.with_ai_inference(declaration);
    }
    if let Some(declaration) = declaration(&form, AI_GENERATIVE_TRAINING_FIELD)? {
        request = request.with_ai_generative_training(declaration);
    }

    let signed = state.service.sign(request).await.map_err(|e| {
        warn!(file_name = %file_name, error = %e, "Upstream signing failed");
        ApiError::from(e)
    })?;

    info!(file_name = %file_name, size = signed.len(), "Signed image");

    Ok(([(header::CONTENT_TYPE, content_type)], signed).into_response())
}

/// Parse the declaration for one AI-use category
///
/// `<name>_constraints_info` without `<name>` is rejected.
fn declaration(form: &UploadForm, name: &str) -> Result<Option<AiUsageDeclaration>, ApiError> {
    let constraints_field = format!("{}_constraints_info", name);
    let constraints_info = form.text(&constraints_field);

    let Some(value) = form.text(name) else {
        return match constraints_info {
            Some(_) => Err(ApiError::BadRequest(format!(
                "Field '{}' requires '{}'",
                constraints_field, name
            ))),
            None => Ok(None),
        };
    };

    let usage: TrainingUse = value.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Field '{}' must be one of allowed|notAllowed|constrained, got '{}'",
            name, value
        ))
    })?;

    let mut declaration = AiUsageDeclaration::new(usage);
    if let Some(info) = constraints_info {
        declaration = declaration.with_constraints_info(info);
    }
    Ok(Some(declaration))
}
