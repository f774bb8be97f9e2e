//! Verification Handler
//!
//! Forwards an uploaded image to the upstream service and answers with the
//! summarized verification result.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use c2pa_lens_core::{summarize, Summary};

use super::form::UploadForm;
use super::AppState;
use crate::api::error::ApiError;

/// Verify an image and summarize its provenance
///
/// POST /api/c2pa/verify
pub async fn verify_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Summary>, ApiError> {
    let mut form = UploadForm::read(multipart, state.config.max_upload_bytes).await?;
    let upload = form.take_image()?;
    let file_name = upload.file_name.clone();
    let size = upload.len();

    let result = state.service.verify(upload).await.map_err(|e| {
        warn!(file_name = %file_name, error = %e, "Upstream verification failed");
        ApiError::from(e)
    })?;

    let summary = summarize(&result);

    info!(
        file_name = %file_name,
        size = size,
        validation_state = ?summary.validation_state,
        manifests = summary.history.len(),
        "Verified image"
    );

    Ok(Json(summary))
}
