//! Multipart form reading shared by the upload handlers

use axum::extract::Multipart;
use std::collections::HashMap;

use c2pa_lens_client::ImageUpload;

use crate::api::error::ApiError;

/// Name of the multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// File name used when the client sends none
const FALLBACK_FILE_NAME: &str = "upload";

/// A fully read multipart upload form
#[derive(Debug, Default)]
pub struct UploadForm {
    image: Option<ImageUpload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every field of `multipart`, rejecting images over `max_upload_bytes`
    pub async fn read(mut multipart: Multipart, max_upload_bytes: usize) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            if name == IMAGE_FIELD {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(FALLBACK_FILE_NAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                if data.len() > max_upload_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "Image too large: {} bytes (max: {} bytes)",
                        data.len(),
                        max_upload_bytes
                    )));
                }

                let mut upload = ImageUpload::new(data.to_vec(), file_name);
                if let Some(content_type) = content_type {
                    upload = upload.with_content_type(content_type);
                }
                form.image = Some(upload);
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Take the uploaded image, failing if none or an empty one was sent
    pub fn take_image(&mut self) -> Result<ImageUpload, ApiError> {
        match self.image.take() {
            Some(upload) if !upload.is_empty() => Ok(upload),
            Some(_) => Err(ApiError::BadRequest(format!(
                "Field '{}' is empty",
                IMAGE_FIELD
            ))),
            None => Err(ApiError::BadRequest(format!(
                "Missing required field '{}'",
                IMAGE_FIELD
            ))),
        }
    }

    /// Text value of a field; blank values count as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Text value of a required field
    pub fn required_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing required field '{}'", name)))
    }
}
