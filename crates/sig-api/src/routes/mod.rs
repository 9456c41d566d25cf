//! API routes

pub mod reports;
pub mod verify;

use crate::error::ApiError;
use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use sig_core::media::resolve_mime;
use sig_core::{CoreError, ImageFile};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Pull the `file` part out of a multipart upload.
///
/// Other fields are skipped and an empty part is rejected. The MIME type comes from the part header, or is
/// sniffed from the payload when the header is absent or generic.
pub(crate) async fn read_image_part(mut multipart: Multipart) -> Result<ImageFile, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let declared = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        if data.is_empty() {
            return Err(CoreError::EmptyPayload.into());
        }

        let mime_type = resolve_mime(declared.as_deref(), &data);
        return Ok(ImageFile::new(file_name, mime_type, data.to_vec()));
    }

    Err(ApiError::MissingFile)
}
