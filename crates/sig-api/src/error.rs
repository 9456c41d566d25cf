//! API error type

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sig_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing multipart field 'file'")]
    MissingFile,

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Unsupported report format: {0}")]
    BadFormat(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// JSON body returned on error
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::BadFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Core(e) => match e {
                CoreError::InvalidFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                CoreError::EmptyPayload | CoreError::UnsupportedFormat(_) => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::Analysis(_)
                | CoreError::Transport(_)
                | CoreError::MalformedVerdict(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}
