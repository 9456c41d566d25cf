//! Report generation routes

use super::read_image_part;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use sig_core::analysis::ensure_analyzable;
use sig_core::report::generate_report;
use sig_core::{ReportFormat, VerificationReport};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
}

/// Analyze an upload and return the result as a rendered report
pub async fn verify_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let format: ReportFormat = match query.format.as_deref() {
        Some(raw) => raw.parse().map_err(|_| ApiError::BadFormat(raw.to_string()))?,
        None => ReportFormat::Markdown,
    };

    let request_id = Uuid::new_v4();
    let file = read_image_part(multipart).await?;
    ensure_analyzable(&file)?;
    tracing::info!(%request_id, "Generating {:?} report for {}", format, file.file_name);

    let verdict = state.analyzer.analyze(&file).await?;
    let report = VerificationReport::new(&file, verdict, chrono::Utc::now());
    let content = generate_report(&report, format)?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], content))
}
