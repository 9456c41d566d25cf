//! Signature analysis routes

use super::read_image_part;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use sig_core::analysis::ensure_analyzable;
use sig_core::{AnalysisPolicy, VerificationVerdict};
use std::sync::Arc;
use uuid::Uuid;

pub async fn get_policy(State(state): State<Arc<AppState>>) -> Json<AnalysisPolicy> {
    Json(state.policy.clone())
}

/// Analyze an uploaded signature image
pub async fn verify_signature(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<VerificationVerdict>, ApiError> {
    let request_id = Uuid::new_v4();
    let file = read_image_part(multipart).await?;
    ensure_analyzable(&file)?;

    tracing::info!(
        %request_id,
        "Analyzing {} ({}, {} bytes) with {}",
        file.file_name,
        file.mime_type,
        file.len(),
        state.analyzer.name()
    );

    let verdict = state.analyzer.analyze(&file).await?;
    tracing::info!(
        %request_id,
        "Verdict: authentic={} confidence={:.3}",
        verdict.is_authentic,
        verdict.confidence_score
    );

    Ok(Json(verdict))
}

#[cfg(test)]
mod tests {
    use crate::build_router;
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sig_core::AnalysisPolicy;
    use tower::ServiceExt;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_verify_returns_verdict() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("file", "sig.png", Some("image/png"), PNG);

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let score = json["confidenceScore"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(json["isAuthentic"].as_bool().unwrap(), score > 0.7);
        assert!(json["matchDetails"]["styleMatch"].as_f64().unwrap() >= 0.4);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_sniffed() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("file", "scan", None, PNG);

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_image_is_unsupported() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("file", "contract.pdf", Some("application/pdf"), b"%PDF-1.7\n");

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let json = body_json(resp).await;
        assert_eq!(json["code"], 415);
        assert!(json["error"].as_str().unwrap().contains("application/pdf"));
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("attachment", "sig.png", Some("image/png"), PNG);

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_file_is_bad_request() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("file", "sig.png", Some("image/png"), b"");

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_untyped_file_is_bad_request() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let body = multipart_body("file", "sig.png", None, b"");

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], 400);
    }

    #[tokio::test]
    async fn test_analysis_failure_is_bad_gateway() {
        let policy = AnalysisPolicy {
            failure_rate: 1.0,
            ..AnalysisPolicy::instant()
        };
        let app = build_router(test_state(policy));
        let body = multipart_body("file", "sig.png", Some("image/png"), PNG);

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(resp).await["code"], 502);
    }

    #[tokio::test]
    async fn test_policy_endpoint() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let resp = app
            .oneshot(Request::builder().uri("/api/policy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["threshold"], 0.7);
        assert_eq!(json["delay_ms"], 0);
    }
}
