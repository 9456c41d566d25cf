//! Signature Verification API Server

mod error;
mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sig_core::{AnalysisPolicy, MockAnalyzer, SignatureAnalyzer};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub analyzer: Arc<dyn SignatureAnalyzer>,
    pub policy: AnalysisPolicy,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub max_upload_size: usize,
    pub analysis_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "./dist".to_string())
                .into(),
            max_upload_size: env_parse("MAX_UPLOAD_SIZE").unwrap_or(10 * 1024 * 1024), // 10MB
            analysis_seed: env_parse("ANALYSIS_SEED"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Mock policy with environment overrides
fn policy_from_env() -> AnalysisPolicy {
    let defaults = AnalysisPolicy::default();
    AnalysisPolicy {
        delay_ms: env_parse("ANALYSIS_DELAY_MS").unwrap_or(defaults.delay_ms),
        failure_rate: env_parse("ANALYSIS_FAILURE_RATE").unwrap_or(defaults.failure_rate),
        reference_signature_url: std::env::var("REFERENCE_SIGNATURE_URL")
            .unwrap_or(defaults.reference_signature_url.clone()),
        ..defaults
    }
}

impl AppState {
    pub fn with_mock(policy: AnalysisPolicy, config: AppConfig) -> Self {
        let analyzer = match config.analysis_seed {
            Some(seed) => MockAnalyzer::with_seed(policy.clone(), seed),
            None => MockAnalyzer::new(policy.clone()),
        };
        Self {
            analyzer: Arc::new(analyzer),
            policy,
            config,
        }
    }
}

/// Build router
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_upload_size;

    Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Analysis contract
        .route("/api/policy", get(routes::verify::get_policy))
        .route("/api/verify", post(routes::verify::verify_signature))
        .route("/api/verify/report", post(routes::reports::verify_report))

        // Front-end bundle
        .fallback_service(static_files)

        .layer(DefaultBodyLimit::max(body_limit))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sig_api=debug,sig_core=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Signature Verification API Server");

    let config = AppConfig::default();
    let policy = policy_from_env();
    policy.validate()?;
    info!(
        "Mock analysis policy: threshold={} delay={}ms failure_rate={}",
        policy.threshold, policy.delay_ms, policy.failure_rate
    );

    let addr = config.bind_addr.clone();
    let state = Arc::new(AppState::with_mock(policy, config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let app = build_router(test_state(AnalysisPolicy::instant()));
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.resize(2 * 1024 * 1024, 0);
        let body = multipart_body("file", "huge.png", Some("image/png"), &data);

        let resp = app.oneshot(multipart_request("/api/verify", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
