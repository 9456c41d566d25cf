//! HTTP analysis service client
//!
//! Sends the image as multipart field `file` and decodes the JSON verdict.
//! `submit` works on every target; the [`SignatureAnalyzer`] impl is only
//! provided where reqwest futures are `Send`.

use super::ensure_analyzable;
#[cfg(not(target_arch = "wasm32"))]
use super::SignatureAnalyzer;
use crate::media::ImageFile;
use crate::verdict::VerificationVerdict;
use crate::{CoreError, CoreResult};
#[cfg(not(target_arch = "wasm32"))]
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Error body returned by the analysis service
#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

#[derive(Debug, Clone)]
pub struct RemoteAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteAnalyzer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, file: &ImageFile) -> CoreResult<VerificationVerdict> {
        ensure_analyzable(file)?;
        tracing::debug!("Submitting {} to {}", file.file_name, self.endpoint);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ServiceError>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(CoreError::Analysis(format!(
                "analysis service returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let verdict: VerificationVerdict = response.json().await?;
        verdict.validate()?;
        Ok(verdict)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl SignatureAnalyzer for RemoteAnalyzer {
    fn name(&self) -> &str {
        "remote"
    }

    async fn analyze(&self, file: &ImageFile) -> CoreResult<VerificationVerdict> {
        self.submit(file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::{jpeg, pdf};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the endpoint URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/api/verify", addr)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            });
        match length {
            Some(length) => request.len() >= header_end + 4 + length,
            None => text.ends_with("--\r\n"),
        }
    }

    #[tokio::test]
    async fn test_successful_verdict() {
        let url = serve_once(
            "200 OK",
            r#"{"isAuthentic":true,"confidenceScore":0.93,"matchDetails":{"styleMatch":0.9,"pressureMatch":0.8,"flowMatch":0.85},"referenceSignature":null}"#,
        )
        .await;

        let verdict = RemoteAnalyzer::new(url).analyze(&jpeg("sig.jpg")).await.unwrap();
        assert!(verdict.is_authentic);
        assert_eq!(verdict.confidence_score, 0.93);
        assert!(verdict.reference_signature.is_none());
    }

    #[tokio::test]
    async fn test_service_error_is_rejection() {
        let url = serve_once("502 Bad Gateway", r#"{"error":"model offline","code":502}"#).await;

        let err = RemoteAnalyzer::new(url).submit(&jpeg("sig.jpg")).await.unwrap_err();
        match err {
            CoreError::Analysis(message) => {
                assert!(message.contains("502"));
                assert!(message.contains("model offline"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_verdict_is_rejection() {
        let url = serve_once("200 OK", r#"{"isAuthentic":true,"confidenceScore":3.5}"#).await;

        let err = RemoteAnalyzer::new(url).submit(&jpeg("sig.jpg")).await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedVerdict(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let analyzer = RemoteAnalyzer::new(format!("http://{}/api/verify", addr));
        let err = analyzer.submit(&jpeg("sig.jpg")).await.unwrap_err();
        assert!(matches!(err, CoreError::Transport(_)));
    }

    #[tokio::test]
    async fn test_non_image_never_leaves_the_client() {
        let analyzer = RemoteAnalyzer::new("http://127.0.0.1:9/api/verify");
        let err = analyzer.submit(&pdf("contract.pdf")).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileType(_)));
    }
}
