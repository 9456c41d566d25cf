//! Mock analysis service
//!
//! Stands in for a real inference pipeline: waits `delay_ms`, then draws a
//! confidence score and sub-scores from the configured policy.

use super::{ensure_analyzable, AnalysisPolicy, SignatureAnalyzer};
use crate::media::ImageFile;
use crate::verdict::{MatchDetails, VerificationVerdict};
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockAnalyzer {
    policy: AnalysisPolicy,
    rng: Mutex<StdRng>,
}

impl MockAnalyzer {
    pub fn new(policy: AnalysisPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic score stream, for tests and reproducible demos
    pub fn with_seed(policy: AnalysisPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    /// Draw one outcome without the simulated latency
    pub fn draw(&self) -> CoreResult<VerificationVerdict> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let policy = &self.policy;

        if policy.failure_rate > 0.0 && rng.random::<f64>() < policy.failure_rate {
            return Err(CoreError::Analysis(
                "analysis service unavailable (simulated)".to_string(),
            ));
        }

        let confidence_score: f64 = rng.random();
        let span = 1.0 - policy.sub_score_floor;
        let details = MatchDetails {
            style_match: policy.sub_score_floor + rng.random::<f64>() * span,
            pressure_match: policy.sub_score_floor + rng.random::<f64>() * span,
            flow_match: policy.sub_score_floor + rng.random::<f64>() * span,
        };

        let mut verdict = VerificationVerdict::from_score(confidence_score, policy.threshold)
            .with_match_details(details);
        if rng.random::<f64>() < policy.reference_probability {
            verdict = verdict.with_reference(policy.reference_signature_url.clone());
        }
        Ok(verdict)
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisPolicy::default())
    }
}

#[async_trait]
impl SignatureAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, file: &ImageFile) -> CoreResult<VerificationVerdict> {
        ensure_analyzable(file)?;
        tracing::debug!(
            "Mock analysis of {} ({} bytes), {} ms delay",
            file.file_name,
            file.len(),
            self.policy.delay_ms
        );

        if self.policy.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.policy.delay_ms)).await;
        }

        let verdict = self.draw()?;
        tracing::info!(
            "Mock verdict for {}: authentic={} confidence={:.3}",
            file.file_name,
            verdict.is_authentic,
            verdict.confidence_score
        );
        Ok(verdict)
    }
}
