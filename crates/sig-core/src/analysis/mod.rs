//! Analysis service client
//!
//! [`SignatureAnalyzer`] is the seam between the upload workflow and whatever
//! produces verdicts. Two implementations ship with the crate:
//! - [`MockAnalyzer`]: waits a fixed delay and draws pseudo-random scores
//! - [`RemoteAnalyzer`]: posts the image to an HTTP analysis service

#[cfg(not(target_arch = "wasm32"))]
pub mod mock;
pub mod remote;

use crate::media::ImageFile;
use crate::verdict::VerificationVerdict;
use crate::{CoreError, CoreResult, AUTHENTICITY_THRESHOLD};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
pub use mock::MockAnalyzer;
pub use remote::RemoteAnalyzer;

/// Default reference image attached by the mock policy
pub const DEFAULT_REFERENCE_SIGNATURE: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e2/George_Washington_signature.svg/1200px-George_Washington_signature.svg.png";

/// Given an image, produce a verdict.
///
/// A failed call is an `Err`, never a half-filled verdict. No retries are
/// attempted at this layer.
#[async_trait]
pub trait SignatureAnalyzer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn analyze(&self, file: &ImageFile) -> CoreResult<VerificationVerdict>;
}

/// Knobs of the mock verdict generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPolicy {
    /// Confidence must exceed this to be called authentic
    pub threshold: f64,
    /// Simulated service latency
    pub delay_ms: u64,
    /// Lower bound of the style/pressure/flow sub-scores
    pub sub_score_floor: f64,
    /// Probability that a reference signature is attached
    pub reference_probability: f64,
    pub reference_signature_url: String,
    /// Probability of a simulated service failure
    pub failure_rate: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            threshold: AUTHENTICITY_THRESHOLD,
            delay_ms: 2000,
            sub_score_floor: 0.4,
            reference_probability: 0.7,
            reference_signature_url: DEFAULT_REFERENCE_SIGNATURE.to_string(),
            failure_rate: 0.0,
        }
    }
}

impl AnalysisPolicy {
    /// Same policy without the artificial latency
    pub fn instant() -> Self {
        Self {
            delay_ms: 0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        let unit = |name: &str, value: f64| {
            if value.is_finite() && (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(CoreError::InvalidConfig(format!(
                    "policy {} must be within [0, 1], got {}",
                    name, value
                )))
            }
        };
        unit("threshold", self.threshold)?;
        unit("sub_score_floor", self.sub_score_floor)?;
        unit("reference_probability", self.reference_probability)?;
        unit("failure_rate", self.failure_rate)?;
        if self.reference_probability > 0.0 && self.reference_signature_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "policy reference_signature_url must not be blank when references are attached"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Reject payloads no analyzer should see
pub fn ensure_analyzable(file: &ImageFile) -> CoreResult<()> {
    if !file.is_image() {
        return Err(CoreError::InvalidFileType(file.mime_type.clone()));
    }
    if file.is_empty() {
        return Err(CoreError::EmptyPayload);
    }
    Ok(())
}
