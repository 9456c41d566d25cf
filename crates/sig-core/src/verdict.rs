//! Verification verdict returned by the analysis service

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Result of one analysis call.
///
/// Field names follow the wire contract (`isAuthentic`, `confidenceScore`,
/// `matchDetails`, `referenceSignature`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationVerdict {
    pub is_authentic: bool,
    pub confidence_score: f64,
    #[serde(default)]
    pub match_details: Option<MatchDetails>,
    #[serde(default)]
    pub reference_signature: Option<String>,
}

/// Per-aspect similarity scores, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub style_match: f64,
    pub pressure_match: f64,
    pub flow_match: f64,
}

impl VerificationVerdict {
    /// Build a verdict by thresholding the confidence score
    pub fn from_score(confidence_score: f64, threshold: f64) -> Self {
        Self {
            is_authentic: confidence_score > threshold,
            confidence_score,
            match_details: None,
            reference_signature: None,
        }
    }

    pub fn with_match_details(mut self, details: MatchDetails) -> Self {
        self.match_details = Some(details);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_signature = Some(reference.into());
        self
    }

    /// Reject non-finite or out-of-range scores
    pub fn validate(&self) -> CoreResult<()> {
        check_unit("confidenceScore", self.confidence_score)?;
        if let Some(details) = &self.match_details {
            check_unit("styleMatch", details.style_match)?;
            check_unit("pressureMatch", details.pressure_match)?;
            check_unit("flowMatch", details.flow_match)?;
        }
        if let Some(reference) = &self.reference_signature {
            if reference.trim().is_empty() {
                return Err(CoreError::MalformedVerdict(
                    "referenceSignature is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::MalformedVerdict(format!(
            "{} out of range: {}",
            field, value
        )))
    }
}
