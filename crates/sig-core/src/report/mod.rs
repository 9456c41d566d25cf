//! Report generation

pub mod json;
pub mod markdown;

use crate::media::ImageFile;
use crate::verdict::VerificationVerdict;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Downloadable record of one verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub sha256: String,
    pub verdict: VerificationVerdict,
    pub generated_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn new(file: &ImageFile, verdict: VerificationVerdict, generated_at: DateTime<Utc>) -> Self {
        Self {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.len(),
            sha256: file.sha256(),
            verdict,
            generated_at,
        }
    }
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    Html,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Json => "application/json",
            ReportFormat::Markdown => "text/markdown; charset=utf-8",
            ReportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Generate report in specified format
pub fn generate_report(report: &VerificationReport, format: ReportFormat) -> CoreResult<String> {
    match format {
        ReportFormat::Json => json::generate(report),
        ReportFormat::Markdown => Ok(markdown::generate(report)),
        ReportFormat::Html => Ok(markdown::generate_html(report)),
    }
}
