//! Signature Verification Core
//!
//! This crate provides the client-visible workflow of the signature
//! verifier: the analysis service contract, the upload state machine,
//! the page-level session controller and the result presentation.

pub mod analysis;
pub mod media;
pub mod notify;
pub mod presentation;
pub mod preview;
pub mod report;
pub mod session;
pub mod upload;
pub mod verdict;

use thiserror::Error;

pub use analysis::{AnalysisPolicy, RemoteAnalyzer, SignatureAnalyzer};
#[cfg(not(target_arch = "wasm32"))]
pub use analysis::MockAnalyzer;
pub use media::ImageFile;
pub use notify::{LogNotifier, Notification, NotificationVariant, Notifier, RecordingNotifier};
pub use presentation::{ConfidenceBand, ResultView, ScoreBar};
pub use preview::{InMemoryPreviewStore, PreviewHandle, PreviewStore};
pub use report::{ReportFormat, VerificationReport};
pub use session::{AnalysisTicket, VerificationSession};
pub use upload::{SurfaceSnapshot, UploadCandidate, UploadState, UploadSurface};
pub use verdict::{MatchDetails, VerificationVerdict};

/// Confidence above which the reference policy calls a signature authentic
pub const AUTHENTICITY_THRESHOLD: f64 = 0.7;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("Empty image payload")]
    EmptyPayload,

    #[error("No candidate selected")]
    NoCandidate,

    #[error("Analysis already in progress")]
    AnalysisInProgress,

    #[error("Analysis ticket {0} is no longer current")]
    StaleTicket(u64),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Malformed verdict: {0}")]
    MalformedVerdict(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Transport(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
