//! User-facing notifications
//!
//! The session never reaches for a global toast dispatcher; it is handed a
//! [`Notifier`] instead.

use crate::presentation::confidence_percent;
use crate::verdict::VerificationVerdict;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationVariant {
    Default,
    Warning,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: NotificationVariant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    /// Shown when a non-image file is dropped or picked
    pub fn invalid_file_type() -> Self {
        Self::new(
            "Invalid file type",
            "Please upload an image file (JPG, PNG, etc.)",
            NotificationVariant::Warning,
        )
    }

    /// Post-analysis summary
    pub fn analysis_summary(verdict: &VerificationVerdict) -> Self {
        let description = format!(
            "Confidence score: {}%",
            confidence_percent(verdict.confidence_score)
        );
        if verdict.is_authentic {
            Self::new("Signature verified", description, NotificationVariant::Default)
        } else {
            Self::new(
                "Potential forgery detected",
                description,
                NotificationVariant::Destructive,
            )
        }
    }

    pub fn analysis_failed() -> Self {
        Self::new(
            "Analysis failed",
            "There was an error analyzing the signature. Please try again.",
            NotificationVariant::Destructive,
        )
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => {
                tracing::info!("{}: {}", notification.title, notification.description)
            }
            NotificationVariant::Warning | NotificationVariant::Destructive => {
                tracing::warn!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps every notification; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_authentic_verdict() {
        let verdict = VerificationVerdict::from_score(0.934, 0.7);
        let note = Notification::analysis_summary(&verdict);
        assert_eq!(note.title, "Signature verified");
        assert_eq!(note.description, "Confidence score: 93%");
        assert_eq!(note.variant, NotificationVariant::Default);
    }

    #[test]
    fn test_summary_for_forgery() {
        let verdict = VerificationVerdict::from_score(0.42, 0.7);
        let note = Notification::analysis_summary(&verdict);
        assert_eq!(note.title, "Potential forgery detected");
        assert_eq!(note.description, "Confidence score: 42%");
        assert_eq!(note.variant, NotificationVariant::Destructive);
    }

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.notify(Notification::invalid_file_type());

        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.last().unwrap().variant, NotificationVariant::Warning);
    }
}
