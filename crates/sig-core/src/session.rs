//! Page-level verification controller
//!
//! Ties the upload surface, the analysis service and the notifier together.
//! One analysis may be outstanding at a time; the surface's processing state
//! and the attempt-numbered [`AnalysisTicket`] enforce it.

use crate::analysis::SignatureAnalyzer;
use crate::media::ImageFile;
use crate::notify::{Notification, Notifier};
use crate::preview::PreviewStore;
use crate::upload::{SurfaceSnapshot, UploadState, UploadSurface};
use crate::verdict::VerificationVerdict;
use crate::{CoreError, CoreResult};
use tracing::{error, info, warn};

/// Proof that an analysis was started, carrying the payload to analyze
#[derive(Debug)]
pub struct AnalysisTicket {
    attempt: u64,
    file: ImageFile,
}

impl AnalysisTicket {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn file(&self) -> &ImageFile {
        &self.file
    }
}

pub struct VerificationSession<P: PreviewStore, N: Notifier> {
    surface: UploadSurface<P>,
    verdict: Option<VerificationVerdict>,
    notifier: N,
    attempts: u64,
}

impl<P: PreviewStore, N: Notifier> VerificationSession<P, N> {
    pub fn new(store: P, notifier: N) -> Self {
        Self {
            surface: UploadSurface::new(store),
            verdict: None,
            notifier,
            attempts: 0,
        }
    }

    pub fn state(&self) -> UploadState {
        self.surface.state()
    }

    pub fn surface(&self) -> &UploadSurface<P> {
        &self.surface
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.surface.snapshot()
    }

    pub fn verdict(&self) -> Option<&VerificationVerdict> {
        self.verdict.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn drag_enter(&mut self) {
        self.surface.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        self.surface.drag_leave();
    }

    /// Accept a dropped or picked file; non-images raise a warning
    pub fn select_file(&mut self, file: ImageFile) -> CoreResult<()> {
        match self.surface.submit(file) {
            Ok(candidate) => {
                info!("Selected {}", candidate.file().file_name);
                self.verdict = None;
                Ok(())
            }
            Err(CoreError::InvalidFileType(mime)) => {
                warn!("Rejected upload of type {}", mime);
                self.notifier.notify(Notification::invalid_file_type());
                Err(CoreError::InvalidFileType(mime))
            }
            Err(e) => Err(e),
        }
    }

    /// Enter the processing state for the current candidate
    pub fn begin_analysis(&mut self) -> CoreResult<AnalysisTicket> {
        let candidate = self.surface.begin_processing()?;
        let file = candidate.file().clone();

        self.attempts += 1;
        self.verdict = None;
        info!("Analysis #{} started for {}", self.attempts, file.file_name);

        Ok(AnalysisTicket {
            attempt: self.attempts,
            file,
        })
    }

    /// Settle an analysis started with [`begin_analysis`](Self::begin_analysis)
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: CoreResult<VerificationVerdict>,
    ) -> CoreResult<&VerificationVerdict> {
        if ticket.attempt != self.attempts || self.surface.state() != UploadState::Processing {
            return Err(CoreError::StaleTicket(ticket.attempt));
        }
        self.surface.finish_processing();

        match outcome.and_then(|verdict| verdict.validate().map(|_| verdict)) {
            Ok(verdict) => {
                info!(
                    "Analysis #{} settled: authentic={} confidence={:.3}",
                    ticket.attempt, verdict.is_authentic, verdict.confidence_score
                );
                self.notifier.notify(Notification::analysis_summary(&verdict));
                Ok(&*self.verdict.insert(verdict))
            }
            Err(e) => {
                error!("Error analyzing signature {}: {}", ticket.file.file_name, e);
                self.notifier.notify(Notification::analysis_failed());
                Err(e)
            }
        }
    }

    pub async fn analyze<A>(&mut self, analyzer: &A) -> CoreResult<&VerificationVerdict>
    where
        A: SignatureAnalyzer + ?Sized,
    {
        let ticket = self.begin_analysis()?;
        let outcome = analyzer.analyze(ticket.file()).await;
        self.complete_analysis(ticket, outcome)
    }

    /// Select a file and analyze it straight away
    pub async fn upload_and_analyze<A>(
        &mut self,
        file: ImageFile,
        analyzer: &A,
    ) -> CoreResult<&VerificationVerdict>
    where
        A: SignatureAnalyzer + ?Sized,
    {
        self.select_file(file)?;
        self.analyze(analyzer).await
    }

    /// Drop the candidate and any verdict ("verify another")
    pub fn discard(&mut self) -> CoreResult<()> {
        self.surface.discard()?;
        self.verdict = None;
        Ok(())
    }
}
