//! Upload surface state machine
//!
//! `Empty -> HasCandidate -> Processing -> HasCandidate | Empty`
//!
//! The surface owns at most one candidate. Every candidate carries a preview
//! handle which is released when the candidate is replaced, discarded or the
//! surface itself is dropped.

use crate::media::ImageFile;
use crate::preview::{PreviewHandle, PreviewStore};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UploadState {
    #[default]
    Empty,
    HasCandidate,
    Processing,
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadState::Empty => write!(f, "empty"),
            UploadState::HasCandidate => write!(f, "has-candidate"),
            UploadState::Processing => write!(f, "processing"),
        }
    }
}

/// The currently selected image awaiting or undergoing analysis
#[derive(Debug)]
pub struct UploadCandidate {
    file: ImageFile,
    preview: PreviewHandle,
}

impl UploadCandidate {
    pub fn file(&self) -> &ImageFile {
        &self.file
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

/// Render-ready view of the surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSnapshot {
    pub state: UploadState,
    pub preview_url: Option<String>,
    pub file_name: Option<String>,
    pub dragging: bool,
    pub interactive: bool,
}

impl SurfaceSnapshot {
    pub fn is_processing(&self) -> bool {
        self.state == UploadState::Processing
    }

    pub fn has_candidate(&self) -> bool {
        self.state != UploadState::Empty
    }
}

pub struct UploadSurface<P: PreviewStore> {
    store: P,
    candidate: Option<UploadCandidate>,
    processing: bool,
    dragging: bool,
}

impl<P: PreviewStore> UploadSurface<P> {
    pub fn new(store: P) -> Self {
        Self {
            store,
            candidate: None,
            processing: false,
            dragging: false,
        }
    }

    pub fn state(&self) -> UploadState {
        match (&self.candidate, self.processing) {
            (Some(_), true) => UploadState::Processing,
            (Some(_), false) => UploadState::HasCandidate,
            (None, _) => UploadState::Empty,
        }
    }

    /// Drop zone and analyze control are inert while processing
    pub fn is_interactive(&self) -> bool {
        !self.processing
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn drag_enter(&mut self) {
        if self.is_interactive() {
            self.dragging = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Accept a dropped or picked file as the new candidate
    pub fn submit(&mut self, file: ImageFile) -> CoreResult<&UploadCandidate> {
        if self.processing {
            return Err(CoreError::AnalysisInProgress);
        }
        self.dragging = false;

        if !file.is_image() {
            return Err(CoreError::InvalidFileType(file.mime_type));
        }

        let preview = self.store.allocate(&file)?;
        if let Some(previous) = self.candidate.take() {
            self.store.release(previous.preview);
        }

        tracing::debug!("Candidate {} ({} bytes) is active", file.file_name, file.len());
        Ok(&*self.candidate.insert(UploadCandidate { file, preview }))
    }

    pub fn begin_processing(&mut self) -> CoreResult<&UploadCandidate> {
        if self.processing {
            return Err(CoreError::AnalysisInProgress);
        }
        let candidate = self.candidate.as_ref().ok_or(CoreError::NoCandidate)?;
        self.processing = true;
        self.dragging = false;
        Ok(candidate)
    }

    /// Leave the processing state; the candidate is kept either way
    pub fn finish_processing(&mut self) {
        self.processing = false;
    }

    /// Discard the current candidate ("upload a different image")
    pub fn discard(&mut self) -> CoreResult<()> {
        if self.processing {
            return Err(CoreError::AnalysisInProgress);
        }
        if let Some(candidate) = self.candidate.take() {
            self.store.release(candidate.preview);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            state: self.state(),
            preview_url: self.candidate.as_ref().map(|c| c.preview.url().to_string()),
            file_name: self.candidate.as_ref().map(|c| c.file.file_name.clone()),
            dragging: self.dragging,
            interactive: self.is_interactive(),
        }
    }
}

impl<P: PreviewStore> Drop for UploadSurface<P> {
    fn drop(&mut self) {
        if let Some(candidate) = self.candidate.take() {
            self.store.release(candidate.preview);
        }
    }
}
