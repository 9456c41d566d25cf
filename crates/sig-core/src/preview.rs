//! Revocable preview handles for upload candidates

use crate::media::ImageFile;
use crate::CoreResult;
use std::collections::BTreeSet;

/// A locally created preview of an uploaded image.
///
/// Handles are deliberately not `Clone`: releasing consumes the handle, so
/// each allocation is released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    id: u64,
    url: String,
}

impl PreviewHandle {
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Allocates and releases preview handles
pub trait PreviewStore {
    fn allocate(&mut self, file: &ImageFile) -> CoreResult<PreviewHandle>;

    fn release(&mut self, handle: PreviewHandle);
}

/// Preview store that only tracks handle bookkeeping
#[derive(Debug, Default)]
pub struct InMemoryPreviewStore {
    next_id: u64,
    live: BTreeSet<u64>,
    released: Vec<u64>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn allocated_count(&self) -> u64 {
        self.next_id
    }

    /// Ids in the order they were released
    pub fn released(&self) -> &[u64] {
        &self.released
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn allocate(&mut self, file: &ImageFile) -> CoreResult<PreviewHandle> {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        tracing::debug!("Allocated preview {} for {}", id, file.file_name);
        Ok(PreviewHandle::new(id, format!("preview://{}/{}", id, file.file_name)))
    }

    fn release(&mut self, handle: PreviewHandle) {
        if self.live.remove(&handle.id) {
            self.released.push(handle.id);
            tracing::debug!("Released preview {}", handle.id);
        } else {
            tracing::warn!("Preview {} was not live", handle.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::png;

    #[test]
    fn test_allocate_and_release() {
        let mut store = InMemoryPreviewStore::new();
        let first = store.allocate(&png("a.png")).unwrap();
        let second = store.allocate(&png("b.png")).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.url(), "preview://0/a.png");
        assert_eq!(store.live_count(), 2);

        store.release(first);
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.released(), &[0]);
        assert_eq!(store.allocated_count(), 2);
    }

    #[test]
    fn test_foreign_handle_is_ignored() {
        let mut store = InMemoryPreviewStore::new();
        store.release(PreviewHandle::new(42, "preview://42/x.png"));
        assert!(store.released().is_empty());
    }
}
