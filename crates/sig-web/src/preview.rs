//! Object-URL backed previews

use js_sys::{Array, Uint8Array};
use sig_core::{CoreError, CoreResult, ImageFile, PreviewHandle, PreviewStore};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

/// Builds a `Blob` carrying the payload and MIME type
pub fn blob_from_bytes(bytes: &[u8], mime_type: &str) -> Result<Blob, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Hands out `blob:` URLs and revokes them on release
#[derive(Debug, Default)]
pub struct BlobUrlStore {
    next_id: u64,
}

impl PreviewStore for BlobUrlStore {
    fn allocate(&mut self, file: &ImageFile) -> CoreResult<PreviewHandle> {
        let blob = blob_from_bytes(&file.bytes, &file.mime_type)
            .map_err(|e| CoreError::Preview(format!("{:?}", e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| CoreError::Preview(format!("{:?}", e)))?;

        self.next_id += 1;
        tracing::debug!("Allocated preview {} for {}", self.next_id, file.file_name);
        Ok(PreviewHandle::new(self.next_id, url))
    }

    fn release(&mut self, handle: PreviewHandle) {
        if let Err(e) = Url::revoke_object_url(handle.url()) {
            tracing::warn!("Failed to revoke preview {}: {:?}", handle.id(), e);
        }
    }
}
