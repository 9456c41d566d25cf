//! Uploaded image payloads

use sha2::{Digest, Sha256};

/// MIME type used when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

/// An uploaded file as handed over by a drop zone, file picker or HTTP part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build a file whose MIME type is sniffed from its magic bytes
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = sniff_mime(&bytes).unwrap_or(OCTET_STREAM);
        Self::new(file_name, mime_type, bytes)
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hex-encoded SHA-256 of the payload
    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// Only `image/*` types are accepted as candidates
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Detect an image MIME type from magic bytes
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// Pick the declared type unless it is missing or generic
pub fn resolve_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() && !mime.eq_ignore_ascii_case(OCTET_STREAM) => {
            mime.to_string()
        }
        _ => sniff_mime(bytes).unwrap_or(OCTET_STREAM).to_string(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ImageFile;

    pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    pub const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
    pub const PDF_MAGIC: &[u8] = b"%PDF-1.7\n";

    pub fn jpeg(name: &str) -> ImageFile {
        ImageFile::new(name, "image/jpeg", JPEG_MAGIC.to_vec())
    }

    pub fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", PNG_MAGIC.to_vec())
    }

    pub fn pdf(name: &str) -> ImageFile {
        ImageFile::new(name, "application/pdf", PDF_MAGIC.to_vec())
    }
}
