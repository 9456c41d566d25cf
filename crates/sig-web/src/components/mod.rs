//! Reusable components

mod header;
mod result;
mod toast;
mod upload;

pub use header::Header;
pub use result::SignatureResult;
pub use toast::{ToastNotifier, Toasts};
pub use upload::SignatureUpload;
