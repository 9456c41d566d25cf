//! Analysis service endpoint

use sig_core::RemoteAnalyzer;

pub const VERIFY_PATH: &str = "/api/verify";

/// Analyzer pointed at the server that served this page
pub fn analyzer() -> RemoteAnalyzer {
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    RemoteAnalyzer::new(format!("{}{}", origin, VERIFY_PATH))
}
