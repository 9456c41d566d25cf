//! Pages

mod verify;

pub use verify::VerifyPage;
