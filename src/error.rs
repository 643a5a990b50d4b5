//! Top-level error type and its mapping to process exit codes.
//!
//! Every stage returns its own error enum. They all funnel into `AppError`
//! so `run()` has exactly one place that decides what the user sees.

use crate::capture::CaptureError;
use crate::config::ConfigError;
use crate::publish::ClipboardError;
use crate::upload::UploadError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("screenshot failed: {0}")]
    Capture(CaptureError),

    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::UnsupportedPlatform(os) => AppError::UnsupportedPlatform(os),
            other => AppError::Capture(other),
        }
    }
}

impl AppError {
    /// Process exit status for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::UnsupportedPlatform(_) => 3,
            AppError::Capture(_) => 4,
            AppError::Upload(_) => 5,
            AppError::Clipboard(_) => 6,
            AppError::Runtime(_) => 1,
        }
    }
}
