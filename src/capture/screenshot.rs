//! Runs the external selection tool. This is the layer that talks to the OS.
//!
//! Each capture gets its own temporary directory. The `TempDir` guard is
//! dropped on every return path, so the directory never outlives the call.

use super::{CaptureBackend, CaptureError};
use std::path::PathBuf;
use std::time::Instant;

/// File name the tool is told to write inside the temp directory.
pub const SCREENSHOT_FILE: &str = "screenshot.png";

pub struct Capturer<B> {
    backend: B,
    temp_root: PathBuf,
}

impl<B: CaptureBackend> Capturer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            temp_root: std::env::temp_dir(),
        }
    }

    /// Create per-capture directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    /// Let the user select a region and return the PNG bytes.
    ///
    /// Blocks until the tool exits; there is no timeout because the user
    /// may take as long as they like to drag the selection.
    pub async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        let start = Instant::now();
        let name = self.backend.name().to_string();

        let program = which::which(self.backend.program())
            .map_err(|_| CaptureError::ToolMissing(self.backend.program().to_string()))?;

        let dir = tempfile::Builder::new()
            .prefix("s3snip-")
            .tempdir_in(&self.temp_root)
            .map_err(CaptureError::TempDir)?;
        let output = dir.path().join(SCREENSHOT_FILE);

        log::info!("[CAPTURE] Waiting for {} selection", name);

        let status = tokio::process::Command::new(&program)
            .args(self.backend.args(&output))
            .status()
            .await
            .map_err(|source| CaptureError::Spawn {
                tool: name.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CaptureError::ToolFailed {
                tool: name,
                status: status.to_string(),
            });
        }

        let bytes = std::fs::read(&output).map_err(CaptureError::ReadOutput)?;

        log::info!(
            "[CAPTURE] Captured {} bytes in {}ms",
            bytes.len(),
            start.elapsed().as_millis()
        );
        Ok(bytes)
    }
}
