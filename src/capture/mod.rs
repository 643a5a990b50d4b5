//! Screen capture domain, public API.
//!
//! Capture is delegated to the platform's interactive selection tool.
//! External code should only use the items exported here.

mod platform;
mod screenshot;

pub use platform::PlatformTool;
pub use screenshot::{Capturer, SCREENSHOT_FILE};

use std::ffi::OsString;
use std::path::Path;

/// An external program that lets the user select a region and writes
/// the result as a PNG to the path it is given.
pub trait CaptureBackend {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Program looked up on `PATH`.
    fn program(&self) -> &str;

    /// Arguments that make the program write to `output`.
    fn args(&self, output: &Path) -> Vec<OsString>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no screenshot tool for platform {0:?}")]
    UnsupportedPlatform(String),

    #[error("screenshot tool `{0}` not found on PATH")]
    ToolMissing(String),

    #[error("failed to create temporary directory: {0}")]
    TempDir(std::io::Error),

    #[error("failed to launch `{tool}`: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("`{tool}` exited with {status}")]
    ToolFailed { tool: String, status: String },

    #[error("no screenshot was produced (selection cancelled?): {0}")]
    ReadOutput(std::io::Error),
}
