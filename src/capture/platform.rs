//! The two supported interactive selection tools.
//!
//! Pure mapping from an OS name to a program and its arguments; nothing
//! here touches the system.

use super::{CaptureBackend, CaptureError};
use std::ffi::OsString;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTool {
    /// macOS `screencapture -s <file>`
    Screencapture,
    /// Linux `scrot -s <file>`
    Scrot,
}

impl PlatformTool {
    /// Pick the tool for an OS name as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Result<Self, CaptureError> {
        match os {
            "macos" => Ok(PlatformTool::Screencapture),
            "linux" => Ok(PlatformTool::Scrot),
            other => Err(CaptureError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// The tool for the platform this binary was built for.
    pub fn current() -> Result<Self, CaptureError> {
        Self::for_os(std::env::consts::OS)
    }
}

impl CaptureBackend for PlatformTool {
    fn name(&self) -> &str {
        self.program()
    }

    fn program(&self) -> &str {
        match self {
            PlatformTool::Screencapture => "screencapture",
            PlatformTool::Scrot => "scrot",
        }
    }

    fn args(&self, output: &Path) -> Vec<OsString> {
        // Both tools use -s for interactive selection.
        vec![OsString::from("-s"), output.as_os_str().to_os_string()]
    }
}
