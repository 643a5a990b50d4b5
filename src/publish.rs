//! Public link construction and the clipboard hand-off.
//!
//! The clipboard is the only way the user gets the link, so failing to
//! write it fails the whole run. The link is also printed first, so it is
//! never lost even when the clipboard hand-off goes wrong.

use crate::upload::endpoint;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write clipboard: {0}")]
    Write(String),
}

/// Plain-text clipboard that replaces whatever it held before.
///
/// `set_text` may block for as long as the text has to be served.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        // X11/Wayland selections die with the owning process, so keep
        // serving until another program takes the selection over.
        log::info!("[PUBLISH] Serving clipboard until another program replaces it");
        self.inner
            .set()
            .wait()
            .text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// `https://s3-<region>.amazonaws.com/<bucket>/<key>`
pub fn object_url(region: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint(region), bucket, key)
}

/// Format the link for `key`, print it to `out`, then put it on the
/// clipboard. Returns the link.
pub fn publish<C, W>(
    clipboard: &mut C,
    out: &mut W,
    region: &str,
    bucket: &str,
    key: &str,
) -> Result<String, ClipboardError>
where
    C: Clipboard + ?Sized,
    W: Write + ?Sized,
{
    let url = object_url(region, bucket, key);
    if let Err(e) = writeln!(out, "{}", url).and_then(|_| out.flush()) {
        log::warn!("[PUBLISH] Could not print link: {}", e);
    }
    clipboard.set_text(&url)?;
    log::info!("[PUBLISH] Copied {}", url);
    Ok(url)
}
