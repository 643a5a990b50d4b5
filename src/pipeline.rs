//! The snip pipeline: capture → hash → upload → publish.
//!
//! Strictly sequential. The first failing stage ends the run and later
//! stages are never touched.

use crate::capture::{CaptureBackend, Capturer, PlatformTool};
use crate::config::Config;
use crate::error::AppError;
use crate::hash::{self, CONTENT_TYPE};
use crate::publish::{self, Clipboard};
use crate::upload::ObjectStore;
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snip {
    /// Storage key, `<sha1-hex>.png`.
    pub key: String,
    /// Link placed on the clipboard.
    pub url: String,
    /// Size of the uploaded screenshot.
    pub bytes: usize,
}

pub struct Pipeline<'a, S, C> {
    config: &'a Config,
    store: &'a S,
    clipboard: &'a mut C,
    temp_root: PathBuf,
}

impl<'a, S, C> Pipeline<'a, S, C>
where
    S: ObjectStore,
    C: Clipboard,
{
    pub fn new(config: &'a Config, store: &'a S, clipboard: &'a mut C) -> Self {
        Self {
            config,
            store,
            clipboard,
            temp_root: std::env::temp_dir(),
        }
    }

    /// Stage screenshots under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    /// Resolve the selection tool for `os` and run. An unsupported OS fails
    /// here, before any capture or network activity.
    pub async fn run_on_platform(&mut self, os: &str) -> Result<Snip, AppError> {
        let tool = PlatformTool::for_os(os)?;
        self.run(tool).await
    }

    pub async fn run<B: CaptureBackend>(&mut self, backend: B) -> Result<Snip, AppError> {
        let capturer = Capturer::new(backend).with_temp_root(&self.temp_root);
        let screenshot = capturer.capture().await?;

        // The same key goes to storage and into the link.
        let key = hash::object_key(&screenshot);

        self.store.put(&key, &screenshot, CONTENT_TYPE).await?;

        let url = publish::publish(
            &mut *self.clipboard,
            &mut std::io::stdout().lock(),
            &self.config.region,
            &self.config.bucket,
            &key,
        )?;

        Ok(Snip {
            key,
            url,
            bytes: screenshot.len(),
        })
    }
}
