//! End-to-end tests for the snip pipeline with fake capture, storage and
//! clipboard. Capture backends are `sh` scripts, so these run on unix only.

#![cfg(unix)]

use s3snip_lib::capture::{CaptureBackend, CaptureError};
use s3snip_lib::config::Config;
use s3snip_lib::error::AppError;
use s3snip_lib::hash;
use s3snip_lib::pipeline::Pipeline;
use s3snip_lib::publish::{Clipboard, ClipboardError};
use s3snip_lib::upload::{ObjectStore, UploadError};
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::Path;

// ── Fakes ───────────────────────────────────────────────────────────

struct Script(&'static str);

impl CaptureBackend for Script {
    fn name(&self) -> &str {
        "script"
    }
    fn program(&self) -> &str {
        "sh"
    }
    fn args(&self, output: &Path) -> Vec<OsString> {
        vec!["-c".into(), self.0.into(), output.as_os_str().to_os_string()]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Put {
    key: String,
    body: Vec<u8>,
    content_type: String,
}

#[derive(Default)]
struct RecordingStore {
    puts: RefCell<Vec<Put>>,
    reject_with: Option<u16>,
}

impl RecordingStore {
    fn rejecting(code: u16) -> Self {
        Self {
            reject_with: Some(code),
            ..Default::default()
        }
    }
}

impl ObjectStore for RecordingStore {
    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError> {
        self.puts.borrow_mut().push(Put {
            key: key.to_string(),
            body: body.to_vec(),
            content_type: content_type.to_string(),
        });
        match self.reject_with {
            Some(code) => Err(UploadError::Status { code }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct RecordingClipboard {
    contents: Vec<String>,
    broken: bool,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".into()));
        }
        self.contents.push(text.to_string());
        Ok(())
    }
}

fn config() -> Config {
    Config {
        region: "us-west-2".into(),
        access_key: "AKIAEXAMPLE".into(),
        secret_key: "secret".into(),
        bucket: "mybucket".into(),
        short_link_token: None,
    }
}

const PNG_HEADER: &str = r#"printf '\211PNG\r\n\032\n' > "$0""#;
const PNG_HEADER_SHA1: &str = "4caece539b039b16e16206ea2478f8c5ffb2ca05";

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn uploads_under_content_hash_and_copies_matching_url() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let snip = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(PNG_HEADER))
        .await
        .unwrap();

    let expected_key = format!("{}.png", PNG_HEADER_SHA1);
    assert_eq!(snip.key, expected_key);
    assert_eq!(snip.bytes, 8);
    assert_eq!(
        snip.url,
        format!("https://s3-us-west-2.amazonaws.com/mybucket/{}", expected_key)
    );

    let puts = store.puts.borrow();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].key, expected_key);
    assert_eq!(puts[0].body, vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    assert_eq!(puts[0].content_type, "image/png");

    assert_eq!(clipboard.contents, vec![snip.url.clone()]);
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn uploaded_key_is_digest_of_uploaded_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let snip = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(r#"printf 'some other image' > "$0""#))
        .await
        .unwrap();

    let puts = store.puts.borrow();
    assert_eq!(puts[0].key, hash::object_key(&puts[0].body));
    assert!(snip.url.ends_with(&puts[0].key));
}

#[tokio::test]
async fn empty_screenshot_uses_empty_input_digest() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let snip = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(r#": > "$0""#))
        .await
        .unwrap();

    assert_eq!(snip.key, "da39a3ee5e6b4b0d3255bfef95601890afd80709.png");
    assert!(clipboard.contents[0].ends_with("/mybucket/da39a3ee5e6b4b0d3255bfef95601890afd80709.png"));
}

// ── Failures stop the pipeline ──────────────────────────────────────

#[tokio::test]
async fn unsupported_platform_never_reaches_storage() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let err = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run_on_platform("plan9")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedPlatform(ref os) if os == "plan9"));
    assert_eq!(err.exit_code(), 3);
    assert!(store.puts.borrow().is_empty());
    assert!(clipboard.contents.is_empty());
}

#[tokio::test]
async fn failing_tool_aborts_before_upload_and_cleans_up() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let err = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(r#"printf partial > "$0"; exit 2"#))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Capture(CaptureError::ToolFailed { .. })));
    assert!(store.puts.borrow().is_empty());
    assert!(clipboard.contents.is_empty());
    assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn cancelled_selection_aborts_before_upload() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard::default();

    let err = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script("exit 0"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Capture(CaptureError::ReadOutput(_))));
    assert!(store.puts.borrow().is_empty());
    assert!(clipboard.contents.is_empty());
}

#[tokio::test]
async fn rejected_upload_leaves_clipboard_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::rejecting(403);
    let mut clipboard = RecordingClipboard::default();

    let err = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(PNG_HEADER))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upload(UploadError::Status { code: 403 })));
    assert_eq!(err.exit_code(), 5);
    assert_eq!(store.puts.borrow().len(), 1);
    assert!(clipboard.contents.is_empty());
}

#[tokio::test]
async fn clipboard_failure_fails_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config();
    let store = RecordingStore::default();
    let mut clipboard = RecordingClipboard {
        broken: true,
        ..Default::default()
    };

    let err = Pipeline::new(&config, &store, &mut clipboard)
        .with_temp_root(tmp.path())
        .run(Script(PNG_HEADER))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Clipboard(_)));
    assert_eq!(err.exit_code(), 6);
    assert_eq!(store.puts.borrow().len(), 1);
}
