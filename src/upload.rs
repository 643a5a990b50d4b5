//! Object storage upload.
//!
//! One PUT per screenshot, authenticated with the static key pair from the
//! config. S3 makes a single-object PUT visible atomically, so a failed
//! upload never leaves a half-written object behind the key.

use crate::config::Config;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use std::time::Instant;

/// Somewhere a keyed object can be written.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid storage client settings: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("storage rejected the upload with HTTP {code}")]
    Status { code: u16 },
}

/// `https://s3-<region>.amazonaws.com`, the endpoint both uploads and
/// published links are addressed against.
pub fn endpoint(region: &str) -> String {
    format!("https://s3-{}.amazonaws.com", region)
}

/// S3 bucket addressed path-style at the regional endpoint.
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| UploadError::Client(e.to_string()))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint(&config.region),
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| UploadError::Client(e.to_string()))?
            .with_path_style();

        Ok(Self { bucket })
    }
}

fn upload_error(err: S3Error) -> UploadError {
    match err {
        S3Error::HttpFailWithBody(code, _) => UploadError::Status { code },
        other => UploadError::Request(other.to_string()),
    }
}

impl ObjectStore for S3Store {
    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), UploadError> {
        let start = Instant::now();
        log::info!("[UPLOAD] PUT {} ({} bytes, {})", key, body.len(), content_type);

        let response = self
            .bucket
            .put_object_with_content_type(key, body, content_type)
            .await
            .map_err(upload_error)?;

        let code = response.status_code();
        if !(200..300).contains(&code) {
            return Err(UploadError::Status { code });
        }

        log::info!(
            "[UPLOAD] Stored {} in {}ms",
            key,
            start.elapsed().as_millis()
        );
        Ok(())
    }
}
