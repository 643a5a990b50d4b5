//! Content addressing for screenshots.
//!
//! The object key is the SHA-1 of the exact bytes uploaded, rendered as
//! lowercase hex, plus a `.png` suffix. Links that were already shared
//! depend on this never changing.

use sha1::{Digest, Sha1};

/// MIME type sent with every upload.
pub const CONTENT_TYPE: &str = "image/png";

/// Lowercase hex SHA-1 of `bytes` (40 chars).
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

/// Storage key for `bytes`: `<sha1-hex>.png`.
pub fn object_key(bytes: &[u8]) -> String {
    format!("{}.png", content_hash(bytes))
}
