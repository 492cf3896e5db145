// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image upload persistence.
//!
//! Uploaded files land in a flat directory and are later served verbatim
//! under the configured public prefix. Stored names are generated server
//! side (timestamp + random suffix) so client filenames can never collide
//! with or traverse out of the upload directory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use roofline_core::RooflineError;
use uuid::Uuid;

/// Upper bound on gallery images accepted per listing.
pub const MAX_GALLERY_IMAGES: usize = 20;

/// Writable store for uploaded listing images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
    public_prefix: String,
}

impl UploadStore {
    /// Create the store, ensuring the upload directory exists.
    pub fn new(
        dir: impl Into<PathBuf>,
        max_bytes: u64,
        public_prefix: impl Into<String>,
    ) -> Result<Self, RooflineError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| RooflineError::Storage {
            source: Box::new(e),
        })?;
        let mut public_prefix = public_prefix.into();
        while public_prefix.ends_with('/') {
            public_prefix.pop();
        }
        Ok(Self {
            dir,
            max_bytes,
            public_prefix,
        })
    }

    /// Directory uploads are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Public URL prefix uploads are served under.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Request body ceiling for the create-listing route: one hero image
    /// plus a full gallery, each at the per-file cap, with headroom for the
    /// text fields and multipart framing.
    pub fn request_body_limit(&self) -> usize {
        (self.max_bytes as usize)
            .saturating_mul(1 + MAX_GALLERY_IMAGES)
            .saturating_add(64 * 1024)
    }

    /// Public path a stored file is served at.
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix, filename)
    }

    /// Vet an upload without persisting it. Rejects non-image content types
    /// and files over the configured size cap with a validation error.
    ///
    /// Callers buffering several files should check each one as it arrives
    /// and only [`save`](Self::save) once the whole request is known good,
    /// so a rejected request leaves nothing on disk.
    pub fn check(&self, content_type: Option<&str>, len: u64) -> Result<(), RooflineError> {
        if !content_type.unwrap_or_default().starts_with("image/") {
            return Err(RooflineError::validation("only image uploads are accepted"));
        }
        if len > self.max_bytes {
            return Err(RooflineError::validation(format!(
                "image exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        Ok(())
    }

    /// Persist one uploaded image and return its stored filename.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, RooflineError> {
        self.check(content_type, bytes.len() as u64)?;

        let filename = format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension_of(original_name)
        );
        tokio::fs::write(self.dir.join(&filename), bytes)
            .await
            .map_err(|e| RooflineError::Storage {
                source: Box::new(e),
            })?;
        tracing::debug!(filename, size = bytes.len(), "image stored");
        Ok(filename)
    }
}

/// Lowercase extension of the client filename, defaulting to `.jpg` when
/// absent or not purely alphanumeric.
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".jpg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_bytes: u64) -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), max_bytes, "/images/houses/").unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn saves_an_image_under_a_generated_name() {
        let (_dir, store) = store(1024);
        let name = store
            .save(Some("hero photo.PNG"), Some("image/png"), b"fakepng")
            .await
            .unwrap();
        assert!(name.ends_with(".png"), "got {name}");
        assert!(!name.contains(' '));
        assert_eq!(std::fs::read(store.dir().join(&name)).unwrap(), b"fakepng");
        assert_eq!(store.public_url(&name), format!("/images/houses/{name}"));
    }

    #[tokio::test]
    async fn rejects_non_image_content_types() {
        let (_dir, store) = store(1024);
        for content_type in [Some("text/html"), Some("application/pdf"), None] {
            let err = store
                .save(Some("x.png"), content_type, b"data")
                .await
                .unwrap_err();
            assert!(matches!(err, RooflineError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn rejects_files_over_the_size_cap() {
        let (_dir, store) = store(8);
        let err = store
            .save(Some("x.png"), Some("image/png"), b"123456789")
            .await
            .unwrap_err();
        assert!(matches!(err, RooflineError::Validation(_)));
        // At the cap is fine.
        assert!(store
            .save(Some("x.png"), Some("image/png"), b"12345678")
            .await
            .is_ok());
    }

    #[test]
    fn check_vets_type_and_size_without_writing() {
        let (dir, store) = store(8);
        assert!(store.check(Some("image/png"), 8).is_ok());
        assert!(store.check(Some("image/png"), 9).is_err());
        assert!(store.check(Some("text/html"), 1).is_err());
        assert!(store.check(None, 1).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn extension_is_sanitized_and_defaulted() {
        assert_eq!(extension_of(Some("a.JPG")), ".jpg");
        assert_eq!(extension_of(Some("../../../etc/passwd")), ".jpg");
        assert_eq!(extension_of(Some("noext")), ".jpg");
        assert_eq!(extension_of(None), ".jpg");
        assert_eq!(extension_of(Some("weird name.webp")), ".webp");
    }

    #[test]
    fn body_limit_covers_hero_plus_full_gallery() {
        let (_dir, store) = store(1_000_000);
        assert!(store.request_body_limit() >= 21_000_000);
    }
}
