//! Local filesystem uploader.
//!
//! Files land at `{root}/{dir}/{uuid}_{name}` and are addressed as
//! `{public_base_url}/{dir}/{uuid}_{name}`.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument, warn};

use super::{key_for_url, object_key, ImageUploader, UploadError, UploadFile};

#[derive(Debug, Clone)]
pub struct LocalDiskUploader {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskUploader {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self { root: root.into(), public_base_url: public_base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl ImageUploader for LocalDiskUploader {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: UploadFile, dir: &str) -> Result<String, UploadError> {
        if file.is_empty() {
            return Err(UploadError::Empty);
        }
        let key = object_key(dir, &file.file_name);
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a temp name first so readers never see a partial file
        let tmp = path.with_extension("part");
        fs::write(&tmp, &file.bytes).await?;
        fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "image written");
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        let Some(key) = key_for_url(&self.public_base_url, url) else {
            return Ok(());
        };
        match fs::remove_file(self.root.join(key)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                warn!(%key, error = %e, "could not remove image");
                Err(e.into())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_file_under_directory() {
        let root = std::env::temp_dir().join(format!("yumyums-upload-{}", uuid::Uuid::new_v4()));
        let up = LocalDiskUploader::new(&root, "/uploads/");

        let url = up.upload(UploadFile::new("bibimbap.jpg", None, b"jpeg".to_vec()), "store").await.unwrap();
        assert!(url.starts_with("/uploads/store/"), "{url}");

        let key = url.trim_start_matches("/uploads/");
        let written = tokio::fs::read(root.join(key)).await.unwrap();
        assert_eq!(written, b"jpeg");

        up.remove(&url).await.unwrap();
        assert!(!root.join(key).exists());
        // placeholders and already-removed files are fine
        up.remove(&url).await.unwrap();
        up.remove("https://cdn.example.com/default/store.png").await.unwrap();

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
