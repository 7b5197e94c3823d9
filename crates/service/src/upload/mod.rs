//! Image upload to object storage.
//!
//! Handlers hand an [`UploadFile`] and a logical directory (`store`,
//! `menu/store{id}`) to an [`ImageUploader`] and get back the public URL that
//! is stored in the `image` table.
//!
//! Two backends:
//! - [`s3::S3Uploader`]: signed `PUT` to an S3 (or S3-compatible) bucket
//! - [`local::LocalDiskUploader`]: files under a local root, for development

pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StorageConfig, StorageKind};
use thiserror::Error;
use uuid::Uuid;

/// Placeholder used when a store is created without an image.
pub const DEFAULT_STORE_IMAGE: &str = "https://yumyums-bucket.s3.ap-northeast-2.amazonaws.com/default/store.png";
/// Placeholder used when a menu is created without an image.
pub const DEFAULT_MENU_IMAGE: &str = "https://yumyums-bucket.s3.ap-northeast-2.amazonaws.com/default/menu.png";

pub const STORE_IMAGE_DIR: &str = "store";

/// Per-store namespace for menu images.
pub fn menu_image_dir(store_id: i32) -> String {
    format!("menu/store{store_id}")
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(String),
    #[error("storage rejected upload with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("file is empty")]
    Empty,
}

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type, bytes }
    }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Declared content type, else guessed from the file extension.
    pub fn resolved_content_type(&self) -> String {
        self.content_type
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| mime_guess::from_path(&self.file_name).first_or_octet_stream().to_string())
    }
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Store `file` under `dir` and return its public URL.
    async fn upload(&self, file: UploadFile, dir: &str) -> Result<String, UploadError>;

    /// Delete an object previously returned by `upload`. URLs outside this
    /// uploader's base (placeholders) are left alone.
    async fn remove(&self, url: &str) -> Result<(), UploadError>;
}

/// Object key of `url` when it lives under `public_base_url`.
pub fn key_for_url<'a>(public_base_url: &str, url: &'a str) -> Option<&'a str> {
    url.strip_prefix(public_base_url)?
        .strip_prefix('/')
        .filter(|key| !key.is_empty() && !key.split('/').any(|seg| seg == ".."))
}

/// Object key `{dir}/{uuid}_{name}`; the name keeps only URL-safe characters.
pub fn object_key(dir: &str, file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let safe: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let safe = if safe.trim_matches('_').is_empty() { "upload".to_string() } else { safe };
    format!("{}/{}_{}", dir.trim_matches('/'), Uuid::new_v4(), safe)
}

/// Build the uploader selected by `[storage].kind`.
pub fn build_uploader(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn ImageUploader>> {
    let base_url = cfg.resolved_public_base_url();
    let uploader: Arc<dyn ImageUploader> = match cfg.kind {
        StorageKind::S3 => Arc::new(s3::S3Uploader::new(
            &cfg.endpoint,
            &cfg.region,
            &cfg.bucket,
            &cfg.access_key_id,
            &cfg.secret_access_key,
            &base_url,
        )?),
        StorageKind::Local => Arc::new(local::LocalDiskUploader::new(&cfg.local_root, &base_url)),
    };
    Ok(uploader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_sanitizes_names() {
        let key = object_key("menu/store7", "../../etc/김밥 사진.PNG");
        assert!(key.starts_with("menu/store7/"));
        assert!(key.ends_with("_____.PNG"), "{key}");
        assert!(!key.contains(".."));
    }

    #[test]
    fn key_for_url_only_accepts_own_objects() {
        assert_eq!(key_for_url("https://cdn.example.com", "https://cdn.example.com/store/a.png"), Some("store/a.png"));
        assert_eq!(key_for_url("https://cdn.example.com", "https://cdn.example.com.evil/store/a.png"), None);
        assert_eq!(key_for_url("https://cdn.example.com", DEFAULT_STORE_IMAGE), None);
        assert_eq!(key_for_url("/uploads", "/uploads/../secret"), None);
    }

    #[test]
    fn object_key_falls_back_for_unusable_names() {
        let key = object_key("store", "사진");
        assert!(key.ends_with("_upload"), "{key}");
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        let f = UploadFile::new("a.png", None, vec![1]);
        assert_eq!(f.resolved_content_type(), "image/png");
        let f = UploadFile::new("a.bin", Some("image/webp".into()), vec![1]);
        assert_eq!(f.resolved_content_type(), "image/webp");
    }

    #[test]
    fn menu_dir_is_namespaced_per_store() {
        assert_eq!(menu_image_dir(12), "menu/store12");
    }
}
