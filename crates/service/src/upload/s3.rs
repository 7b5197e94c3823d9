//! S3 uploader.
//!
//! Objects are written with SigV4-signed requests to `{endpoint}/{bucket}/{key}`
//! (path style, so MinIO and other S3-compatible stores work too) and
//! addressed as `{public_base_url}/{key}`.

use async_trait::async_trait;
use s3::{creds::Credentials, error::S3Error, Bucket, Region};
use tracing::{error, info, instrument, warn};

use super::{key_for_url, object_key, ImageUploader, UploadError, UploadFile};

pub struct S3Uploader {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl S3Uploader {
    pub fn new(
        endpoint: &str,
        region: &str,
        bucket: &str,
        access_key_id: &str,
        secret_access_key: &str,
        public_base_url: &str,
    ) -> Result<Self, UploadError> {
        let region = Region::Custom { region: region.to_string(), endpoint: endpoint.trim_end_matches('/').to_string() };
        let credentials = Credentials::new(Some(access_key_id), Some(secret_access_key), None, None, None)
            .map_err(|e| UploadError::Http(format!("invalid s3 credentials: {e}")))?;
        let bucket = Bucket::new(bucket.trim_matches('/'), region, credentials)
            .map_err(|e| UploadError::Http(e.to_string()))?
            .with_path_style();
        Ok(Self { bucket, public_base_url: public_base_url.trim_end_matches('/').to_string() })
    }
}

fn rejected(err: S3Error) -> UploadError {
    match err {
        S3Error::HttpFailWithBody(status, body) => UploadError::Rejected { status, body },
        other => UploadError::Http(other.to_string()),
    }
}

#[async_trait]
impl ImageUploader for S3Uploader {
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: UploadFile, dir: &str) -> Result<String, UploadError> {
        if file.is_empty() {
            return Err(UploadError::Empty);
        }
        let key = object_key(dir, &file.file_name);
        let content_type = file.resolved_content_type();

        let resp = self
            .bucket
            .put_object_with_content_type(&key, &file.bytes, &content_type)
            .await
            .map_err(rejected)?;
        let status = resp.status_code();
        if !(200..300).contains(&status) {
            error!(%key, status, "object storage rejected upload");
            return Err(UploadError::Rejected { status, body: String::from_utf8_lossy(resp.bytes()).into_owned() });
        }

        let url = format!("{}/{}", self.public_base_url, key);
        info!(%key, %url, "image uploaded");
        Ok(url)
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        let Some(key) = key_for_url(&self.public_base_url, url) else {
            return Ok(());
        };
        let resp = self.bucket.delete_object(key).await.map_err(rejected)?;
        let status = resp.status_code();
        if !(200..300).contains(&status) && status != 404 {
            warn!(%key, status, "object storage refused delete");
            return Err(UploadError::Rejected { status, body: String::from_utf8_lossy(resp.bytes()).into_owned() });
        }
        info!(%key, "image removed");
        Ok(())
    }
}
