use thiserror::Error;

use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error("database error: {0}")]
    Db(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Unauthorized => 1004,
            ServiceError::Hash(_) => 1101,
            ServiceError::Upload(_) => 1102,
            ServiceError::Upstream(_) => 1103,
            ServiceError::Db(_) => 1200,
            ServiceError::Model(_) => 1201,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}
