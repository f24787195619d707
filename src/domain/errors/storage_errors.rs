use crate::domain::errors::ValidationError;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    #[error("bucket already exists: {bucket}")]
    BucketAlreadyExists { bucket: String },

    #[error("object already exists: {bucket}/{path}")]
    ObjectAlreadyExists { bucket: String, path: String },

    #[error("object too large: {size} bytes (limit: {limit})")]
    ObjectTooLarge { size: u64, limit: u64 },

    #[error("content type '{content_type}' not allowed in bucket {bucket}")]
    ContentTypeNotAllowed {
        content_type: String,
        bucket: String,
    },

    #[error("storage service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("http transport error: {0}")]
    Http(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
