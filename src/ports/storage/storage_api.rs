use crate::domain::{
    errors::StorageResult,
    models::{BucketSpec, ObjectInfo, UploadOptions},
    value_objects::ObjectPath,
};
use async_trait::async_trait;
use bytes::Bytes;

/// Port for the remote storage backend.
/// This abstracts the actual service (Supabase Storage, or an in-memory
/// stand-in for tests and local development).
#[async_trait]
pub trait StorageApi: Send + Sync + 'static {
    /// Create a bucket with the given creation defaults
    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> StorageResult<()>;

    /// Check whether a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool>;

    /// Store an object under `bucket/path`
    async fn upload_object(
        &self,
        bucket: &str,
        path: &ObjectPath,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()>;

    /// List objects in a bucket, optionally under a prefix
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>>;
}
