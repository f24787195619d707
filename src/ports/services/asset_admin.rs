use crate::domain::{
    errors::StorageResult,
    models::{BucketCheck, BucketProvisionOutcome, ObjectInfo, SyncReport},
    value_objects::{AssetBucket, ObjectPath},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

/// Port for the administrative operations on the site's asset buckets
#[async_trait]
pub trait AssetAdminService: Send + Sync + 'static {
    /// Attempt to create all four site buckets.
    ///
    /// A failure on one bucket never aborts the batch; every bucket gets
    /// an outcome. An already-existing bucket counts as usable.
    async fn provision_buckets(&self) -> Vec<BucketProvisionOutcome>;

    /// Report which of the four buckets exist on the remote service
    async fn check_buckets(&self) -> Vec<BucketCheck>;

    /// Upload a single image to a bucket
    async fn upload_image(
        &self,
        bucket: AssetBucket,
        path: &ObjectPath,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// List files in a bucket, optionally under a prefix
    async fn list_files(
        &self,
        bucket: AssetBucket,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectInfo>>;

    /// Recursively upload every regular file under `local_dir` to the
    /// bucket, preserving the directory structure below an optional
    /// remote prefix. Per-file failures are counted, not fatal.
    async fn sync_directory(
        &self,
        local_dir: &Path,
        bucket: AssetBucket,
        remote_prefix: Option<&ObjectPath>,
    ) -> StorageResult<SyncReport>;
}
