use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{
            BucketCheck, BucketProvisionOutcome, BucketSpec, ObjectInfo, ProvisionStatus,
            SyncReport, UploadOptions,
        },
        value_objects::{AssetBucket, ObjectPath},
    },
    ports::{services::AssetAdminService, storage::StorageApi},
};

/// Implementation of AssetAdminService over any StorageApi backend
#[derive(Clone)]
pub struct AssetAdminServiceImpl {
    store: Arc<dyn StorageApi>,
    spec: BucketSpec,
}

impl AssetAdminServiceImpl {
    /// Create a new service using the default bucket creation spec
    /// (public, `image/*` allowlist, 10 MB limit)
    pub fn new(store: Arc<dyn StorageApi>) -> Self {
        Self {
            store,
            spec: BucketSpec::default(),
        }
    }

    pub fn with_spec(store: Arc<dyn StorageApi>, spec: BucketSpec) -> Self {
        Self { store, spec }
    }

    fn content_type_for(path: &Path) -> String {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    }

    async fn upload_local_file(
        &self,
        bucket: AssetBucket,
        local: &Path,
        remote: &str,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(local).await?;
        let path = ObjectPath::new(remote.to_string())?;
        let options = UploadOptions {
            content_type: Some(Self::content_type_for(local)),
            ..UploadOptions::default()
        };
        self.store
            .upload_object(bucket.remote_name(), &path, Bytes::from(data), &options)
            .await
    }
}

#[async_trait]
impl AssetAdminService for AssetAdminServiceImpl {
    async fn provision_buckets(&self) -> Vec<BucketProvisionOutcome> {
        let mut outcomes = Vec::with_capacity(AssetBucket::ALL.len());

        for bucket in AssetBucket::ALL {
            let status = match self.store.create_bucket(bucket.remote_name(), &self.spec).await {
                Ok(()) => {
                    info!(bucket = %bucket, "bucket created");
                    ProvisionStatus::Created
                }
                Err(StorageError::BucketAlreadyExists { .. }) => {
                    info!(bucket = %bucket, "bucket already exists");
                    ProvisionStatus::AlreadyExists
                }
                Err(err) => {
                    error!(bucket = %bucket, error = %err, "bucket creation failed");
                    ProvisionStatus::Failed(err.to_string())
                }
            };

            outcomes.push(BucketProvisionOutcome { bucket, status });
        }

        outcomes
    }

    async fn check_buckets(&self) -> Vec<BucketCheck> {
        let mut checks = Vec::with_capacity(AssetBucket::ALL.len());

        for bucket in AssetBucket::ALL {
            let check = match self.store.bucket_exists(bucket.remote_name()).await {
                Ok(exists) => BucketCheck {
                    bucket,
                    exists,
                    error: None,
                },
                Err(err) => BucketCheck {
                    bucket,
                    exists: false,
                    error: Some(err.to_string()),
                },
            };
            checks.push(check);
        }

        checks
    }

    async fn upload_image(
        &self,
        bucket: AssetBucket,
        path: &ObjectPath,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let options = UploadOptions {
            content_type: Some(
                content_type
                    .map(str::to_string)
                    .unwrap_or_else(|| Self::content_type_for(Path::new(path.as_str()))),
            ),
            ..UploadOptions::default()
        };

        self.store
            .upload_object(bucket.remote_name(), path, data, &options)
            .await
            .map_err(|err| {
                error!(bucket = %bucket, path = %path, error = %err, "upload failed");
                err
            })
    }

    async fn list_files(
        &self,
        bucket: AssetBucket,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        self.store
            .list_objects(bucket.remote_name(), prefix, None)
            .await
    }

    async fn sync_directory(
        &self,
        local_dir: &Path,
        bucket: AssetBucket,
        remote_prefix: Option<&ObjectPath>,
    ) -> StorageResult<SyncReport> {
        let mut report = SyncReport::default();
        // Iterative walk; async recursion would need boxed futures.
        let mut pending: Vec<(PathBuf, Option<String>)> = vec![(
            local_dir.to_path_buf(),
            remote_prefix.map(|p| p.as_str().to_string()),
        )];

        while let Some((dir, remote_dir)) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;

            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                let name = entry.file_name().to_string_lossy().into_owned();
                let remote_path = match &remote_dir {
                    Some(prefix) => format!("{}/{}", prefix, name),
                    None => name,
                };

                if file_type.is_dir() {
                    pending.push((entry.path(), Some(remote_path)));
                } else if file_type.is_file() {
                    match self.upload_local_file(bucket, &entry.path(), &remote_path).await {
                        Ok(()) => {
                            info!(bucket = %bucket, path = %remote_path, "uploaded");
                            report.uploaded += 1;
                        }
                        Err(err) => {
                            error!(bucket = %bucket, path = %remote_path, error = %err, "upload failed");
                            report.failed += 1;
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}
