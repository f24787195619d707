use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use site_asset_store::{
    create_in_memory_app,
    domain::models::{BucketSpec, ProvisionStatus, UploadOptions},
    AssetAdminService, AssetAdminServiceImpl, AssetBucket, InMemoryStorageAdapter, ObjectPath,
    StorageApi, StorageError, StorageResult,
};

#[tokio::test]
async fn provision_creates_all_buckets() {
    let services = create_in_memory_app().await.unwrap();

    let outcomes = services.admin_service.provision_buckets().await;

    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert_eq!(outcome.status, ProvisionStatus::Created);
    }

    // Every bucket is now visible to a health check
    for check in services.admin_service.check_buckets().await {
        assert!(check.exists, "bucket {} should exist", check.bucket);
        assert!(check.error.is_none());
    }
}

#[tokio::test]
async fn provision_is_idempotent() {
    let services = create_in_memory_app().await.unwrap();

    services.admin_service.provision_buckets().await;
    let second = services.admin_service.provision_buckets().await;

    for outcome in &second {
        assert_eq!(outcome.status, ProvisionStatus::AlreadyExists);
        assert!(outcome.status.is_ok());
    }
}

#[tokio::test]
async fn upload_then_list_round_trip() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    let path = ObjectPath::new("events/opening.webp".to_string()).unwrap();
    services
        .admin_service
        .upload_image(
            AssetBucket::Gallery,
            &path,
            Bytes::from_static(b"webp bytes"),
            Some("image/webp"),
        )
        .await
        .unwrap();

    let listed = services
        .admin_service
        .list_files(AssetBucket::Gallery, Some("events/"))
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, "events/opening.webp");
    assert_eq!(listed[0].size, 10);
    assert!(listed[0].etag.is_some());
}

#[tokio::test]
async fn upload_infers_content_type_from_extension() {
    let services = create_in_memory_app().await.unwrap();
    services.admin_service.provision_buckets().await;

    // No explicit content type; `.webp` resolves to image/webp and
    // passes the image/* allowlist.
    let path = ObjectPath::new("jane.webp".to_string()).unwrap();
    services
        .admin_service
        .upload_image(AssetBucket::Team, &path, Bytes::from_static(b"x"), None)
        .await
        .unwrap();

    // A text file infers text/plain and is rejected by the bucket spec.
    let path = ObjectPath::new("notes.txt".to_string()).unwrap();
    let err = services
        .admin_service
        .upload_image(AssetBucket::Team, &path, Bytes::from_static(b"x"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ContentTypeNotAllowed { .. }));
}

#[tokio::test]
async fn upload_to_missing_bucket_fails() {
    let services = create_in_memory_app().await.unwrap();

    let path = ObjectPath::new("orphan.webp".to_string()).unwrap();
    let err = services
        .admin_service
        .upload_image(
            AssetBucket::GeneralImages,
            &path,
            Bytes::from_static(b"x"),
            Some("image/webp"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::BucketNotFound { .. }));
}

#[tokio::test]
async fn list_missing_bucket_propagates_error() {
    let services = create_in_memory_app().await.unwrap();

    // No provisioning has happened, so the bucket is absent and the
    // error surfaces instead of an empty listing.
    let result = services
        .admin_service
        .list_files(AssetBucket::BlogImages, None)
        .await;

    assert!(matches!(result, Err(StorageError::BucketNotFound { .. })));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let store: Arc<dyn StorageApi> = Arc::new(InMemoryStorageAdapter::new());
    let spec = BucketSpec {
        file_size_limit: 8,
        ..BucketSpec::default()
    };
    let service = AssetAdminServiceImpl::with_spec(store, spec);
    service.provision_buckets().await;

    let path = ObjectPath::new("large.webp".to_string()).unwrap();
    let err = service
        .upload_image(
            AssetBucket::Gallery,
            &path,
            Bytes::from_static(b"way past the limit"),
            Some("image/webp"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::ObjectTooLarge { .. }));
}

/// Delegates to an in-memory store but refuses to create one named
/// bucket, for exercising partial provisioning outcomes.
struct FlakyStore {
    inner: InMemoryStorageAdapter,
    poisoned: &'static str,
}

#[async_trait]
impl StorageApi for FlakyStore {
    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> StorageResult<()> {
        if bucket == self.poisoned {
            return Err(StorageError::Service {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        self.inner.create_bucket(bucket, spec).await
    }

    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        self.inner.bucket_exists(bucket).await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &ObjectPath,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        self.inner.upload_object(bucket, path, data, options).await
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<site_asset_store::ObjectInfo>> {
        self.inner.list_objects(bucket, prefix, limit).await
    }
}

#[tokio::test]
async fn provision_reports_every_bucket_despite_failure() {
    let store: Arc<dyn StorageApi> = Arc::new(FlakyStore {
        inner: InMemoryStorageAdapter::new(),
        poisoned: "gallery",
    });
    let service = AssetAdminServiceImpl::new(store);

    let outcomes = service.provision_buckets().await;

    // One failure does not short-circuit the batch
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        if outcome.bucket == AssetBucket::Gallery {
            assert!(matches!(outcome.status, ProvisionStatus::Failed(_)));
        } else {
            assert_eq!(outcome.status, ProvisionStatus::Created);
        }
    }

    let checks = service.check_buckets().await;
    let gallery = checks
        .iter()
        .find(|c| c.bucket == AssetBucket::Gallery)
        .unwrap();
    assert!(!gallery.exists);
}
