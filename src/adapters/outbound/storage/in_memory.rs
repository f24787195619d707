use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{BucketSpec, ObjectInfo, UploadOptions},
        value_objects::ObjectPath,
    },
    ports::storage::StorageApi,
};

/// In-memory implementation of StorageApi for testing and development
#[derive(Clone, Default)]
pub struct InMemoryStorageAdapter {
    state: Arc<RwLock<StorageState>>,
}

#[derive(Default)]
struct StorageState {
    buckets: HashMap<String, BucketEntry>,
}

struct BucketEntry {
    spec: BucketSpec,
    objects: HashMap<String, StoredObject>,
}

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<Utc>,
    etag: String,
}

impl InMemoryStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn mime_allowed(allowed: &[String], content_type: &str) -> bool {
        allowed.iter().any(|pattern| {
            if let Some(family) = pattern.strip_suffix("/*") {
                content_type
                    .split('/')
                    .next()
                    .is_some_and(|f| f == family)
            } else {
                pattern == content_type
            }
        })
    }
}

#[async_trait]
impl StorageApi for InMemoryStorageAdapter {
    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> StorageResult<()> {
        let mut state = self.state.write().await;

        if state.buckets.contains_key(bucket) {
            return Err(StorageError::BucketAlreadyExists {
                bucket: bucket.to_string(),
            });
        }

        state.buckets.insert(
            bucket.to_string(),
            BucketEntry {
                spec: spec.clone(),
                objects: HashMap::new(),
            },
        );

        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        let state = self.state.read().await;
        Ok(state.buckets.contains_key(bucket))
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &ObjectPath,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let mut state = self.state.write().await;

        let entry = state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;

        let size = data.len() as u64;
        if size > entry.spec.file_size_limit {
            return Err(StorageError::ObjectTooLarge {
                size,
                limit: entry.spec.file_size_limit,
            });
        }

        if !entry.spec.allowed_mime_types.is_empty() {
            let content_type = options
                .content_type
                .as_deref()
                .unwrap_or("application/octet-stream");
            if !Self::mime_allowed(&entry.spec.allowed_mime_types, content_type) {
                return Err(StorageError::ContentTypeNotAllowed {
                    content_type: content_type.to_string(),
                    bucket: bucket.to_string(),
                });
            }
        }

        if !options.upsert && entry.objects.contains_key(path.as_str()) {
            return Err(StorageError::ObjectAlreadyExists {
                bucket: bucket.to_string(),
                path: path.as_str().to_string(),
            });
        }

        let etag = format!("{:x}", md5::compute(&data));
        entry.objects.insert(
            path.as_str().to_string(),
            StoredObject {
                data,
                last_modified: Utc::now(),
                etag,
            },
        );

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        let state = self.state.read().await;

        let entry = state
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;

        let mut infos: Vec<ObjectInfo> = entry
            .objects
            .iter()
            .filter(|(path, _)| prefix.map_or(true, |p| path.starts_with(p)))
            .map(|(path, object)| ObjectInfo {
                path: path.clone(),
                size: object.data.len() as u64,
                last_modified: Some(object.last_modified),
                etag: Some(object.etag.clone()),
            })
            .collect();

        infos.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(limit) = limit {
            infos.truncate(limit);
        }

        Ok(infos)
    }
}
