use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{BucketSpec, ObjectInfo, UploadOptions},
        value_objects::ObjectPath,
    },
    ports::storage::StorageApi,
};

const DEFAULT_LIST_LIMIT: usize = 100;

/// Storage adapter for the Supabase Storage HTTP API.
///
/// Administrative endpoints require a service-role key; public URL
/// resolution never goes through this adapter.
#[derive(Clone, Debug)]
pub struct SupabaseStorageAdapter {
    base_url: String,
    service_key: String,
    http_client: Client,
}

impl SupabaseStorageAdapter {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            service_key: service_key.into(),
            http_client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, route)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
    }

    /// Map a non-success response to a service error, extracting the
    /// `message` field Supabase puts in its JSON error bodies.
    async fn error_from_response(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| "service error occurred".to_string()),
            Err(_) => "service error occurred".to_string(),
        };

        StorageError::Service { status, message }
    }
}

#[derive(Serialize)]
struct CreateBucketRequest<'a> {
    id: &'a str,
    name: &'a str,
    public: bool,
    allowed_mime_types: &'a [String],
    file_size_limit: u64,
}

#[derive(Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
}

#[derive(Deserialize)]
struct ListEntry {
    name: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<ListEntryMetadata>,
}

#[derive(Deserialize)]
struct ListEntryMetadata {
    #[serde(default)]
    size: Option<u64>,
    #[serde(rename = "eTag", default)]
    etag: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl StorageApi for SupabaseStorageAdapter {
    async fn create_bucket(&self, bucket: &str, spec: &BucketSpec) -> StorageResult<()> {
        let body = CreateBucketRequest {
            id: bucket,
            name: bucket,
            public: spec.public,
            allowed_mime_types: &spec.allowed_mime_types,
            file_size_limit: spec.file_size_limit,
        };

        debug!(bucket, "creating bucket");
        let response = self
            .authorize(self.http_client.post(self.endpoint("bucket")))
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        if response.status().as_u16() == 409 {
            return Err(StorageError::BucketAlreadyExists {
                bucket: bucket.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        let response = self
            .authorize(
                self.http_client
                    .get(self.endpoint(&format!("bucket/{}", bucket))),
            )
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        match response.status().as_u16() {
            200 => Ok(true),
            400 | 404 => Ok(false),
            _ => Err(Self::error_from_response(response).await),
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &ObjectPath,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let url = self.endpoint(&format!("object/{}/{}", bucket, path));

        let mut request = self
            .authorize(self.http_client.post(&url))
            .header("cache-control", &options.cache_control)
            .header("x-upsert", if options.upsert { "true" } else { "false" });

        if let Some(content_type) = &options.content_type {
            request = request.header("content-type", content_type);
        }

        debug!(bucket, path = %path, bytes = data.len(), "uploading object");
        let response = request
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        if response.status().as_u16() == 409 {
            return Err(StorageError::ObjectAlreadyExists {
                bucket: bucket.to_string(),
                path: path.as_str().to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<ObjectInfo>> {
        let body = ListRequest {
            prefix: prefix.unwrap_or(""),
            limit: limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset: 0,
        };

        let response = self
            .authorize(
                self.http_client
                    .post(self.endpoint(&format!("object/list/{}", bucket))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let entries: Vec<ListEntry> = response
            .json()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let metadata = entry.metadata.unwrap_or(ListEntryMetadata {
                    size: None,
                    etag: None,
                });
                ObjectInfo {
                    path: entry.name,
                    size: metadata.size.unwrap_or(0),
                    last_modified: entry.updated_at,
                    etag: metadata.etag,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_are_trimmed() {
        let adapter = SupabaseStorageAdapter::new("https://proj.supabase.co//", "key");
        assert_eq!(
            adapter.endpoint("bucket"),
            "https://proj.supabase.co/storage/v1/bucket"
        );
        assert_eq!(
            adapter.endpoint("object/gallery/a.webp"),
            "https://proj.supabase.co/storage/v1/object/gallery/a.webp"
        );
    }

    #[test]
    fn test_list_entry_parsing() {
        // Folder placeholders come back with null metadata
        let body = r#"[
            {"name":"NAI GALLERY/Students/a.webp","id":"1","updated_at":"2024-11-02T09:30:00Z","metadata":{"size":52817,"eTag":"\"abc123\"","mimetype":"image/webp"}},
            {"name":"NAI GALLERY","id":null,"updated_at":null,"metadata":null}
        ]"#;

        let entries: Vec<ListEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "NAI GALLERY/Students/a.webp");
        let metadata = entries[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.size, Some(52817));
        assert_eq!(metadata.etag.as_deref(), Some("\"abc123\""));
        assert!(entries[0].updated_at.is_some());

        assert!(entries[1].metadata.is_none());
        assert!(entries[1].updated_at.is_none());
    }

    #[test]
    fn test_error_body_parsing() {
        let with_message: ErrorBody =
            serde_json::from_str(r#"{"statusCode":"404","error":"not_found","message":"Bucket not found"}"#)
                .unwrap();
        assert_eq!(with_message.message.as_deref(), Some("Bucket not found"));

        let error_only: ErrorBody = serde_json::from_str(r#"{"error":"invalid_jwt"}"#).unwrap();
        assert!(error_only.message.is_none());
        assert_eq!(error_only.error.as_deref(), Some("invalid_jwt"));
    }
}
