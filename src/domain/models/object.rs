use chrono::{DateTime, Utc};

/// A single entry returned by a bucket listing
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub path: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

/// Options applied to object uploads
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    /// Cache-control max-age, in seconds, sent with the stored object
    pub cache_control: String,
    /// Overwrite an existing object at the same path
    pub upsert: bool,
    pub content_type: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control: "3600".to_string(),
            upsert: true,
            content_type: None,
        }
    }
}

/// Totals for a recursive directory sync
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub uploaded: usize,
    pub failed: usize,
}
