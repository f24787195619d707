use crate::domain::value_objects::AssetBucket;

/// A logical reference to a site image: a bucket category plus a relative
/// path. Paths may contain spaces and may carry a redundant category folder
/// prefix or a leading slash; resolution normalizes both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub bucket: AssetBucket,
    pub path: String,
}

impl AssetReference {
    pub fn new(bucket: AssetBucket, path: impl Into<String>) -> Self {
        Self {
            bucket,
            path: path.into(),
        }
    }
}
