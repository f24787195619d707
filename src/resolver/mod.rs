//! Public URL resolution for site image assets.
//!
//! Resolution is a pure string computation: no validation, no
//! percent-encoding, no network. Consuming sites depend on the exact
//! output shape `{host}/storage/v1/object/public/{bucket}/{path}`, so
//! nothing beyond the documented prefix stripping is normalized here.

use crate::domain::models::AssetReference;
use crate::domain::value_objects::AssetBucket;

/// Route under the storage host that serves public objects
pub const PUBLIC_OBJECT_ROUTE: &str = "storage/v1/object/public";

const DEFAULT_STORAGE_HOST: &str = "https://xvdznzsozebtzqsczked.supabase.co";

/// Immutable resolver configuration: the storage host the public URLs
/// point at. Injected rather than baked in as a module constant so tests
/// can resolve against alternate hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    base_url: String,
}

impl ResolverConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_HOST)
    }
}

/// Resolves logical asset references to fully-qualified public URLs.
#[derive(Debug, Clone, Default)]
pub struct PublicUrlResolver {
    config: ResolverConfig,
}

impl PublicUrlResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a raw bucket/path pair.
    ///
    /// One leading slash is stripped from the path; nothing else is
    /// validated or rewritten. Malformed input yields a malformed URL.
    pub fn resolve(&self, bucket: &str, path: &str) -> String {
        let clean = path.strip_prefix('/').unwrap_or(path);
        format!(
            "{}/{}/{}/{}",
            self.config.base_url(),
            PUBLIC_OBJECT_ROUTE,
            bucket,
            clean
        )
    }

    /// Resolve a category reference, stripping one known redundant
    /// bucket-alias prefix if the caller carried it.
    pub fn url_for(&self, reference: &AssetReference) -> String {
        self.category_url(reference.bucket, &reference.path)
    }

    pub fn category_url(&self, bucket: AssetBucket, path: &str) -> String {
        let clean = strip_known_prefix(path, &bucket.known_prefixes());
        self.resolve(bucket.remote_name(), clean)
    }

    pub fn blog_image_url(&self, filename: &str) -> String {
        self.category_url(AssetBucket::BlogImages, filename)
    }

    pub fn gallery_image_url(&self, path: &str) -> String {
        self.category_url(AssetBucket::Gallery, path)
    }

    pub fn general_image_url(&self, filename: &str) -> String {
        self.category_url(AssetBucket::GeneralImages, filename)
    }

    pub fn team_image_url(&self, filename: &str) -> String {
        self.category_url(AssetBucket::Team, filename)
    }
}

/// Strip the first matching known prefix: case-sensitive, at most once.
/// Inner occurrences of the same token are left untouched.
fn strip_known_prefix<'a>(path: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        if let Some(rest) = path.strip_prefix(prefix) {
            return rest;
        }
    }
    path
}
