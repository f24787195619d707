mod asset_bucket;
mod object_path;

pub use asset_bucket::AssetBucket;
pub use object_path::ObjectPath;
