pub mod asset;
pub mod bucket;
pub mod object;

pub use asset::AssetReference;
pub use bucket::{BucketCheck, BucketProvisionOutcome, BucketSpec, ProvisionStatus};
pub use object::{ObjectInfo, SyncReport, UploadOptions};
