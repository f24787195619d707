pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod resolver;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Value objects
    AssetBucket,
    // Models
    AssetReference,
    BucketCheck,
    BucketProvisionOutcome,
    BucketSpec,
    ObjectInfo,
    ObjectPath,
    ProvisionStatus,
    // Errors
    StorageError,
    StorageResult,
    SyncReport,
    UploadOptions,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{AssetAdminService, StorageApi};

// URL resolution - the pure core
pub use resolver::{PublicUrlResolver, ResolverConfig, PUBLIC_OBJECT_ROUTE};

// Service implementations - business logic
pub use services::AssetAdminServiceImpl;

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, create_supabase_app, AppBuilder, AppConfig,
    AppError, AppServices, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{InMemoryStorageAdapter, SupabaseStorageAdapter};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_supabase_app, AppBuilder, AppServices, AssetAdminService,
        AssetAdminServiceImpl, AssetBucket, InMemoryStorageAdapter, ObjectPath, PublicUrlResolver,
        ResolverConfig, StorageApi, SupabaseStorageAdapter,
    };
}
