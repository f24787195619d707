use std::sync::Arc;

use crate::{
    adapters::outbound::storage::{InMemoryStorageAdapter, SupabaseStorageAdapter},
    domain::models::BucketSpec,
    ports::storage::StorageApi,
    resolver::{PublicUrlResolver, ResolverConfig},
    services::AssetAdminServiceImpl,
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub resolver: ResolverConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            resolver: ResolverConfig::default(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Supabase {
        base_url: String,
        service_key: String,
    },
}

/// Application services container
pub struct AppServices {
    pub resolver: PublicUrlResolver,
    pub admin_service: AssetAdminServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    bucket_spec: BucketSpec,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            bucket_spec: BucketSpec::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure public URL resolution
    pub fn with_resolver_config(mut self, resolver: ResolverConfig) -> Self {
        self.config.resolver = resolver;
        self
    }

    /// Configure the spec applied when provisioning buckets
    pub fn with_bucket_spec(mut self, spec: BucketSpec) -> Self {
        self.bucket_spec = spec;
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let store = self.create_storage_adapter()?;

        let resolver = PublicUrlResolver::new(self.config.resolver);
        let admin_service = AssetAdminServiceImpl::with_spec(store, self.bucket_spec);

        Ok(AppServices {
            resolver,
            admin_service,
        })
    }

    /// Create the storage adapter based on configuration
    fn create_storage_adapter(&self) -> Result<Arc<dyn StorageApi>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryStorageAdapter::new())),
            StorageBackend::Supabase {
                base_url,
                service_key,
            } => {
                if base_url.is_empty() {
                    return Err(AppError::Configuration {
                        message: "Supabase base URL must not be empty".to_string(),
                    });
                }
                if service_key.is_empty() {
                    return Err(AppError::Configuration {
                        message: "Supabase service key must not be empty".to_string(),
                    });
                }
                Ok(Arc::new(SupabaseStorageAdapter::new(base_url, service_key)))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

/// Create a Supabase-backed application. The resolver points at the
/// same project URL so resolved links match the bucket contents.
pub async fn create_supabase_app(
    base_url: String,
    service_key: String,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_resolver_config(ResolverConfig::new(&base_url))
        .with_storage_backend(StorageBackend::Supabase {
            base_url,
            service_key,
        })
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("supabase") => {
            let base_url = std::env::var("SUPABASE_URL").map_err(|_| AppError::Configuration {
                message: "SUPABASE_URL environment variable required".to_string(),
            })?;
            let service_key =
                std::env::var("SUPABASE_SERVICE_KEY").map_err(|_| AppError::Configuration {
                    message: "SUPABASE_SERVICE_KEY environment variable required".to_string(),
                })?;

            StorageBackend::Supabase {
                base_url,
                service_key,
            }
        }
        _ => StorageBackend::InMemory,
    };

    let resolver = match std::env::var("SUPABASE_URL") {
        Ok(url) => ResolverConfig::new(url),
        Err(_) => ResolverConfig::default(),
    };

    AppBuilder::new()
        .with_storage_backend(storage_backend)
        .with_resolver_config(resolver)
        .build()
        .await
}
