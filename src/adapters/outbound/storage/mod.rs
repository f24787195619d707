// Storage implementations
pub mod in_memory;
pub mod supabase;

// Re-export key types
pub use in_memory::InMemoryStorageAdapter;
pub use supabase::SupabaseStorageAdapter;
