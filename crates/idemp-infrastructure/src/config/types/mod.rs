//! Configuration types module

pub mod app;
pub mod cleanup;
pub mod lock;
pub mod logging;
pub mod store;

// Re-export main types
pub use app::AppConfig;
pub use cleanup::CleanupConfig;
pub use lock::LockConfig;
pub use logging::LoggingConfig;
pub use store::{RedisStoreConfig, StoreConfig, StoreProvider};
