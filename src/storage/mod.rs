use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStorage;

/// String-keyed storage medium holding opaque string values
#[async_trait]
pub trait Storage: Send + Sync {
    /// Prepares the backend (directories, tables); safe to call repeatedly
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Reads the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
