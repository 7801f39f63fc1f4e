//! Whole-collection persistence.
//!
//! Every collection is read and written in full: there is no indexing and no
//! incremental update. Callers that need read-modify-write atomicity must
//! serialize access themselves (see [`crate::booking::BookingService`]).

mod file;
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Get-all / put-all access to one persisted collection of records.
#[async_trait]
pub trait RecordStore<T>: Send + Sync + std::fmt::Debug + 'static {
    /// Load the entire collection.
    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the entire collection.
    async fn put_all(&self, records: &[T]) -> Result<(), StoreError>;
}
