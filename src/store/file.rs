use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use super::{RecordStore, StoreError};

/// A collection persisted as one pretty-printed JSON array.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so a failed write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `default` only if the backing file does not exist yet.
    /// Returns `true` when the file was created.
    pub async fn ensure_initialized(&self, default: &[T]) -> Result<bool, StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        if exists {
            return Ok(false);
        }

        self.put_all(default).await?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug + 'static,
{
    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        let records: Vec<T> = serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = records.len(), "Loaded collection");
        Ok(records)
    }

    async fn put_all(&self, records: &[T]) -> Result<(), StoreError> {
        let mut data = serde_json::to_vec_pretty(records).map_err(StoreError::Serialize)?;
        data.push(b'\n');

        self.ensure_parent().await?;

        let tmp = self.temp_path();
        fs::write(&tmp, &data)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp.clone(),
                source,
            })?;

        if let Err(source) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), count = records.len(), bytes = data.len(), "Wrote collection");
        Ok(())
    }
}
