//! In-memory blob store.

use crate::activity::ports::{BlobStore, BlobStoreError, BlobStoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Thread-safe in-memory blob store keyed by generated paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty in-memory blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> BlobStoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
        self.state
            .write()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))
    }

    fn read(&self) -> BlobStoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
        self.state
            .read()
            .map_err(|err| BlobStoreError::storage(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, bytes: Vec<u8>) -> BlobStoreResult<String> {
        let path = format!("attachments/{}", Uuid::new_v4().simple());
        self.write()?.insert(path.clone(), bytes);
        Ok(path)
    }

    async fn get(&self, path: &str) -> BlobStoreResult<Vec<u8>> {
        self.read()?
            .get(path)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(path.to_owned()))
    }

    async fn delete(&self, path: &str) -> BlobStoreResult<()> {
        self.write()?
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| BlobStoreError::NotFound(path.to_owned()))
    }
}
