//! Filesystem blob store scoped to a capability directory.

use crate::activity::ports::{BlobStore, BlobStoreError, BlobStoreResult};
use async_trait::async_trait;
use cap_std::fs::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use uuid::Uuid;

const BLOB_SUBDIR: &str = "attachments";

/// Blob store writing files beneath a capability-scoped directory.
///
/// Blobs are stored under an `attachments/` subdirectory with generated
/// UUID filenames; the returned storage path is relative to the root
/// directory. All filesystem work runs on the blocking thread pool.
#[derive(Clone)]
pub struct DirBlobStore {
    root: Arc<Dir>,
}

impl DirBlobStore {
    /// Creates a blob store rooted at the given directory, creating the
    /// blob subdirectory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the subdirectory cannot be
    /// created.
    pub fn new(root: Dir) -> BlobStoreResult<Self> {
        root.create_dir_all(BLOB_SUBDIR)
            .map_err(BlobStoreError::storage)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> BlobStoreResult<T>
    where
        F: FnOnce(&Dir) -> BlobStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(BlobStoreError::storage)?
    }
}

#[async_trait]
impl BlobStore for DirBlobStore {
    async fn put(&self, bytes: Vec<u8>) -> BlobStoreResult<String> {
        let path = format!("{BLOB_SUBDIR}/{}", Uuid::new_v4().simple());
        let stored_path = path.clone();
        self.run_blocking(move |root| {
            root.write(&path, &bytes).map_err(BlobStoreError::storage)
        })
        .await?;
        Ok(stored_path)
    }

    async fn get(&self, path: &str) -> BlobStoreResult<Vec<u8>> {
        let target = path.to_owned();
        self.run_blocking(move |root| {
            root.read(&target).map_err(|err| match err.kind() {
                ErrorKind::NotFound => BlobStoreError::NotFound(target.clone()),
                _ => BlobStoreError::storage(err),
            })
        })
        .await
    }

    async fn delete(&self, path: &str) -> BlobStoreResult<()> {
        let target = path.to_owned();
        self.run_blocking(move |root| {
            root.remove_file(&target).map_err(|err| match err.kind() {
                ErrorKind::NotFound => BlobStoreError::NotFound(target.clone()),
                _ => BlobStoreError::storage(err),
            })
        })
        .await
    }
}
