//! Blob store port.
//!
//! File bytes live in an opaque store keyed by path; the core only ever
//! calls put/get/delete and records the returned path on the attachment row.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// No blob exists at the given path.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Storage-layer failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Content storage contract.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the given bytes and returns the storage path.
    async fn put(&self, bytes: Vec<u8>) -> BlobStoreResult<String>;

    /// Reads the blob at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] when no blob exists there.
    async fn get(&self, path: &str) -> BlobStoreResult<Vec<u8>>;

    /// Deletes the blob at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] when no blob exists there.
    async fn delete(&self, path: &str) -> BlobStoreResult<()>;
}
