//! Standalone attachment upload and deletion.

use crate::activity::domain::{Attachment, AttachmentId, AttachmentOwner};
use crate::activity::ports::{
    AttachmentRepository, AttachmentRepositoryError, BlobStore, BlobStoreError,
};
use crate::identity::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use super::FileUpload;

/// Errors returned by attachment operations.
#[derive(Debug, Error)]
pub enum AttachmentServiceError {
    /// Attachment record persistence failed.
    #[error(transparent)]
    Records(#[from] AttachmentRepositoryError),
    /// Blob storage failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
}

/// Result type for attachment operations.
pub type AttachmentServiceResult<T> = Result<T, AttachmentServiceError>;

/// Uploads and deletes file attachments for tasks and projects.
///
/// Every record exclusively owns its blob: upload writes the blob before the
/// record, deletion removes the blob alongside the record.
#[derive(Clone)]
pub struct AttachmentService {
    records: Arc<dyn AttachmentRepository>,
    blobs: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl AttachmentService {
    /// Creates a new attachment service.
    #[must_use]
    pub fn new(
        records: Arc<dyn AttachmentRepository>,
        blobs: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            records,
            blobs,
            clock,
        }
    }

    /// Stores the file bytes and records the attachment for the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError`] when the blob write or the record
    /// insert fails.
    pub async fn upload(
        &self,
        uploader: UserId,
        owner: AttachmentOwner,
        file: FileUpload,
    ) -> AttachmentServiceResult<Attachment> {
        let byte_size = i64::try_from(file.bytes.len()).unwrap_or(i64::MAX);
        let path = self.blobs.put(file.bytes).await?;
        let attachment = Attachment::new(
            owner,
            uploader,
            file.file_name,
            path,
            byte_size,
            file.mime_type,
            &*self.clock,
        );
        self.records.store(&attachment).await?;
        Ok(attachment)
    }

    /// Deletes an attachment record and its blob.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::NotFound`] (wrapped) when the
    /// record does not exist.
    pub async fn delete(&self, id: AttachmentId) -> AttachmentServiceResult<()> {
        let attachment = self
            .records
            .find_by_id(id)
            .await?
            .ok_or(AttachmentRepositoryError::NotFound(id))?;
        self.blobs.delete(attachment.storage_path()).await?;
        self.records.delete(id).await?;
        Ok(())
    }
}
