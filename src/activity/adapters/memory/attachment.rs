//! In-memory attachment record repository.

use crate::activity::domain::{Attachment, AttachmentId, AttachmentOwner};
use crate::activity::ports::{
    AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory attachment record repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    state: Arc<RwLock<Vec<Attachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(
        &self,
    ) -> AttachmentRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<Attachment>>> {
        self.state.write().map_err(|err| {
            AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(&self) -> AttachmentRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<Attachment>>> {
        self.state.read().map_err(|err| {
            AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        self.write()?.push(attachment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>> {
        Ok(self
            .read()?
            .iter()
            .find(|attachment| attachment.id() == id)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>> {
        Ok(self
            .read()?
            .iter()
            .filter(|attachment| attachment.owner() == owner)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: AttachmentId) -> AttachmentRepositoryResult<()> {
        let mut state = self.write()?;
        let position = state
            .iter()
            .position(|attachment| attachment.id() == id)
            .ok_or(AttachmentRepositoryError::NotFound(id))?;
        state.remove(position);
        Ok(())
    }

    async fn delete_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>> {
        let mut state = self.write()?;
        let (removed, kept): (Vec<Attachment>, Vec<Attachment>) = state
            .drain(..)
            .partition(|attachment| attachment.owner() == owner);
        *state = kept;
        Ok(removed)
    }
}
