//! Repository ports for audit records, comments, and attachments.

use crate::activity::domain::{
    Attachment, AttachmentId, AttachmentOwner, Comment, CommentId, TaskActivity,
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity repository operations.
pub type ActivityRepositoryResult<T> = Result<T, ActivityRepositoryError>;

/// Errors returned by activity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Append-only audit record persistence.
///
/// Implementations must preserve insertion order as the tiebreak for rows
/// sharing a timestamp; consumers rely on it to keep the audit rows of one
/// update call in field-check order.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Appends one audit record. Records are never updated afterwards.
    async fn append(&self, activity: &TaskActivity) -> ActivityRepositoryResult<()>;

    /// Returns every record for the task, oldest first, insertion-ordered
    /// within equal timestamps.
    async fn list_for_task(&self, task: TaskId) -> ActivityRepositoryResult<Vec<TaskActivity>>;

    /// Returns one page of records across the given tasks, newest first,
    /// along with the total record count.
    async fn list_for_tasks_desc(
        &self,
        tasks: &[TaskId],
        page: u32,
        per_page: u32,
    ) -> ActivityRepositoryResult<(Vec<TaskActivity>, u64)>;

    /// Removes every record belonging to the task.
    async fn delete_for_task(&self, task: TaskId) -> ActivityRepositoryResult<()>;
}

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// The comment was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Finds a comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Returns every comment for the task, oldest first.
    async fn list_for_task(&self, task: TaskId) -> CommentRepositoryResult<Vec<Comment>>;

    /// Removes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the comment does
    /// not exist.
    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()>;

    /// Removes every comment belonging to the task.
    async fn delete_for_task(&self, task: TaskId) -> CommentRepositoryResult<()>;
}

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// The attachment was not found.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Attachment record persistence contract.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores a new attachment record.
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()>;

    /// Finds an attachment by identifier.
    async fn find_by_id(&self, id: AttachmentId)
    -> AttachmentRepositoryResult<Option<Attachment>>;

    /// Returns every attachment for the owner, oldest first.
    async fn list_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>>;

    /// Removes an attachment record.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn delete(&self, id: AttachmentId) -> AttachmentRepositoryResult<()>;

    /// Removes every attachment belonging to the owner, returning the
    /// removed records so callers can release their blobs.
    async fn delete_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>>;
}
