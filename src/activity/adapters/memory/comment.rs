//! In-memory comment repository.

use crate::activity::domain::{Comment, CommentId};
use crate::activity::ports::{
    CommentRepository, CommentRepositoryError, CommentRepositoryResult,
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> CommentRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<Comment>>> {
        self.state.write().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(&self) -> CommentRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<Comment>>> {
        self.state.read().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        self.write()?.push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        Ok(self
            .read()?
            .iter()
            .find(|comment| comment.id() == id)
            .cloned())
    }

    async fn list_for_task(&self, task: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        Ok(self
            .read()?
            .iter()
            .filter(|comment| comment.task() == task)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        let mut state = self.write()?;
        let position = state
            .iter()
            .position(|comment| comment.id() == id)
            .ok_or(CommentRepositoryError::NotFound(id))?;
        state.remove(position);
        Ok(())
    }

    async fn delete_for_task(&self, task: TaskId) -> CommentRepositoryResult<()> {
        self.write()?.retain(|comment| comment.task() != task);
        Ok(())
    }
}
