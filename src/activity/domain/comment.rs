//! Task comments.

use super::CommentId;
use crate::identity::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment on a task.
///
/// Content may be empty when the comment consists solely of attached files.
/// Only the author may delete a comment; deletion removes the row but never
/// the `comment` audit record written at post time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task: TaskId,
    author: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted owning task.
    pub task: TaskId,
    /// Persisted author.
    pub author: UserId,
    /// Persisted text content.
    pub content: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment stamped with the current clock time.
    #[must_use]
    pub fn new(
        task: TaskId,
        author: UserId,
        content: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task,
            author,
            content: content.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            author: data.author,
            content: data.content,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
