//! Comment posting and deletion, with mention notifications.

use crate::activity::domain::{ActivityAction, Attachment, AttachmentOwner, Comment, CommentId, TaskActivity};
use crate::activity::ports::{
    ActivityRepository, ActivityRepositoryError, AttachmentRepository, AttachmentRepositoryError,
    BlobStore, BlobStoreError, CommentRepository, CommentRepositoryError,
};
use crate::identity::{DirectoryError, UserDirectory, UserId};
use crate::notify::{Notification, Notifier};
use crate::task::domain::{Task, TaskId};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)").expect("mention pattern must compile"));

/// Errors returned by comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Neither text content nor files were supplied.
    #[error("a comment requires text content or at least one file")]
    EmptyComment,
    /// The target task does not exist.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),
    /// Only the author may delete a comment.
    #[error("comment {0} can only be deleted by its author")]
    NotAuthor(CommentId),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Comment persistence failed.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),
    /// Audit mirror write failed.
    #[error(transparent)]
    Activities(#[from] ActivityRepositoryError),
    /// Attachment record write failed.
    #[error(transparent)]
    Attachments(#[from] AttachmentRepositoryError),
    /// File blob write failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for comment operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// An uploaded file accompanying a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original filename.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Collaborator handles required by the comment service.
pub struct CommentServiceDeps {
    /// Task existence and title lookup.
    pub tasks: Arc<dyn TaskRepository>,
    /// Comment persistence.
    pub comments: Arc<dyn CommentRepository>,
    /// Audit trail for comment mirrors.
    pub activities: Arc<dyn ActivityRepository>,
    /// Attachment records for files posted with comments.
    pub attachments: Arc<dyn AttachmentRepository>,
    /// Blob store backing the attachments.
    pub blobs: Arc<dyn BlobStore>,
    /// Mention resolution and author display names.
    pub users: Arc<dyn UserDirectory>,
    /// Best-effort mention notification dispatch.
    pub notifier: Arc<dyn Notifier>,
    /// Timestamp source.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

/// Posts and deletes task comments.
///
/// Posting is the compound write path: comment row, `comment` audit mirror,
/// `@Name` mention notifications, then file storage. Deleting removes only
/// the comment row; the audit mirror stays.
#[derive(Clone)]
pub struct CommentService {
    tasks: Arc<dyn TaskRepository>,
    comments: Arc<dyn CommentRepository>,
    activities: Arc<dyn ActivityRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    blobs: Arc<dyn BlobStore>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl CommentService {
    /// Creates a new comment service from its collaborator handles.
    #[must_use]
    pub fn new(deps: CommentServiceDeps) -> Self {
        Self {
            tasks: deps.tasks,
            comments: deps.comments,
            activities: deps.activities,
            attachments: deps.attachments,
            blobs: deps.blobs,
            users: deps.users,
            notifier: deps.notifier,
            clock: deps.clock,
        }
    }

    /// Posts a comment on a task.
    ///
    /// Requires text content or at least one file. The comment row and its
    /// `comment` audit mirror are always written; mention notifications are
    /// best-effort and never fail the post; each file is stored as a
    /// task-owned attachment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::EmptyComment`] when both content and
    /// files are absent, [`CommentServiceError::UnknownTask`] when the task
    /// does not exist, or a persistence error from any write step.
    pub async fn post(
        &self,
        author: UserId,
        task: TaskId,
        content: Option<String>,
        files: Vec<FileUpload>,
    ) -> CommentServiceResult<Comment> {
        let body = content.unwrap_or_default();
        if body.trim().is_empty() && files.is_empty() {
            return Err(CommentServiceError::EmptyComment);
        }
        let target = self
            .tasks
            .find_by_id(task)
            .await?
            .ok_or(CommentServiceError::UnknownTask(task))?;

        let comment = Comment::new(target.id(), author, body, &*self.clock);
        self.comments.store(&comment).await?;

        let mirror = TaskActivity::new(
            target.id(),
            Some(author),
            ActivityAction::Comment,
            Value::Null,
            json!({ "content": comment.content() }),
            &*self.clock,
        );
        self.activities.append(&mirror).await?;

        self.notify_mentions(author, &target, comment.content())
            .await;

        for file in files {
            self.store_file(author, target.id(), file).await?;
        }
        Ok(comment)
    }

    /// Deletes a comment. Author-only; the `comment` audit mirror written at
    /// post time is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] (wrapped) when the
    /// comment does not exist, or [`CommentServiceError::NotAuthor`] when
    /// the actor is not the author.
    pub async fn delete(&self, actor: UserId, id: CommentId) -> CommentServiceResult<()> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(CommentRepositoryError::NotFound(id))?;
        if comment.author() != actor {
            return Err(CommentServiceError::NotAuthor(id));
        }
        self.comments.delete(id).await?;
        Ok(())
    }

    /// Resolves `@Name` mentions and dispatches a notification per mentioned
    /// user, best-effort. The author and users without an email address are
    /// skipped; lookup or dispatch failures are logged and swallowed.
    async fn notify_mentions(&self, author: UserId, task: &Task, content: &str) {
        let distinct: BTreeSet<String> = MENTION_PATTERN
            .captures_iter(content)
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str().to_owned())
            .collect();
        if distinct.is_empty() {
            return;
        }
        let names: Vec<String> = distinct.into_iter().collect();

        let mentioned = match self.users.find_by_names(&names).await {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "mention lookup failed, skipping notifications");
                return;
            }
        };
        let commenter_name = self
            .users
            .find_by_id(author)
            .await
            .ok()
            .flatten()
            .map_or_else(|| "Someone".to_owned(), |user| user.name);

        for user in mentioned {
            if user.id == author {
                continue;
            }
            let Some(recipient) = user.email else {
                continue;
            };
            let notification = Notification::CommentMentioned {
                recipient,
                task_title: task.title().as_str().to_owned(),
                commenter_name: commenter_name.clone(),
                comment_body: content.to_owned(),
            };
            if let Err(err) = self.notifier.dispatch(notification).await {
                warn!(error = %err, "mention notification failed");
            }
        }
    }

    async fn store_file(
        &self,
        uploader: UserId,
        task: TaskId,
        file: FileUpload,
    ) -> CommentServiceResult<()> {
        let byte_size = i64::try_from(file.bytes.len()).unwrap_or(i64::MAX);
        let path = self.blobs.put(file.bytes).await?;
        let attachment = Attachment::new(
            AttachmentOwner::Task(task),
            uploader,
            file.file_name,
            path,
            byte_size,
            file.mime_type,
            &*self.clock,
        );
        self.attachments.store(&attachment).await?;
        Ok(())
    }
}
