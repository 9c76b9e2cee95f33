//! Read-side feed assembly for tasks and projects.

use crate::activity::domain::{
    AttachmentOwner, FeedItem, FeedItemDetail, ProjectActivityEntry, ProjectActivityPage,
    render_activity_content,
};
use crate::activity::ports::{
    ActivityRepository, ActivityRepositoryError, AttachmentRepository, AttachmentRepositoryError,
    CommentRepository, CommentRepositoryError,
};
use crate::identity::{DirectoryError, User, UserDirectory, UserId};
use crate::task::domain::{Task, TaskId};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Fixed page size of the per-project audit feed.
pub const PROJECT_FEED_PAGE_SIZE: u32 = 50;

/// Errors returned by feed assembly.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Task listing failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Audit record listing failed.
    #[error(transparent)]
    Activities(#[from] ActivityRepositoryError),
    /// Comment listing failed.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),
    /// Attachment listing failed.
    #[error(transparent)]
    Attachments(#[from] AttachmentRepositoryError),
    /// User resolution failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Collaborator handles required by the feed service.
pub struct FeedServiceDeps {
    /// Task listing for project scoping.
    pub tasks: Arc<dyn TaskRepository>,
    /// Audit record source.
    pub activities: Arc<dyn ActivityRepository>,
    /// Comment source.
    pub comments: Arc<dyn CommentRepository>,
    /// Attachment source.
    pub attachments: Arc<dyn AttachmentRepository>,
    /// User display resolution.
    pub users: Arc<dyn UserDirectory>,
}

/// Assembles chronological activity feeds.
///
/// The per-task feed merges comments, non-comment audit records, and file
/// uploads into one ascending stream; the per-project feed pages the raw
/// audit records of every task in the project, newest first.
#[derive(Clone)]
pub struct FeedService {
    tasks: Arc<dyn TaskRepository>,
    activities: Arc<dyn ActivityRepository>,
    comments: Arc<dyn CommentRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    users: Arc<dyn UserDirectory>,
}

impl FeedService {
    /// Creates a new feed service from its collaborator handles.
    #[must_use]
    pub fn new(deps: FeedServiceDeps) -> Self {
        Self {
            tasks: deps.tasks,
            activities: deps.activities,
            comments: deps.comments,
            attachments: deps.attachments,
            users: deps.users,
        }
    }

    /// Builds the merged feed for one task, oldest first.
    ///
    /// Comment audit mirrors are excluded (the comment row itself carries the
    /// content); the sort is stable, so same-timestamp items keep their
    /// source order: comments, then activities, then files.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when any source listing or user lookup fails.
    pub async fn task_feed(&self, task: TaskId) -> FeedResult<Vec<FeedItem>> {
        let comments = self.comments.list_for_task(task).await?;
        let activities = self.activities.list_for_task(task).await?;
        let attachments = self
            .attachments
            .list_for_owner(AttachmentOwner::Task(task))
            .await?;

        let mut resolver = UserResolver::new(Arc::clone(&self.users));
        let mut items = Vec::with_capacity(comments.len() + activities.len() + attachments.len());

        for comment in comments {
            items.push(FeedItem {
                user: resolver.resolve(Some(comment.author())).await?,
                content: comment.content().to_owned(),
                created_at: comment.created_at(),
                detail: FeedItemDetail::Comment,
            });
        }
        for activity in activities {
            if activity.action().is_comment() {
                continue;
            }
            items.push(FeedItem {
                user: resolver.resolve(activity.user()).await?,
                content: render_activity_content(&activity),
                created_at: activity.created_at(),
                detail: FeedItemDetail::Activity {
                    old: activity.old_value().clone(),
                    new: activity.new_value().clone(),
                },
            });
        }
        for attachment in attachments {
            items.push(FeedItem {
                user: resolver.resolve(Some(attachment.uploader())).await?,
                content: format!("Uploaded file: {}", attachment.file_name()),
                created_at: attachment.created_at(),
                detail: FeedItemDetail::File {
                    path: attachment.storage_path().to_owned(),
                    name: attachment.file_name().to_owned(),
                },
            });
        }

        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }

    /// Builds one page of the project-wide audit feed, newest first.
    ///
    /// Every audit record of every task in the project participates,
    /// comment mirrors included. Each entry carries its task and user
    /// eagerly resolved; both may be `None` for records that outlived them.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when any source listing or user lookup fails.
    pub async fn project_feed(
        &self,
        project: crate::identity::ProjectId,
        page: u32,
    ) -> FeedResult<ProjectActivityPage> {
        let tasks = self.tasks.list_for_project(project).await?;
        let task_index: HashMap<TaskId, Task> =
            tasks.into_iter().map(|task| (task.id(), task)).collect();
        let ids: Vec<TaskId> = task_index.keys().copied().collect();

        let (records, total) = self
            .activities
            .list_for_tasks_desc(&ids, page, PROJECT_FEED_PAGE_SIZE)
            .await?;

        let mut resolver = UserResolver::new(Arc::clone(&self.users));
        let mut entries = Vec::with_capacity(records.len());
        for activity in records {
            let user = resolver.resolve(activity.user()).await?;
            let task = task_index.get(&activity.task()).cloned();
            entries.push(ProjectActivityEntry {
                activity,
                task,
                user,
            });
        }

        Ok(ProjectActivityPage {
            entries,
            page,
            per_page: PROJECT_FEED_PAGE_SIZE,
            total,
        })
    }
}

/// Memoizing user lookup; dangling references resolve to `None` once.
struct UserResolver {
    users: Arc<dyn UserDirectory>,
    cache: HashMap<UserId, Option<User>>,
}

impl UserResolver {
    fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            users,
            cache: HashMap::new(),
        }
    }

    async fn resolve(&mut self, id: Option<UserId>) -> Result<Option<User>, DirectoryError> {
        let Some(user_id) = id else {
            return Ok(None);
        };
        if let Some(cached) = self.cache.get(&user_id) {
            return Ok(cached.clone());
        }
        let user = self.users.find_by_id(user_id).await?;
        self.cache.insert(user_id, user.clone());
        Ok(user)
    }
}
