//! Task mutation engine: change-tracked create/update/delete.

use crate::activity::domain::{ActivityAction, AttachmentOwner, TaskActivity};
use crate::activity::ports::{
    ActivityRepository, ActivityRepositoryError, AttachmentRepository, AttachmentRepositoryError,
    BlobStore, BlobStoreError, CommentRepository, CommentRepositoryError,
};
use crate::identity::{
    DirectoryError, MembershipStore, StatusDirectory, StatusId, UserDirectory, UserId,
};
use crate::notify::{Notification, Notifier};
use crate::task::domain::{
    Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TrackedField,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Service-level errors for task mutation operations.
#[derive(Debug, Error)]
pub enum TaskMutationError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Audit trail write failed.
    #[error(transparent)]
    Activity(#[from] ActivityRepositoryError),
    /// Comment cascade failed.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),
    /// Attachment cascade failed.
    #[error(transparent)]
    Attachments(#[from] AttachmentRepositoryError),
    /// Blob release failed during cascade.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    /// Identity store lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for task mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Collaborator handles required by the mutation engine.
pub struct TaskMutationDeps {
    /// Task persistence.
    pub tasks: Arc<dyn TaskRepository>,
    /// Append-only audit trail.
    pub activities: Arc<dyn ActivityRepository>,
    /// Comment rows, removed on task deletion.
    pub comments: Arc<dyn CommentRepository>,
    /// Attachment rows, removed on task deletion.
    pub attachments: Arc<dyn AttachmentRepository>,
    /// Blob store backing the attachments.
    pub blobs: Arc<dyn BlobStore>,
    /// User display-name resolution.
    pub users: Arc<dyn UserDirectory>,
    /// Status display-name resolution.
    pub statuses: Arc<dyn StatusDirectory>,
    /// Project display-name resolution for assignment notifications.
    pub membership: Arc<dyn MembershipStore>,
    /// Best-effort notification dispatch.
    pub notifier: Arc<dyn Notifier>,
    /// Timestamp source.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

/// Task mutation engine.
///
/// Applies creates, partial updates, and deletes; derives the minimal
/// human-readable change set for each update and persists it as audit rows
/// in the fixed field-check order of [`TrackedField::DIFF_ORDER`].
#[derive(Clone)]
pub struct TaskMutationService {
    tasks: Arc<dyn TaskRepository>,
    activities: Arc<dyn ActivityRepository>,
    comments: Arc<dyn CommentRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    blobs: Arc<dyn BlobStore>,
    users: Arc<dyn UserDirectory>,
    statuses: Arc<dyn StatusDirectory>,
    membership: Arc<dyn MembershipStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TaskMutationService {
    /// Creates a new mutation engine from its collaborator handles.
    #[must_use]
    pub fn new(deps: TaskMutationDeps) -> Self {
        Self {
            tasks: deps.tasks,
            activities: deps.activities,
            comments: deps.comments,
            attachments: deps.attachments,
            blobs: deps.blobs,
            users: deps.users,
            statuses: deps.statuses,
            membership: deps.membership,
            notifier: deps.notifier,
            clock: deps.clock,
        }
    }

    /// Creates a task.
    ///
    /// Without an explicit position the task is appended after the highest
    /// existing sibling position (or at 0 for an empty group); without an
    /// explicit creator the acting user is recorded. One `created` audit row
    /// is written with the title as its new value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError`] when persistence fails.
    pub async fn create(&self, actor: UserId, draft: TaskDraft) -> TaskMutationResult<Task> {
        let position = match draft.position() {
            Some(position) => position,
            None => self
                .tasks
                .max_position(draft.project(), draft.parent())
                .await?
                .map_or(0, |max| max + 1),
        };
        let creator = draft.creator().unwrap_or(actor);
        let task = Task::new(draft, creator, position, &*self.clock);
        self.tasks.store(&task).await?;

        let activity = TaskActivity::new(
            task.id(),
            Some(actor),
            ActivityAction::Created,
            Value::Null,
            json!({ "title": task.title().as_str() }),
            &*self.clock,
        );
        self.activities.append(&activity).await?;
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// Snapshots the task before applying the patch, appends one audit row
    /// per changed trackable field (display values resolved at write time),
    /// and notifies a newly assigned user. Notification failures are logged
    /// and never fail the update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist, or [`TaskMutationError`] when persistence fails.
    pub async fn update(
        &self,
        actor: UserId,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskMutationResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let before = task.clone();
        task.apply_patch(patch, &*self.clock);

        let changes = self.resolve_changes(&before, &task).await?;
        self.tasks.update(&task).await?;

        for (field, old, new) in changes {
            let activity = TaskActivity::new(
                task.id(),
                Some(actor),
                ActivityAction::updated(field.label()),
                old,
                new,
                &*self.clock,
            );
            self.activities.append(&activity).await?;
        }

        if before.assignee() != task.assignee() {
            self.notify_assignee(actor, &task).await;
        }
        Ok(task)
    }

    /// Deletes a task along with its activities, comments, and attachments.
    ///
    /// Attachment blobs are released through the blob store so no orphaned
    /// rows or blobs remain.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist, or [`TaskMutationError`] when a cascade step fails.
    pub async fn delete(&self, id: TaskId) -> TaskMutationResult<()> {
        if self.tasks.find_by_id(id).await?.is_none() {
            return Err(TaskRepositoryError::NotFound(id).into());
        }
        self.comments.delete_for_task(id).await?;
        self.activities.delete_for_task(id).await?;
        let removed = self
            .attachments
            .delete_for_owner(AttachmentOwner::Task(id))
            .await?;
        for attachment in removed {
            self.blobs.delete(attachment.storage_path()).await?;
        }
        self.tasks.delete(id).await?;
        Ok(())
    }

    /// Compares two task snapshots over the fixed trackable-field order and
    /// resolves display values for each difference.
    async fn resolve_changes(
        &self,
        before: &Task,
        after: &Task,
    ) -> TaskMutationResult<Vec<(TrackedField, Value, Value)>> {
        let mut changes = Vec::new();
        for field in TrackedField::DIFF_ORDER {
            if let Some((old, new)) = self.field_change(field, before, after).await? {
                changes.push((field, old, new));
            }
        }
        Ok(changes)
    }

    async fn field_change(
        &self,
        field: TrackedField,
        before: &Task,
        after: &Task,
    ) -> TaskMutationResult<Option<(Value, Value)>> {
        let change = match field {
            TrackedField::Status => {
                if before.status() == after.status() {
                    None
                } else {
                    Some((
                        self.status_display(before.status()).await?,
                        self.status_display(after.status()).await?,
                    ))
                }
            }
            TrackedField::Priority => (before.priority() != after.priority()).then(|| {
                (
                    Value::String(before.priority().display().to_owned()),
                    Value::String(after.priority().display().to_owned()),
                )
            }),
            TrackedField::Assignee => {
                if before.assignee() == after.assignee() {
                    None
                } else {
                    Some((
                        self.assignee_display(before.assignee()).await?,
                        self.assignee_display(after.assignee()).await?,
                    ))
                }
            }
            TrackedField::DueDate => (before.due_date() != after.due_date())
                .then(|| (date_value(before.due_date()), date_value(after.due_date()))),
            TrackedField::Title => (before.title() != after.title()).then(|| {
                (
                    Value::String(before.title().as_str().to_owned()),
                    Value::String(after.title().as_str().to_owned()),
                )
            }),
            TrackedField::Parent => (before.parent() != after.parent()).then(|| {
                (
                    before
                        .parent()
                        .map_or(Value::Null, |id| Value::String(id.to_string())),
                    after
                        .parent()
                        .map_or(Value::Null, |id| Value::String(id.to_string())),
                )
            }),
            TrackedField::EstimatedHours => {
                (before.estimated_hours() != after.estimated_hours()).then(|| {
                    (
                        hours_value(before.estimated_hours()),
                        hours_value(after.estimated_hours()),
                    )
                })
            }
            TrackedField::ActualHours => {
                (before.actual_hours() != after.actual_hours()).then(|| {
                    (
                        hours_value(before.actual_hours()),
                        hours_value(after.actual_hours()),
                    )
                })
            }
        };
        Ok(change)
    }

    /// Resolves a status reference to its display name, substituting `None`
    /// for absent or dangling references.
    async fn status_display(&self, status: Option<StatusId>) -> TaskMutationResult<Value> {
        let name = match status {
            Some(id) => self.statuses.status_name(id).await?,
            None => None,
        };
        Ok(Value::String(name.unwrap_or_else(|| "None".to_owned())))
    }

    /// Resolves an assignee reference to its display name, substituting
    /// `Unassigned` for absent or dangling references.
    async fn assignee_display(&self, assignee: Option<UserId>) -> TaskMutationResult<Value> {
        let name = match assignee {
            Some(id) => self.users.find_by_id(id).await?.map(|user| user.name),
            None => None,
        };
        Ok(Value::String(
            name.unwrap_or_else(|| "Unassigned".to_owned()),
        ))
    }

    /// Dispatches a task-assignment notification to the new assignee,
    /// best-effort. Lookup or dispatch failures are logged and swallowed.
    async fn notify_assignee(&self, actor: UserId, task: &Task) {
        let Some(assignee_id) = task.assignee() else {
            return;
        };
        let assignee = match self.users.find_by_id(assignee_id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "assignee lookup failed, skipping notification");
                return;
            }
        };
        let Some(recipient) = assignee.and_then(|user| user.email) else {
            return;
        };

        let project_name = self
            .membership
            .project_name(task.project())
            .await
            .ok()
            .flatten();
        let assigner_name = self
            .users
            .find_by_id(actor)
            .await
            .ok()
            .flatten()
            .map(|user| user.name);

        let notification = Notification::TaskAssigned {
            recipient,
            task_title: task.title().as_str().to_owned(),
            project_name,
            assigner_name,
        };
        if let Err(err) = self.notifier.dispatch(notification).await {
            warn!(error = %err, "task-assignment notification failed");
        }
    }
}

fn date_value(date: Option<NaiveDate>) -> Value {
    date.map_or(Value::Null, |d| Value::String(d.to_string()))
}

fn hours_value(hours: Option<crate::task::domain::Hours>) -> Value {
    hours.map_or(Value::Null, |h| json!(h.value()))
}
