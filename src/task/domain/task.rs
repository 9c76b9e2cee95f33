//! Task aggregate root.

use super::{Hours, Priority, TaskId, TaskPatch, TaskTitle};
use crate::identity::{MilestoneId, ProjectId, StatusId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// `position` is a dense, unique ordering within the sibling group sharing
/// the same project and parent; ascending means earlier in the list. The
/// schedule fields are never cross-validated: a due date before the start
/// date is stored as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project: ProjectId,
    parent: Option<TaskId>,
    title: TaskTitle,
    description: Option<String>,
    status: Option<StatusId>,
    milestone: Option<MilestoneId>,
    assignee: Option<UserId>,
    creator: UserId,
    priority: Priority,
    estimated_hours: Option<Hours>,
    actual_hours: Option<Hours>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Creation request for a task.
///
/// Position and creator are optional: the mutation engine assigns the next
/// free sibling position and defaults the creator to the acting user.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    project: ProjectId,
    title: TaskTitle,
    parent: Option<TaskId>,
    description: Option<String>,
    status: Option<StatusId>,
    milestone: Option<MilestoneId>,
    assignee: Option<UserId>,
    priority: Priority,
    estimated_hours: Option<Hours>,
    actual_hours: Option<Hours>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    position: Option<i32>,
    creator: Option<UserId>,
}

impl TaskDraft {
    /// Creates a draft with required fields.
    #[must_use]
    pub const fn new(project: ProjectId, title: TaskTitle) -> Self {
        Self {
            project,
            title,
            parent: None,
            description: None,
            status: None,
            milestone: None,
            assignee: None,
            priority: Priority::Medium,
            estimated_hours: None,
            actual_hours: None,
            start_date: None,
            due_date: None,
            position: None,
            creator: None,
        }
    }

    /// Sets the parent task (subtask nesting).
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusId) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the milestone.
    #[must_use]
    pub const fn with_milestone(mut self, milestone: MilestoneId) -> Self {
        self.milestone = Some(milestone);
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: Hours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the actual hours.
    #[must_use]
    pub const fn with_actual_hours(mut self, hours: Hours) -> Self {
        self.actual_hours = Some(hours);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets an explicit list position, bypassing sibling-max assignment.
    #[must_use]
    pub const fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets an explicit creator, overriding the acting user.
    #[must_use]
    pub const fn with_creator(mut self, creator: UserId) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    /// Returns the explicit position, if one was supplied.
    #[must_use]
    pub const fn position(&self) -> Option<i32> {
        self.position
    }

    /// Returns the explicit creator, if one was supplied.
    #[must_use]
    pub const fn creator(&self) -> Option<UserId> {
        self.creator
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project: ProjectId,
    /// Persisted parent task, if any.
    pub parent: Option<TaskId>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status reference, if any.
    pub status: Option<StatusId>,
    /// Persisted milestone reference, if any.
    pub milestone: Option<MilestoneId>,
    /// Persisted assignee reference, if any.
    pub assignee: Option<UserId>,
    /// Persisted creator.
    pub creator: UserId,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted estimated hours, if any.
    pub estimated_hours: Option<Hours>,
    /// Persisted actual hours, if any.
    pub actual_hours: Option<Hours>,
    /// Persisted start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted sibling-group position.
    pub position: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft with resolved defaults.
    #[must_use]
    pub fn new(draft: TaskDraft, creator: UserId, position: i32, clock: &dyn Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project: draft.project,
            parent: draft.parent,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            milestone: draft.milestone,
            assignee: draft.assignee,
            creator,
            priority: draft.priority,
            estimated_hours: draft.estimated_hours,
            actual_hours: draft.actual_hours,
            start_date: draft.start_date,
            due_date: draft.due_date,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project: data.project,
            parent: data.parent,
            title: data.title,
            description: data.description,
            status: data.status,
            milestone: data.milestone,
            assignee: data.assignee,
            creator: data.creator,
            priority: data.priority,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            start_date: data.start_date,
            due_date: data.due_date,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status reference, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusId> {
        self.status
    }

    /// Returns the milestone reference, if any.
    #[must_use]
    pub const fn milestone(&self) -> Option<MilestoneId> {
        self.milestone
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the estimated hours, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<Hours> {
        self.estimated_hours
    }

    /// Returns the actual hours, if any.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<Hours> {
        self.actual_hours
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the sibling-group position.
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update in place and refreshes `updated_at`.
    pub fn apply_patch(&mut self, patch: &TaskPatch, clock: &dyn Clock) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        patch.description.apply_to(&mut self.description);
        patch.status.apply_to(&mut self.status);
        patch.milestone.apply_to(&mut self.milestone);
        patch.assignee.apply_to(&mut self.assignee);
        patch.parent.apply_to(&mut self.parent);
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        patch.estimated_hours.apply_to(&mut self.estimated_hours);
        patch.actual_hours.apply_to(&mut self.actual_hours);
        patch.start_date.apply_to(&mut self.start_date);
        patch.due_date.apply_to(&mut self.due_date);
        self.updated_at = clock.utc();
    }

    /// Moves the task to a new sibling-group position.
    ///
    /// Reordering is a pure list operation and does not count as an edit, so
    /// `updated_at` is left untouched.
    pub const fn relocate(&mut self, position: i32) {
        self.position = position;
    }
}
