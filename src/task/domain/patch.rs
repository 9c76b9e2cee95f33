//! Partial task updates and the fixed trackable-field table.

use super::{Hours, Priority, TaskId, TaskTitle};
use crate::identity::{MilestoneId, StatusId, UserId};
use chrono::NaiveDate;

/// Tri-state update for an optional task field.
///
/// A partial update must distinguish "leave the field alone" from "set the
/// field to null", which a plain `Option` cannot express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Keep the current value.
    #[default]
    Keep,
    /// Set the field to null.
    Clear,
    /// Replace the field with the given value.
    Set(T),
}

impl<T: Clone> FieldPatch<T> {
    /// Applies the patch to an optional field in place.
    pub fn apply_to(&self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *field = None,
            Self::Set(value) => *field = Some(value.clone()),
        }
    }
}

/// Partial update for a task.
///
/// Every field defaults to "no change"; construct with struct-update syntax
/// over [`TaskPatch::default`]. Foreign-key existence is the caller's
/// responsibility — the mutation engine does not validate references it is
/// handed, it only fails to resolve display names for dangling ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// New title, when changing.
    pub title: Option<TaskTitle>,
    /// Description update.
    pub description: FieldPatch<String>,
    /// Status update.
    pub status: FieldPatch<StatusId>,
    /// Milestone update.
    pub milestone: FieldPatch<MilestoneId>,
    /// Assignee update.
    pub assignee: FieldPatch<UserId>,
    /// Parent-task update (subtask nesting).
    pub parent: FieldPatch<TaskId>,
    /// New priority, when changing.
    pub priority: Option<Priority>,
    /// Estimated-hours update.
    pub estimated_hours: FieldPatch<Hours>,
    /// Actual-hours update.
    pub actual_hours: FieldPatch<Hours>,
    /// Start-date update.
    pub start_date: FieldPatch<NaiveDate>,
    /// Due-date update. Never validated against the start date.
    pub due_date: FieldPatch<NaiveDate>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Task fields whose changes generate an audit row.
///
/// [`TrackedField::DIFF_ORDER`] is the fixed order in which fields are
/// checked and audit rows inserted; consumers rely on insertion order, not
/// wall-clock timestamps, to distinguish rows from a single update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    /// Task status reference.
    Status,
    /// Priority level.
    Priority,
    /// Assigned user reference.
    Assignee,
    /// Due date.
    DueDate,
    /// Title text.
    Title,
    /// Parent-task reference.
    Parent,
    /// Estimated hours.
    EstimatedHours,
    /// Actual hours.
    ActualHours,
}

impl TrackedField {
    /// Fixed field-check order for audit row insertion.
    pub const DIFF_ORDER: [Self; 8] = [
        Self::Status,
        Self::Priority,
        Self::Assignee,
        Self::DueDate,
        Self::Title,
        Self::Parent,
        Self::EstimatedHours,
        Self::ActualHours,
    ];

    /// Returns the human-readable field label used in audit action names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Assignee => "Assignee",
            Self::DueDate => "Due Date",
            Self::Title => "Title",
            Self::Parent => "Parent Task",
            Self::EstimatedHours => "Estimated Hours",
            Self::ActualHours => "Actual Hours",
        }
    }
}
