//! Append-only audit activity records.

use super::ActivityId;
use crate::identity::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action recorded by an audit activity row.
///
/// Actions round-trip through their storage label. Labels the current code
/// no longer writes (for example `status_changed`) parse as
/// [`ActivityAction::Other`] and must degrade gracefully at render time
/// rather than error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityAction {
    /// Task creation.
    Created,
    /// A comment was posted; mirrored here so project feeds surface it.
    Comment,
    /// A trackable field changed. `field` is the human-readable field label.
    Updated {
        /// Display label of the changed field (for example `Due Date`).
        field: String,
    },
    /// Legacy free-form action label.
    Other(String),
}

impl ActivityAction {
    /// Creates a field-update action from a field label.
    #[must_use]
    pub fn updated(field: impl Into<String>) -> Self {
        Self::Updated {
            field: field.into(),
        }
    }

    /// Returns the storage label for this action.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Created => "created".to_owned(),
            Self::Comment => "comment".to_owned(),
            Self::Updated { field } => format!("{field}_updated"),
            Self::Other(label) => label.clone(),
        }
    }

    /// Parses an action from its storage label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "created" => Self::Created,
            "comment" => Self::Comment,
            other => other.strip_suffix("_updated").map_or_else(
                || Self::Other(other.to_owned()),
                |field| Self::Updated {
                    field: field.to_owned(),
                },
            ),
        }
    }

    /// Returns `true` for the synthetic comment action.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment)
    }
}

/// One append-only audit record for a task.
///
/// Activities are never updated or reordered after insertion; old/new values
/// are captured display snapshots, stable even if the referenced status or
/// user is later renamed or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskActivity {
    id: ActivityId,
    task: TaskId,
    user: Option<UserId>,
    action: ActivityAction,
    old_value: Value,
    new_value: Value,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted activity record.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedActivityData {
    /// Persisted record identifier.
    pub id: ActivityId,
    /// Persisted owning task.
    pub task: TaskId,
    /// Persisted acting user; `None` for system-generated rows.
    pub user: Option<UserId>,
    /// Persisted action.
    pub action: ActivityAction,
    /// Persisted old display value.
    pub old_value: Value,
    /// Persisted new display value.
    pub new_value: Value,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskActivity {
    /// Creates a new audit record stamped with the current clock time.
    #[must_use]
    pub fn new(
        task: TaskId,
        user: Option<UserId>,
        action: ActivityAction,
        old_value: Value,
        new_value: Value,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            task,
            user,
            action,
            old_value,
            new_value,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an activity record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            user: data.user,
            action: data.action,
            old_value: data.old_value,
            new_value: data.new_value,
            created_at: data.created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the acting user, if the row was user-generated.
    #[must_use]
    pub const fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> &ActivityAction {
        &self.action
    }

    /// Returns the old display value.
    #[must_use]
    pub const fn old_value(&self) -> &Value {
        &self.old_value
    }

    /// Returns the new display value.
    #[must_use]
    pub const fn new_value(&self) -> &Value {
        &self.new_value
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
