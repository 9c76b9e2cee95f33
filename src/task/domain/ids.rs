//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use crate::identity::ids::uuid_id;
use serde::{Deserialize, Serialize};
use std::fmt;

uuid_id!(
    /// Unique identifier for a task record.
    TaskId,
    "task"
);

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative decimal hour count (estimated or actual effort).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(f64);

impl Hours {
    /// Creates a validated hour count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHours`] when the value is negative
    /// or not a finite number.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TaskDomainError::InvalidHours);
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
