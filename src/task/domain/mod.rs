//! Domain model for task mutation and reordering.
//!
//! The task domain models the task aggregate, validated scalar values,
//! partial-update patches, and the fixed set of trackable fields that feed
//! the audit trail, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod patch;
mod priority;
mod task;

pub use error::{ParsePriorityError, TaskDomainError};
pub use ids::{Hours, TaskId, TaskTitle};
pub use patch::{FieldPatch, TaskPatch, TrackedField};
pub use priority::Priority;
pub use task::{PersistedTaskData, Task, TaskDraft};
