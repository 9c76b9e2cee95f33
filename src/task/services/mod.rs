//! Application services for task mutation and reordering.

mod mutation;
mod reorder;

pub use mutation::{TaskMutationDeps, TaskMutationError, TaskMutationResult, TaskMutationService};
pub use reorder::{PositionAssignment, TaskReorderService};
