//! Position reordering service for sibling task groups.

use crate::task::domain::TaskId;
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use serde::Deserialize;
use std::sync::Arc;

/// One (task, position) pair of a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PositionAssignment {
    /// Task to move.
    pub id: TaskId,
    /// New sibling-group position.
    pub position: i32,
}

/// Applies bulk reorder batches.
///
/// The caller submits a complete, contiguous renumbering (`0..n-1`) for the
/// affected sibling group; the service sets each pair independently and
/// never renumbers or fills gaps itself. There is no group lock: concurrent
/// overlapping batches can race and leave positions non-contiguous, an
/// accepted weak-consistency tradeoff.
#[derive(Clone)]
pub struct TaskReorderService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskReorderService<R>
where
    R: TaskRepository,
{
    /// Creates a new reorder service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Applies every pair of the batch in order, best-effort.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure. Pairs applied before the
    /// failure are not rolled back.
    pub async fn apply(&self, batch: &[PositionAssignment]) -> TaskRepositoryResult<()> {
        for assignment in batch {
            self.repository
                .set_position(assignment.id, assignment.position)
                .await?;
        }
        Ok(())
    }
}
