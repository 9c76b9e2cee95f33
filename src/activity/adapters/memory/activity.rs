//! In-memory audit record repository.

use crate::activity::domain::TaskActivity;
use crate::activity::ports::{
    ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult,
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory audit record repository.
///
/// The backing vector preserves insertion order, which doubles as the
/// same-timestamp tiebreak the port contract requires.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityRepository {
    state: Arc<RwLock<Vec<TaskActivity>>>,
}

impl InMemoryActivityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> ActivityRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<TaskActivity>>> {
        self.state.write().map_err(|err| {
            ActivityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(&self) -> ActivityRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<TaskActivity>>> {
        self.state.read().map_err(|err| {
            ActivityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn append(&self, activity: &TaskActivity) -> ActivityRepositoryResult<()> {
        self.write()?.push(activity.clone());
        Ok(())
    }

    async fn list_for_task(&self, task: TaskId) -> ActivityRepositoryResult<Vec<TaskActivity>> {
        Ok(self
            .read()?
            .iter()
            .filter(|activity| activity.task() == task)
            .cloned()
            .collect())
    }

    async fn list_for_tasks_desc(
        &self,
        tasks: &[TaskId],
        page: u32,
        per_page: u32,
    ) -> ActivityRepositoryResult<(Vec<TaskActivity>, u64)> {
        let wanted: HashSet<TaskId> = tasks.iter().copied().collect();
        let mut matching: Vec<(usize, TaskActivity)> = self
            .read()?
            .iter()
            .enumerate()
            .filter(|(_, activity)| wanted.contains(&activity.task()))
            .map(|(index, activity)| (index, activity.clone()))
            .collect();
        // Newest first; later insertions win the same-timestamp tiebreak.
        matching.sort_by(|(left_index, left), (right_index, right)| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then(right_index.cmp(left_index))
        });

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let page_size = usize::try_from(per_page).unwrap_or(usize::MAX);
        let offset = usize::try_from(page.max(1) - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(page_size);
        let entries = matching
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(|(_, activity)| activity)
            .collect();
        Ok((entries, total))
    }

    async fn delete_for_task(&self, task: TaskId) -> ActivityRepositoryResult<()> {
        self.write()?.retain(|activity| activity.task() != task);
        Ok(())
    }
}
