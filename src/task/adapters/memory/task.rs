//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::ProjectId;
use crate::task::domain::{Task, TaskId};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn max_position(
        &self,
        project: ProjectId,
        parent: Option<TaskId>,
    ) -> TaskRepositoryResult<Option<i32>> {
        Ok(self
            .read()?
            .values()
            .filter(|task| task.project() == project && task.parent() == parent)
            .map(Task::position)
            .max())
    }

    async fn set_position(&self, id: TaskId, position: i32) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let task = state.get_mut(&id).ok_or(TaskRepositoryError::NotFound(id))?;
        task.relocate(position);
        Ok(())
    }

    async fn list_for_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .read()?
            .values()
            .filter(|task| task.project() == project)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::position);
        Ok(tasks)
    }
}
