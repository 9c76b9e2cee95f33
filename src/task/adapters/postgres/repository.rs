//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::identity::{MilestoneId, ProjectId, StatusId, UserId};
use crate::task::{
    domain::{Hours, PersistedTaskData, Priority, Task, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn max_position(
        &self,
        project: ProjectId,
        parent: Option<TaskId>,
    ) -> TaskRepositoryResult<Option<i32>> {
        self.run_blocking(move |connection| {
            let scoped = tasks::table.filter(tasks::project_id.eq(project.into_inner()));
            let result = match parent {
                Some(parent) => scoped
                    .filter(tasks::parent_id.eq(parent.into_inner()))
                    .select(max(tasks::position))
                    .first::<Option<i32>>(connection),
                None => scoped
                    .filter(tasks::parent_id.is_null())
                    .select(max(tasks::position))
                    .first::<Option<i32>>(connection),
            };
            result.map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn set_position(&self, id: TaskId, position: i32) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(id.into_inner()))
                .set(tasks::position.eq(position))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_for_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project.into_inner()))
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project().into_inner(),
        parent_id: task.parent().map(TaskId::into_inner),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status_id: task.status().map(StatusId::into_inner),
        milestone_id: task.milestone().map(MilestoneId::into_inner),
        assignee_id: task.assignee().map(UserId::into_inner),
        creator_id: task.creator().into_inner(),
        priority: task.priority().as_str().to_owned(),
        estimated_hours: task.estimated_hours().map(Hours::value),
        actual_hours: task.actual_hours().map(Hours::value),
        start_date: task.start_date(),
        due_date: task.due_date(),
        position: task.position(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        parent_id: task.parent().map(TaskId::into_inner),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status_id: task.status().map(StatusId::into_inner),
        milestone_id: task.milestone().map(MilestoneId::into_inner),
        assignee_id: task.assignee().map(UserId::into_inner),
        priority: task.priority().as_str().to_owned(),
        estimated_hours: task.estimated_hours().map(Hours::value),
        actual_hours: task.actual_hours().map(Hours::value),
        start_date: task.start_date(),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let estimated_hours = row
        .estimated_hours
        .map(Hours::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let actual_hours = row
        .actual_hours
        .map(Hours::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project: ProjectId::from_uuid(row.project_id),
        parent: row.parent_id.map(TaskId::from_uuid),
        title,
        description: row.description,
        status: row.status_id.map(StatusId::from_uuid),
        milestone: row.milestone_id.map(MilestoneId::from_uuid),
        assignee: row.assignee_id.map(UserId::from_uuid),
        creator: UserId::from_uuid(row.creator_id),
        priority,
        estimated_hours,
        actual_hours,
        start_date: row.start_date,
        due_date: row.due_date,
        position: row.position,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}
