//! `PostgreSQL` repository implementation for audit records.

use super::{
    ActivityPgPool,
    models::{ActivityRow, NewActivityRow},
    schema::task_activities,
};
use crate::activity::domain::{ActivityAction, ActivityId, PersistedActivityData, TaskActivity};
use crate::activity::ports::{
    ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult,
};
use crate::identity::UserId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed audit record repository.
///
/// The `seq` column is a `BIGSERIAL` used purely as an ordering tiebreak for
/// rows sharing a timestamp; it never leaves the adapter.
#[derive(Debug, Clone)]
pub struct PostgresActivityRepository {
    pool: ActivityPgPool,
}

impl PostgresActivityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActivityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityRepositoryError::persistence)?
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn append(&self, activity: &TaskActivity) -> ActivityRepositoryResult<()> {
        let new_row = to_new_row(activity);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_activities::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task: TaskId) -> ActivityRepositoryResult<Vec<TaskActivity>> {
        self.run_blocking(move |connection| {
            let rows = task_activities::table
                .filter(task_activities::task_id.eq(task.into_inner()))
                .order((task_activities::created_at.asc(), task_activities::seq.asc()))
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_activity).collect())
        })
        .await
    }

    async fn list_for_tasks_desc(
        &self,
        tasks: &[TaskId],
        page: u32,
        per_page: u32,
    ) -> ActivityRepositoryResult<(Vec<TaskActivity>, u64)> {
        let ids: Vec<uuid::Uuid> = tasks.iter().copied().map(TaskId::into_inner).collect();
        self.run_blocking(move |connection| {
            let total = task_activities::table
                .filter(task_activities::task_id.eq_any(&ids))
                .count()
                .get_result::<i64>(connection)
                .map_err(ActivityRepositoryError::persistence)?;

            let offset = i64::from(page.max(1) - 1).saturating_mul(i64::from(per_page));
            let rows = task_activities::table
                .filter(task_activities::task_id.eq_any(&ids))
                .order((
                    task_activities::created_at.desc(),
                    task_activities::seq.desc(),
                ))
                .offset(offset)
                .limit(i64::from(per_page))
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityRepositoryError::persistence)?;

            let records = rows.into_iter().map(row_to_activity).collect();
            Ok((records, u64::try_from(total).unwrap_or(0)))
        })
        .await
    }

    async fn delete_for_task(&self, task: TaskId) -> ActivityRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                task_activities::table.filter(task_activities::task_id.eq(task.into_inner())),
            )
            .execute(connection)
            .map_err(ActivityRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_new_row(activity: &TaskActivity) -> NewActivityRow {
    NewActivityRow {
        id: activity.id().into_inner(),
        task_id: activity.task().into_inner(),
        user_id: activity.user().map(UserId::into_inner),
        action: activity.action().label(),
        old_value: activity.old_value().clone(),
        new_value: activity.new_value().clone(),
        created_at: activity.created_at(),
    }
}

fn row_to_activity(row: ActivityRow) -> TaskActivity {
    TaskActivity::from_persisted(PersistedActivityData {
        id: ActivityId::from_uuid(row.id),
        task: TaskId::from_uuid(row.task_id),
        user: row.user_id.map(UserId::from_uuid),
        action: ActivityAction::from_label(&row.action),
        old_value: row.old_value,
        new_value: row.new_value,
        created_at: row.created_at,
    })
}
