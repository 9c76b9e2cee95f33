//! `PostgreSQL` repository implementation for comments.

use super::{
    ActivityPgPool,
    models::{CommentRow, NewCommentRow},
    schema::comments,
};
use crate::activity::domain::{Comment, CommentId, PersistedCommentData};
use crate::activity::ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
use crate::identity::UserId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: ActivityPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActivityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let new_row = NewCommentRow {
            id: comment.id().into_inner(),
            task_id: comment.task().into_inner(),
            user_id: comment.author().into_inner(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .find(id.into_inner())
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?;
            Ok(row.map(row_to_comment))
        })
        .await
    }

    async fn list_for_task(&self, task: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task.into_inner()))
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_comment).collect())
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(comments::table.find(id.into_inner()))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_for_task(&self, task: TaskId) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(comments::table.filter(comments::task_id.eq(task.into_inner())))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task: TaskId::from_uuid(row.task_id),
        author: UserId::from_uuid(row.user_id),
        content: row.content,
        created_at: row.created_at,
    })
}
