//! `PostgreSQL` repository implementation for attachment records.

use super::{
    ActivityPgPool,
    models::{AttachmentRow, NewAttachmentRow},
    schema::attachments,
};
use crate::activity::domain::{
    Attachment, AttachmentId, AttachmentOwner, PersistedAttachmentData,
};
use crate::activity::ports::{
    AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult,
};
use crate::identity::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed attachment record repository.
#[derive(Debug, Clone)]
pub struct PostgresAttachmentRepository {
    pool: ActivityPgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ActivityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AttachmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AttachmentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AttachmentRepositoryError::persistence)?
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let new_row = NewAttachmentRow {
            id: attachment.id().into_inner(),
            owner_kind: attachment.owner().kind_str().to_owned(),
            owner_id: attachment.owner().owner_uuid(),
            user_id: attachment.uploader().into_inner(),
            file_name: attachment.file_name().to_owned(),
            storage_path: attachment.storage_path().to_owned(),
            byte_size: attachment.byte_size(),
            mime_type: attachment.mime_type().to_owned(),
            created_at: attachment.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(attachments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>> {
        self.run_blocking(move |connection| {
            let row = attachments::table
                .find(id.into_inner())
                .select(AttachmentRow::as_select())
                .first::<AttachmentRow>(connection)
                .optional()
                .map_err(AttachmentRepositoryError::persistence)?;
            row.map(row_to_attachment).transpose()
        })
        .await
    }

    async fn list_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            let rows = attachments::table
                .filter(attachments::owner_kind.eq(owner.kind_str()))
                .filter(attachments::owner_id.eq(owner.owner_uuid()))
                .order(attachments::created_at.asc())
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_attachment).collect()
        })
        .await
    }

    async fn delete(&self, id: AttachmentId) -> AttachmentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(attachments::table.find(id.into_inner()))
                .execute(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(AttachmentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_for_owner(
        &self,
        owner: AttachmentOwner,
    ) -> AttachmentRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            let rows = diesel::delete(
                attachments::table
                    .filter(attachments::owner_kind.eq(owner.kind_str()))
                    .filter(attachments::owner_id.eq(owner.owner_uuid())),
            )
            .returning(AttachmentRow::as_returning())
            .get_results::<AttachmentRow>(connection)
            .map_err(AttachmentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_attachment).collect()
        })
        .await
    }
}

fn row_to_attachment(row: AttachmentRow) -> AttachmentRepositoryResult<Attachment> {
    let owner = AttachmentOwner::from_parts(&row.owner_kind, row.owner_id)
        .map_err(AttachmentRepositoryError::persistence)?;
    Ok(Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(row.id),
        owner,
        uploader: UserId::from_uuid(row.user_id),
        file_name: row.file_name,
        storage_path: row.storage_path,
        byte_size: row.byte_size,
        mime_type: row.mime_type,
        created_at: row.created_at,
    }))
}
