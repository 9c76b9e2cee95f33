//! `PostgreSQL` repository implementation for invitation storage.

use super::{
    models::{InvitationRow, NewInvitationRow},
    schema::invitations,
};
use crate::identity::{OrganizationId, ProjectId, Role};
use crate::invitation::{
    domain::{Invitation, InvitationId, InviteToken, PersistedInvitationData},
    ports::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by invitation adapters.
pub type InvitationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed invitation repository.
///
/// Upserts ride the unique index on `(organization_id, email)`; the
/// `ON CONFLICT` clause keeps the stored row's identity and creation
/// timestamp while refreshing the grant.
#[derive(Debug, Clone)]
pub struct PostgresInvitationRepository {
    pool: InvitationPgPool,
}

impl PostgresInvitationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InvitationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvitationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvitationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InvitationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InvitationRepositoryError::persistence)?
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn upsert(&self, invitation: &Invitation) -> InvitationRepositoryResult<Invitation> {
        let new_row = NewInvitationRow {
            id: invitation.id().into_inner(),
            organization_id: invitation.organization().into_inner(),
            email: invitation.email().to_owned(),
            token: invitation.token().as_str().to_owned(),
            role: invitation.role().as_str().to_owned(),
            project_id: invitation.project().map(ProjectId::into_inner),
            created_at: invitation.created_at(),
            updated_at: invitation.updated_at(),
        };
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(invitations::table)
                .values(&new_row)
                .on_conflict((invitations::organization_id, invitations::email))
                .do_update()
                .set((
                    invitations::token.eq(excluded(invitations::token)),
                    invitations::role.eq(excluded(invitations::role)),
                    invitations::project_id.eq(excluded(invitations::project_id)),
                    invitations::updated_at.eq(excluded(invitations::updated_at)),
                ))
                .returning(InvitationRow::as_returning())
                .get_result::<InvitationRow>(connection)
                .map_err(InvitationRepositoryError::persistence)?;
            row_to_invitation(row)
        })
        .await
    }

    async fn find_by_token(
        &self,
        token: &InviteToken,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        let needle = token.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = invitations::table
                .filter(invitations::token.eq(&needle))
                .select(InvitationRow::as_select())
                .first::<InvitationRow>(connection)
                .optional()
                .map_err(InvitationRepositoryError::persistence)?;
            row.map(row_to_invitation).transpose()
        })
        .await
    }

    async fn find_by_key(
        &self,
        organization: OrganizationId,
        email: &str,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        let needle = email.to_owned();
        self.run_blocking(move |connection| {
            let row = invitations::table
                .filter(invitations::organization_id.eq(organization.into_inner()))
                .filter(invitations::email.eq(&needle))
                .select(InvitationRow::as_select())
                .first::<InvitationRow>(connection)
                .optional()
                .map_err(InvitationRepositoryError::persistence)?;
            row.map(row_to_invitation).transpose()
        })
        .await
    }

    async fn delete(&self, id: InvitationId) -> InvitationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(invitations::table.find(id.into_inner()))
                .execute(connection)
                .map_err(InvitationRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(InvitationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_invitation(row: InvitationRow) -> InvitationRepositoryResult<Invitation> {
    let token =
        InviteToken::parse(&row.token).map_err(InvitationRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(InvitationRepositoryError::persistence)?;
    Ok(Invitation::from_persisted(PersistedInvitationData {
        id: InvitationId::from_uuid(row.id),
        organization: OrganizationId::from_uuid(row.organization_id),
        email: row.email,
        token,
        role,
        project: row.project_id.map(ProjectId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
