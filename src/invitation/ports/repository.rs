//! Invitation repository port.

use crate::identity::OrganizationId;
use crate::invitation::domain::{Invitation, InvitationId, InviteToken};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for invitation repository operations.
pub type InvitationRepositoryResult<T> = Result<T, InvitationRepositoryError>;

/// Errors returned by invitation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InvitationRepositoryError {
    /// The invitation was not found.
    #[error("invitation not found: {0}")]
    NotFound(InvitationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InvitationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Invitation persistence contract.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Inserts or replaces the invitation keyed on `(organization, email)`,
    /// atomically, and returns the stored row. When a row for the key
    /// already exists, its identity and creation timestamp are preserved
    /// while the token, role, project, and update timestamp come from the
    /// given invitation.
    async fn upsert(&self, invitation: &Invitation) -> InvitationRepositoryResult<Invitation>;

    /// Finds the live invitation carrying the token, if any.
    async fn find_by_token(
        &self,
        token: &InviteToken,
    ) -> InvitationRepositoryResult<Option<Invitation>>;

    /// Finds the live invitation for the `(organization, email)` key.
    async fn find_by_key(
        &self,
        organization: OrganizationId,
        email: &str,
    ) -> InvitationRepositoryResult<Option<Invitation>>;

    /// Removes an invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// does not exist.
    async fn delete(&self, id: InvitationId) -> InvitationRepositoryResult<()>;
}
