//! Port contracts for the external identity and membership store.

use super::{OrganizationId, ProjectId, Role, StatusId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity store operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors returned by identity store implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Identity-store round-trip failure.
    #[error("identity store error: {0}")]
    Store(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a store-level error.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Arc::new(err))
    }
}

/// Read-only user lookup contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier. Returns `None` when the user does not
    /// exist (for example, after deletion).
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>>;

    /// Finds a user by exact email address.
    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<User>>;

    /// Finds every user whose display name exactly matches one of the given
    /// names. Used for `@Name` mention resolution.
    async fn find_by_names(&self, names: &[String]) -> DirectoryResult<Vec<User>>;
}

/// Display-name lookup for per-project task statuses.
#[async_trait]
pub trait StatusDirectory: Send + Sync {
    /// Returns the status display name, or `None` for a dangling identifier.
    async fn status_name(&self, id: StatusId) -> DirectoryResult<Option<String>>;
}

/// Membership read/write contract.
///
/// The core writes membership rows only during invitation redemption and
/// direct project adds; everything else is a read.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Returns the organization display name, or `None` when unknown.
    async fn organization_name(&self, org: OrganizationId) -> DirectoryResult<Option<String>>;

    /// Checks whether the user holds an organization membership.
    async fn is_organization_member(
        &self,
        org: OrganizationId,
        user: UserId,
    ) -> DirectoryResult<bool>;

    /// Attaches the user to the organization with the given role.
    async fn attach_organization_member(
        &self,
        org: OrganizationId,
        user: UserId,
        role: Role,
    ) -> DirectoryResult<()>;

    /// Checks whether the user holds a project membership.
    async fn is_project_member(&self, project: ProjectId, user: UserId) -> DirectoryResult<bool>;

    /// Attaches the user to the project with the given role.
    async fn attach_project_member(
        &self,
        project: ProjectId,
        user: UserId,
        role: Role,
    ) -> DirectoryResult<()>;

    /// Returns the organization a project belongs to, or `None` when the
    /// project does not exist.
    async fn project_organization(
        &self,
        project: ProjectId,
    ) -> DirectoryResult<Option<OrganizationId>>;

    /// Returns the project display name, or `None` when unknown.
    async fn project_name(&self, project: ProjectId) -> DirectoryResult<Option<String>>;
}
