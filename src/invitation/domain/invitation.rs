//! Invitation aggregate.

use super::InviteToken;
use crate::identity::ids::uuid_id;
use crate::identity::{OrganizationId, ProjectId, Role};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

uuid_id!(
    /// Unique identifier for an invitation record.
    InvitationId,
    "invitation"
);

/// A pending organization invitation.
///
/// One live invitation exists per `(organization, email)` pair. Re-inviting
/// replaces the grant in place: token, role, and project are refreshed while
/// the row identity and creation timestamp survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    organization: OrganizationId,
    email: String,
    token: InviteToken,
    role: Role,
    project: Option<ProjectId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvitationData {
    /// Persisted invitation identifier.
    pub id: InvitationId,
    /// Persisted inviting organization.
    pub organization: OrganizationId,
    /// Persisted invited email address.
    pub email: String,
    /// Persisted redemption token.
    pub token: InviteToken,
    /// Persisted membership role granted on redemption.
    pub role: Role,
    /// Persisted optional project attached on redemption.
    pub project: Option<ProjectId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates a new invitation with a freshly minted token.
    #[must_use]
    pub fn new(
        organization: OrganizationId,
        email: impl Into<String>,
        role: Role,
        project: Option<ProjectId>,
        clock: &dyn Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: InvitationId::new(),
            organization,
            email: email.into(),
            token: InviteToken::mint(),
            role,
            project,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an invitation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvitationData) -> Self {
        Self {
            id: data.id,
            organization: data.organization,
            email: data.email,
            token: data.token,
            role: data.role,
            project: data.project,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> InvitationId {
        self.id
    }

    /// Returns the inviting organization.
    #[must_use]
    pub const fn organization(&self) -> OrganizationId {
        self.organization
    }

    /// Returns the invited email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the redemption token.
    #[must_use]
    pub const fn token(&self) -> &InviteToken {
        &self.token
    }

    /// Returns the membership role granted on redemption.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the project attached on redemption, if any.
    #[must_use]
    pub const fn project(&self) -> Option<ProjectId> {
        self.project
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the grant in place: fresh token, new role and project,
    /// refreshed `updated_at`. Row identity and `created_at` are preserved,
    /// matching upsert semantics.
    pub fn replace_grant(&mut self, role: Role, project: Option<ProjectId>, clock: &dyn Clock) {
        self.token = InviteToken::mint();
        self.role = role;
        self.project = project;
        self.updated_at = clock.utc();
    }
}
