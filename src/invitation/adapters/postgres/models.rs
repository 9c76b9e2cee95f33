//! Diesel row models for invitation persistence.

use super::schema::invitations;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for invitation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvitationRow {
    /// Invitation identifier.
    pub id: uuid::Uuid,
    /// Inviting organization identifier.
    pub organization_id: uuid::Uuid,
    /// Invited email address.
    pub email: String,
    /// Redemption token.
    pub token: String,
    /// Membership role granted on redemption.
    pub role: String,
    /// Optional project attached on redemption.
    pub project_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for invitation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invitations)]
pub struct NewInvitationRow {
    /// Invitation identifier.
    pub id: uuid::Uuid,
    /// Inviting organization identifier.
    pub organization_id: uuid::Uuid,
    /// Invited email address.
    pub email: String,
    /// Redemption token.
    pub token: String,
    /// Membership role granted on redemption.
    pub role: String,
    /// Optional project attached on redemption.
    pub project_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
