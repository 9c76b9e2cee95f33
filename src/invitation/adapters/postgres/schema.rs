//! Diesel schema for invitation persistence.

diesel::table! {
    /// Pending organization invitations, unique per organization and email.
    invitations (id) {
        /// Invitation identifier.
        id -> Uuid,
        /// Inviting organization identifier.
        organization_id -> Uuid,
        /// Invited email address.
        #[max_length = 255]
        email -> Varchar,
        /// Redemption token.
        #[max_length = 32]
        token -> Varchar,
        /// Membership role granted on redemption.
        #[max_length = 50]
        role -> Varchar,
        /// Optional project attached on redemption.
        project_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
