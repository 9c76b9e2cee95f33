//! Identifier newtypes shared across the collaboration core.

/// Defines a UUID-backed identifier newtype with the standard constructors
/// and trait implementations used throughout the crate.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $entity, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $entity, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<::uuid::Uuid> for $name {
            fn as_ref(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use uuid_id;

uuid_id!(
    /// Unique identifier for a user account.
    UserId,
    "user"
);

uuid_id!(
    /// Unique identifier for an organization.
    OrganizationId,
    "organization"
);

uuid_id!(
    /// Unique identifier for a project within an organization.
    ProjectId,
    "project"
);

uuid_id!(
    /// Unique identifier for a per-project task status.
    StatusId,
    "status"
);

uuid_id!(
    /// Unique identifier for a project milestone.
    MilestoneId,
    "milestone"
);
