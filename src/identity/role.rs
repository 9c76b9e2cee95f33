//! Membership roles granted at the organization or project level.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role attached to an organization or project membership row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative rights over the scope.
    Admin,
    /// Regular collaborator.
    #[default]
    Member,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown membership role: {0}")]
pub struct ParseRoleError(pub String);
