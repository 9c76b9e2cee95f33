//! User record as exposed by the identity store.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user as read from the external identity store.
///
/// The core never creates or updates users; it reads them for display-name
/// resolution, mention lookup, and invitation redemption checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name, used verbatim in audit rows and mention matching.
    pub name: String,
    /// Contact address, absent for accounts without a deliverable email.
    pub email: Option<String>,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }
}
