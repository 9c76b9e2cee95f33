//! Single-use invitation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Length of a minted token in characters.
const TOKEN_LEN: usize = 32;

/// Error returned when parsing a malformed invitation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid invitation token: expected {TOKEN_LEN} hex characters")]
pub struct ParseTokenError;

/// A 32-character opaque invitation token.
///
/// Tokens address exactly one live invitation; overwriting the invitation
/// mints a fresh token and silently invalidates the old one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    /// Mints a fresh random token.
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses a token from client input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTokenError`] when the value is not exactly 32
    /// hexadecimal characters.
    pub fn parse(value: &str) -> Result<Self, ParseTokenError> {
        if value.len() != TOKEN_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseTokenError);
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
