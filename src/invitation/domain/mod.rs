//! Domain types for the invitation workflow.

mod invitation;
mod token;

pub use invitation::{Invitation, InvitationId, PersistedInvitationData};
pub use token::{InviteToken, ParseTokenError};
