//! Port contracts for invitation persistence.

mod repository;

pub use repository::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult};
