//! In-memory adapters for invitation persistence tests.

mod invitation;

pub use invitation::InMemoryInvitationRepository;
