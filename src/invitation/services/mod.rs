//! Orchestration services for the invitation workflow.

mod workflow;

pub use workflow::{
    InvitationError, InvitationResult, InvitationService, InvitationServiceDeps, InviteOutcome,
};
