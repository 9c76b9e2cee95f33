//! Shared identifiers and identity/membership collaborator ports.
//!
//! The identity and membership store is an external collaborator: the core
//! consumes it for existence, display-name, and membership checks only, and
//! writes membership rows solely as a side effect of invitation redemption.
//! Everything here is therefore either a plain identifier newtype or a port
//! contract with an in-memory reference adapter.

pub mod ids;
pub mod memory;
pub mod ports;
mod role;
mod user;

pub use ids::{MilestoneId, OrganizationId, ProjectId, StatusId, UserId};
pub use memory::InMemoryDirectory;
pub use ports::{
    DirectoryError, DirectoryResult, MembershipStore, StatusDirectory, UserDirectory,
};
pub use role::{ParseRoleError, Role};
pub use user::User;
