//! Organization invitations and membership redemption.
//!
//! An invitation is a single-use, token-addressed grant keyed on
//! `(organization, email)`: re-inviting the same address overwrites the row
//! and mints a fresh token, invalidating any previously mailed link.
//! Redemption attaches the accepting user to the organization (and
//! optionally one project) and deletes the row. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
