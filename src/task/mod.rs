//! Change-tracked task mutation and sibling reordering.
//!
//! The task mutation engine applies partial updates to a task, derives a
//! minimal human-readable change set, persists it as an append-only audit
//! trail, and notifies a newly assigned user. The reorder service maintains
//! the dense per-sibling-group `position` ordering. The module follows
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
