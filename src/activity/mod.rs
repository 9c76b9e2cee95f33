//! Comments, attachments, and the aggregated activity feed.
//!
//! Audit events, comments, and file uploads are kept as three independently
//! typed record sets rather than one unified event table; the feed service
//! merges them at read time into a single chronological stream. Posting a
//! comment is the one compound write path here: it creates the comment row,
//! mirrors it into the audit trail, resolves `@Name` mentions, and stores
//! attached files. The module follows hexagonal architecture:
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
