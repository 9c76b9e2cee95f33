//! Gantry: multi-tenant project and task collaboration core.
//!
//! This crate implements the collaboration and audit subsystem of a
//! project/task-tracking service: change-tracked task mutation with a
//! human-readable audit trail, a heterogeneous activity feed, position-based
//! task reordering, and a token-based invitation workflow with idempotent
//! membership semantics.
//!
//! # Architecture
//!
//! Gantry follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, blob store)
//!
//! Authentication, blob I/O mechanics, and outbound delivery live behind
//! ports; the crate owns the state-machine logic only.
//!
//! # Modules
//!
//! - [`identity`]: Shared identifiers and identity/membership ports
//! - [`notify`]: Best-effort notification dispatch and message rendering
//! - [`task`]: Change-tracked task mutation and sibling reordering
//! - [`activity`]: Comments, attachments, and the aggregated activity feed
//! - [`invitation`]: Single-use invitation tokens and membership grants

pub mod activity;
pub mod identity;
pub mod invitation;
pub mod notify;
pub mod task;
