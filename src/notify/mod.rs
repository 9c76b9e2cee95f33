//! Best-effort notification dispatch.
//!
//! The notifier is an external collaborator: the core hands it a fully
//! rendered [`Notification`] and never blocks or retries on its failure.
//! Callers log dispatch errors and continue; a failed notification must not
//! fail the operation that produced it.

mod memory;
mod notification;
mod port;

pub use memory::RecordingNotifier;
pub use notification::Notification;
pub use port::{Notifier, NotifyError, NotifyResult};

#[cfg(test)]
mod tests;
