//! Notifier port contract.

use super::Notification;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors surfaced by notification rendering and dispatch.
///
/// These are always treated as best-effort by callers: logged, never
/// propagated to the operation that triggered the notification.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// Message template rendering failed.
    #[error("notification template rendering failed: {0}")]
    Render(Arc<minijinja::Error>),

    /// The downstream delivery channel reported a failure.
    #[error("notification dispatch failed: {0}")]
    Dispatch(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifyError {
    /// Wraps a delivery-channel error.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Arc::new(err))
    }
}

impl From<minijinja::Error> for NotifyError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(Arc::new(err))
    }
}

/// Asynchronous fire-and-forget notification dispatch.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a notification to its recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when rendering or delivery fails. Callers
    /// must swallow the error after logging it.
    async fn dispatch(&self, notification: Notification) -> NotifyResult<()>;
}
