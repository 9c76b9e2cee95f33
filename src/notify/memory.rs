//! Recording notifier for tests.

use super::{Notification, Notifier, NotifyError, NotifyResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory notifier that records every dispatched notification.
///
/// Construct with [`RecordingNotifier::failing`] to simulate an unreachable
/// delivery channel and assert best-effort semantics.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every dispatch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that rejects every dispatch.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    /// Returns a snapshot of every recorded notification, in dispatch order.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.read().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dispatch(&self, notification: Notification) -> NotifyResult<()> {
        if self.fail {
            return Err(NotifyError::dispatch(std::io::Error::other(
                "delivery channel unavailable",
            )));
        }
        self.sent
            .write()
            .map_err(|err| NotifyError::dispatch(std::io::Error::other(err.to_string())))?
            .push(notification);
        Ok(())
    }
}
