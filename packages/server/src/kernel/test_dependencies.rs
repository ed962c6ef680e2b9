// Test doubles for kernel infrastructure traits

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domains::notifications::{NotificationKind, OutgoingNotification};
use crate::kernel::BaseNotifier;

// =============================================================================
// Mock Notifier
// =============================================================================

/// Records notifications instead of delivering them. Can be told to fail.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<OutgoingNotification>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Get all notifications that were sent
    pub fn sent(&self) -> Vec<OutgoingNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Notifications of `kind` sent so far
    pub fn sent_of_kind(&self, kind: NotificationKind) -> Vec<OutgoingNotification> {
        self.sent()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn notify(&self, notification: OutgoingNotification) -> Result<()> {
        if self.fail {
            anyhow::bail!("mock notifier configured to fail");
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}
