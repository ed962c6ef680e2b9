// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseNotifier)

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::common::UserId;
use crate::domains::notifications::OutgoingNotification;

// =============================================================================
// Notification Sink Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Record a notification for its recipient and push it to any live connection.
    async fn notify(&self, notification: OutgoingNotification) -> Result<()>;
}

// =============================================================================
// Connection Registry Trait (Infrastructure - who is reachable right now)
// =============================================================================

/// Registry of live client connections, keyed by user.
///
/// One instance is owned by the server and injected where needed. A shared,
/// pub/sub-backed implementation can replace the in-process one for
/// multi-instance deployments.
#[async_trait]
pub trait BaseConnectionRegistry: Send + Sync {
    /// Open a connection for `user_id`; events sent to the user arrive on the receiver.
    async fn register(&self, user_id: UserId) -> broadcast::Receiver<serde_json::Value>;

    /// Drop bookkeeping for `user_id` once none of its connections remain.
    async fn unregister(&self, user_id: UserId);

    /// Number of open connections for `user_id`.
    async fn connection_count(&self, user_id: UserId) -> usize;

    async fn is_online(&self, user_id: UserId) -> bool {
        self.connection_count(user_id).await > 0
    }

    /// Push an event to every connection of `user_id`. Returns how many received it.
    async fn send_to_user(&self, user_id: UserId, event: serde_json::Value) -> usize;
}
