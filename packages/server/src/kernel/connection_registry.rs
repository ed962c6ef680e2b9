//! In-process connection registry.
//!
//! One broadcast channel per connected user; each open connection (SSE
//! stream) holds a receiver. Payloads are `serde_json::Value`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::common::UserId;
use crate::kernel::BaseConnectionRegistry;

/// Thread-safe, cloneable registry backed by a map of broadcast senders.
#[derive(Clone)]
pub struct InMemoryConnectionRegistry {
    channels: Arc<RwLock<HashMap<UserId, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl InMemoryConnectionRegistry {
    /// Registry with the default capacity (64 buffered events per user).
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, user_id: UserId) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tracing::debug!(
            user_id = %user_id,
            connections = tx.receiver_count() + 1,
            "Connection registered"
        );
        tx.subscribe()
    }

    async fn unregister(&self, user_id: UserId) {
        let mut channels = self.channels.write().await;
        if channels
            .get(&user_id)
            .is_some_and(|tx| tx.receiver_count() == 0)
        {
            channels.remove(&user_id);
            tracing::debug!(user_id = %user_id, "Last connection closed");
        }
    }

    async fn connection_count(&self, user_id: UserId) -> usize {
        self.channels
            .read()
            .await
            .get(&user_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    async fn send_to_user(&self, user_id: UserId, event: serde_json::Value) -> usize {
        let channels = self.channels.read().await;
        match channels.get(&user_id) {
            // Err means every receiver is gone
            Some(tx) => tx.send(event).unwrap_or(0),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_reaches_registered_user() {
        let registry = InMemoryConnectionRegistry::new();
        let user = UserId::new();
        let mut rx = registry.register(user).await;

        let event = json!({"type": "notification", "title": "hi"});
        assert_eq!(registry.send_to_user(user, event.clone()).await, 1);
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_send_to_offline_user_is_noop() {
        let registry = InMemoryConnectionRegistry::new();
        assert_eq!(registry.send_to_user(UserId::new(), json!({})).await, 0);
    }

    #[tokio::test]
    async fn test_events_are_scoped_to_their_user() {
        let registry = InMemoryConnectionRegistry::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let mut alice_rx = registry.register(alice).await;
        let _bob_rx = registry.register(bob).await;

        registry.send_to_user(bob, json!({"for": "bob"})).await;
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_multiple_connections_per_user() {
        let registry = InMemoryConnectionRegistry::new();
        let user = UserId::new();
        let mut rx1 = registry.register(user).await;
        let mut rx2 = registry.register(user).await;

        assert_eq!(registry.connection_count(user).await, 2);
        assert_eq!(registry.send_to_user(user, json!({"n": 1})).await, 2);
        assert_eq!(rx1.recv().await.unwrap(), json!({"n": 1}));
        assert_eq!(rx2.recv().await.unwrap(), json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_unregister_after_last_connection_drops() {
        let registry = InMemoryConnectionRegistry::new();
        let user = UserId::new();
        let rx1 = registry.register(user).await;
        let rx2 = registry.register(user).await;

        drop(rx1);
        registry.unregister(user).await;
        assert!(registry.is_online(user).await);

        drop(rx2);
        registry.unregister(user).await;
        assert!(!registry.is_online(user).await);
        assert!(registry.channels.read().await.is_empty());
    }
}
