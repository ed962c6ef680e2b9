//! Postgres-backed notification sink with live push.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::notifications::{Notification, NotificationData, OutgoingNotification};
use crate::kernel::{BaseConnectionRegistry, BaseNotifier};

/// Stores each notification, then pushes it to the recipient's open connections.
pub struct NotificationService {
    pool: PgPool,
    connections: Arc<dyn BaseConnectionRegistry>,
}

impl NotificationService {
    pub fn new(pool: PgPool, connections: Arc<dyn BaseConnectionRegistry>) -> Self {
        Self { pool, connections }
    }
}

#[async_trait]
impl BaseNotifier for NotificationService {
    async fn notify(&self, notification: OutgoingNotification) -> Result<()> {
        let record = Notification::create(&notification, &self.pool)
            .await
            .context("Failed to store notification")?;
        let recipient = record.recipient_id;

        let mut event = serde_json::to_value(NotificationData::from(record))?;
        event["type"] = serde_json::Value::from("notification");

        let delivered = self.connections.send_to_user(recipient, event).await;
        tracing::debug!(
            recipient = %recipient,
            kind = notification.kind.as_str(),
            delivered,
            "Notification recorded"
        );
        Ok(())
    }
}
