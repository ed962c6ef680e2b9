//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to domain actions and background tasks.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::domains::notifications::OutgoingNotification;
use crate::kernel::{BaseConnectionRegistry, BaseNotifier};

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub notifier: Arc<dyn BaseNotifier>,
    /// Live connections, for real-time pushes
    pub connections: Arc<dyn BaseConnectionRegistry>,
    pub jwt_service: Arc<JwtService>,
    /// Default lifetime of a new pending match
    pub match_expiry: Duration,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        notifier: Arc<dyn BaseNotifier>,
        connections: Arc<dyn BaseConnectionRegistry>,
        jwt_service: Arc<JwtService>,
        match_expiry: Duration,
    ) -> Self {
        Self {
            db_pool,
            notifier,
            connections,
            jwt_service,
            match_expiry,
        }
    }

    /// Best-effort delivery. Failures are logged and never reach the caller.
    pub async fn deliver(&self, notification: OutgoingNotification) {
        let recipient = notification.recipient_id;
        let kind = notification.kind.as_str();
        if let Err(e) = self.notifier.notify(notification).await {
            tracing::warn!(recipient = %recipient, kind, error = %e, "Notification delivery failed");
        }
    }
}
