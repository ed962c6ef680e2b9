use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MatchId, NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MatchCreated,
    MatchAccepted,
    MatchRejected,
    MatchExpired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::MatchCreated => "match_created",
            NotificationKind::MatchAccepted => "match_accepted",
            NotificationKind::MatchRejected => "match_rejected",
            NotificationKind::MatchExpired => "match_expired",
        }
    }
}

/// A notification on its way to a recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingNotification {
    pub recipient_id: UserId,
    pub match_id: Option<MatchId>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

/// Notification record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub match_id: Option<MatchId>,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub async fn create(notification: &OutgoingNotification, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notifications (id, recipient_id, match_id, kind, title, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(NotificationId::new())
        .bind(notification.recipient_id)
        .bind(notification.match_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.body)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Newest first.
    pub async fn find_for_recipient(recipient_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications WHERE recipient_id = $1 ORDER BY created_at DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
