use serde::{Deserialize, Serialize};

use crate::domains::notifications::models::Notification;

/// Wire form of a notification, as pushed to live connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub id: String,
    pub match_id: Option<String>,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationData {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            match_id: notification.match_id.map(|id| id.to_string()),
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            is_read: notification.is_read,
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}
