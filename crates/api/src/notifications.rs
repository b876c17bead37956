//! Per-user notification endpoints.

use chrono::NaiveDateTime;
use nearsplit_session::{Result, SessionTransport};
use serde::Deserialize;

/// A notification as served by the backend, newest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Notification id.
    pub id: i64,
    /// Receiving user's id.
    pub user_id: i64,
    /// Notification kind (e.g. `JOIN_REQUEST`, `JOIN_APPROVED`).
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Id of the entity this notification points at, if any.
    pub reference_id: Option<i64>,
    /// Whether the user has read it.
    pub is_read: bool,
    /// Creation time.
    pub created_at: NaiveDateTime,
}

/// `/notifications` endpoints.
pub struct NotificationsApi<'a> {
    transport: &'a SessionTransport,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(transport: &'a SessionTransport) -> Self {
        Self { transport }
    }

    /// List the logged-in user's notifications, newest first.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn list(&self) -> Result<Vec<NotificationResponse>> {
        self.transport.get("/notifications").await
    }

    /// Count unread notifications.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn unread_count(&self) -> Result<u64> {
        self.transport.get("/notifications/unread-count").await
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn mark_read(&self, notification_id: i64) -> Result<()> {
        self.transport.patch_empty(&format!("/notifications/{notification_id}/read")).await
    }

    /// Mark every notification as read.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn mark_all_read(&self) -> Result<()> {
        self.transport.patch_empty("/notifications/read-all").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_decodes_type_field() {
        let body = serde_json::json!({
            "id": 12,
            "userId": 3,
            "type": "JOIN_APPROVED",
            "title": "Join approved",
            "message": "Your application to Rice 20kg split was approved.",
            "referenceId": 10,
            "isRead": false,
            "createdAt": "2025-06-22T08:15:00"
        });

        let notification: NotificationResponse = serde_json::from_value(body).expect("decodes");
        assert_eq!(notification.notification_type, "JOIN_APPROVED");
        assert_eq!(notification.reference_id, Some(10));
        assert!(!notification.is_read);
    }
}
