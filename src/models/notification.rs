use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "userId", alias = "user_id", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub message: String,
    #[serde(rename = "isRead", alias = "read", default)]
    pub is_read: bool,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl NotificationsEnvelope {
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}
