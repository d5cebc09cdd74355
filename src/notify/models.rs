//! Notification data models

use crate::workflow::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    Email,
    InApp,
    Push,
    Rss,
    Platform,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "EMAIL",
            NotificationChannel::InApp => "IN_APP",
            NotificationChannel::Push => "PUSH",
            NotificationChannel::Rss => "RSS",
            NotificationChannel::Platform => "PLATFORM",
        }
    }
}

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationCategory {
    Content,
    Community,
    Platform,
    Emergency,
}

/// A request handed to the sink. `recipient: None` means broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub recipient: Option<Uuid>,
    pub channel: NotificationChannel,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub priority: Priority,
}

impl NotificationRequest {
    /// Content event addressed to one user (in-app, medium priority)
    pub fn content(recipient: Uuid, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient),
            channel: NotificationChannel::InApp,
            category: NotificationCategory::Content,
            title: title.into(),
            message: message.into(),
            priority: Priority::Medium,
        }
    }

    /// Community/moderation event addressed to one user (email)
    pub fn community(
        recipient: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            recipient: Some(recipient),
            channel: NotificationChannel::Email,
            category: NotificationCategory::Community,
            title: title.into(),
            message: message.into(),
            priority,
        }
    }

    /// Platform-wide announcement (broadcast)
    pub fn platform(title: impl Into<String>, message: impl Into<String>, priority: Priority) -> Self {
        Self {
            recipient: None,
            channel: NotificationChannel::Platform,
            category: NotificationCategory::Platform,
            title: title.into(),
            message: message.into(),
            priority,
        }
    }
}

/// A stored notification. Lifecycle: created → delivered → optionally read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub recipient: Option<Uuid>,
    pub channel: NotificationChannel,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub is_read: bool,
    pub is_delivered: bool,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn from_request(request: NotificationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: request.recipient,
            channel: request.channel,
            category: request.category,
            title: request.title,
            message: request.message,
            priority: request.priority,
            is_read: false,
            is_delivered: false,
            created_at: Utc::now(),
            delivered_at: None,
            read_at: None,
        }
    }
}

/// Aggregate view of the notification log
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAnalytics {
    /// Delivered / total, as a percentage (0 when the log is empty)
    pub delivery_rate: f64,
    /// Read / total, as a percentage (0 when the log is empty)
    pub read_rate: f64,
    pub by_channel: std::collections::HashMap<String, usize>,
    pub by_priority: std::collections::HashMap<String, usize>,
}
