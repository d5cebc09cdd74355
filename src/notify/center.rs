//! In-memory notification center
//!
//! Records every dispatched notification and serves as the in-app feed.
//! Real delivery channels (email, push, RSS) are external collaborators;
//! from the core's perspective a recorded notification is delivered.

use crate::notify::models::{
    Notification, NotificationAnalytics, NotificationRequest,
};
use crate::notify::NotificationSink;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Default sink: append-only in-memory log. Uses a std `RwLock` because
/// `notify` is called synchronously from async contexts; the lock is never
/// held across an await point.
pub struct NotificationCenter {
    log: RwLock<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            log: RwLock::new(Vec::new()),
        }
    }

    /// All notifications visible to a user: their own plus broadcasts
    pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        log.iter()
            .filter(|n| n.recipient == Some(user_id) || n.recipient.is_none())
            .cloned()
            .collect()
    }

    /// Unread notifications for a user
    pub fn unread(&self, user_id: Uuid) -> Vec<Notification> {
        self.for_user(user_id)
            .into_iter()
            .filter(|n| !n.is_read)
            .collect()
    }

    /// Mark a notification read. Returns false when the id is unknown.
    pub fn mark_read(&self, notification_id: Uuid) -> bool {
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        match log.iter_mut().find(|n| n.id == notification_id) {
            Some(notification) => {
                notification.is_read = true;
                notification.read_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Total notifications recorded
    pub fn count(&self) -> usize {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        log.len()
    }

    /// Delivery/read rates and counts by channel and priority
    pub fn analytics(&self) -> NotificationAnalytics {
        let log = self.log.read().unwrap_or_else(PoisonError::into_inner);
        let total = log.len();

        let mut by_channel: HashMap<String, usize> = HashMap::new();
        let mut by_priority: HashMap<String, usize> = HashMap::new();
        let mut delivered = 0usize;
        let mut read = 0usize;

        for n in log.iter() {
            *by_channel.entry(n.channel.as_str().to_string()).or_insert(0) += 1;
            *by_priority
                .entry(n.priority.as_str().to_string())
                .or_insert(0) += 1;
            if n.is_delivered {
                delivered += 1;
            }
            if n.is_read {
                read += 1;
            }
        }

        let rate = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };

        NotificationAnalytics {
            delivery_rate: rate(delivered),
            read_rate: rate(read),
            by_channel,
            by_priority,
        }
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, request: NotificationRequest) {
        let mut notification = Notification::from_request(request);
        notification.is_delivered = true;
        notification.delivered_at = Some(Utc::now());
        debug!(
            title = %notification.title,
            channel = notification.channel.as_str(),
            recipient = ?notification.recipient,
            "notification dispatched"
        );
        let mut log = self.log.write().unwrap_or_else(PoisonError::into_inner);
        log.push(notification);
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
