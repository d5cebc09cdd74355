//! Notification dispatch
//!
//! The engine talks to a [`NotificationSink`]: fire-and-forget, channel
//! delivery is somebody else's problem. The in-memory
//! [`NotificationCenter`] is the default sink and doubles as the in-app
//! notification feed.

pub mod center;
pub mod models;

pub use center::NotificationCenter;
pub use models::{
    Notification, NotificationAnalytics, NotificationCategory, NotificationChannel,
    NotificationRequest,
};

/// Collaborator interface invoked by the workflow engine on every
/// transition. Synchronous-call-shaped and fire-and-forget: failures are
/// the sink's to swallow, the engine never blocks on delivery.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, request: NotificationRequest);
}
