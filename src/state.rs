//! Platform state management
//!
//! Wires stores, engine, aggregator and monitor into one shared state
//! value the request-handling layer can clone around.

use crate::config::Settings;
use crate::content::{ContentStore, ReportStore};
use crate::metrics::{AnalyticsAggregator, MetricStore};
use crate::monitor::PerformanceMonitor;
use crate::notify::NotificationCenter;
use crate::users::UserStore;
use crate::workflow::{WorkflowEngine, WorkflowStore};
use std::sync::Arc;

/// Platform state shared across request handlers
pub struct PlatformState {
    pub settings: Arc<Settings>,
    pub users: Arc<UserStore>,
    pub content: Arc<ContentStore>,
    pub reports: Arc<ReportStore>,
    pub metrics: Arc<MetricStore>,
    pub workflows: Arc<WorkflowStore>,
    pub notifications: Arc<NotificationCenter>,
    pub engine: WorkflowEngine,
    pub analytics: AnalyticsAggregator,
    pub monitor: PerformanceMonitor,
}

impl PlatformState {
    /// Create platform state with the in-memory stores and the
    /// notification center as the engine's sink
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let users = Arc::new(UserStore::new());
        let content = Arc::new(ContentStore::new());
        let reports = Arc::new(ReportStore::new());
        let metrics = Arc::new(MetricStore::new());
        let workflows = Arc::new(WorkflowStore::new());
        let notifications = Arc::new(NotificationCenter::new());

        let engine = WorkflowEngine::new(
            settings.clone(),
            workflows.clone(),
            content.clone(),
            users.clone(),
            reports.clone(),
            notifications.clone(),
        );
        let analytics = AnalyticsAggregator::new(metrics.clone(), content.clone());
        let monitor = PerformanceMonitor::new(settings.monitor.clone());

        Self {
            settings,
            users,
            content,
            reports,
            metrics,
            workflows,
            notifications,
            engine,
            analytics,
            monitor,
        }
    }
}

impl Default for PlatformState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Type alias for shared state
pub type SharedState = Arc<PlatformState>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Blog;
    use crate::users::{Role, User};
    use crate::workflow::WorkflowType;

    #[tokio::test]
    async fn test_state_wires_engine_to_notification_center() {
        let state = PlatformState::default();
        let author = state
            .users
            .create(User::new("ada@example.com", "Ada", Role::Author))
            .await
            .unwrap();
        let blog = state
            .content
            .create(Blog::new("Wired together", "body", author.id))
            .await
            .unwrap();

        state
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        assert_eq!(state.workflows.count().await, 1);
        assert_eq!(state.notifications.for_user(author.id).len(), 1);
    }
}
