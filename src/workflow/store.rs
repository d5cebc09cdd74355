//! Workflow storage
//!
//! In-memory store for workflow records. Mutations of a single workflow go
//! through [`WorkflowStore::modify`], a read-modify-write under one write
//! lock, so per-id updates are atomic.

use crate::workflow::models::{Workflow, WorkflowStatus, WorkflowType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe workflow store
pub struct WorkflowStore {
    workflows: Arc<RwLock<HashMap<Uuid, Workflow>>>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Persist a workflow (insert or replace)
    pub async fn save(&self, workflow: Workflow) -> Workflow {
        let mut workflows = self.workflows.write().await;
        workflows.insert(workflow.id, workflow.clone());
        workflow
    }

    /// Get a workflow by ID
    pub async fn get(&self, id: Uuid) -> Option<Workflow> {
        let workflows = self.workflows.read().await;
        workflows.get(&id).cloned()
    }

    /// Apply a closure to one workflow under the write lock, stamping
    /// `updated_at`. Returns the updated record, or `None` when the id is
    /// unknown.
    pub async fn modify<F>(&self, id: Uuid, f: F) -> Option<Workflow>
    where
        F: FnOnce(&mut Workflow),
    {
        let mut workflows = self.workflows.write().await;
        let workflow = workflows.get_mut(&id)?;
        f(workflow);
        workflow.updated_at = chrono::Utc::now();
        Some(workflow.clone())
    }

    /// Delete a workflow
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut workflows = self.workflows.write().await;
        workflows.remove(&id).is_some()
    }

    /// List all workflows
    pub async fn list(&self) -> Vec<Workflow> {
        let workflows = self.workflows.read().await;
        workflows.values().cloned().collect()
    }

    /// List workflows in a given status
    pub async fn find_by_status(&self, status: WorkflowStatus) -> Vec<Workflow> {
        let workflows = self.workflows.read().await;
        workflows
            .values()
            .filter(|w| w.status == status)
            .cloned()
            .collect()
    }

    /// List workflows of a given type
    pub async fn find_by_type(&self, kind: &WorkflowType) -> Vec<Workflow> {
        let workflows = self.workflows.read().await;
        workflows
            .values()
            .filter(|w| &w.kind == kind)
            .cloned()
            .collect()
    }

    /// List workflows assigned to an actor
    pub async fn find_by_assignee(&self, assignee: &str) -> Vec<Workflow> {
        let workflows = self.workflows.read().await;
        workflows
            .values()
            .filter(|w| w.assigned_to.as_deref() == Some(assignee))
            .cloned()
            .collect()
    }

    /// List workflows attached to a content item
    pub async fn find_by_content_id(&self, blog_id: Uuid) -> Vec<Workflow> {
        let workflows = self.workflows.read().await;
        workflows
            .values()
            .filter(|w| w.blog_id == Some(blog_id))
            .cloned()
            .collect()
    }

    /// Workflow count
    pub async fn count(&self) -> usize {
        let workflows = self.workflows.read().await;
        workflows.len()
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_modify_unknown_id_is_none() {
        let store = WorkflowStore::new();
        let result = store
            .modify(Uuid::new_v4(), |w| w.status = WorkflowStatus::Completed)
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_modify_stamps_updated_at() {
        let store = WorkflowStore::new();
        let wf = store
            .save(Workflow::new("w", WorkflowType::Moderation, Utc::now()))
            .await;
        let before = wf.updated_at;

        let updated = store
            .modify(wf.id, |w| w.status = WorkflowStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, WorkflowStatus::InProgress);
        assert!(updated.updated_at >= before);
    }

    #[tokio::test]
    async fn test_find_by_filters() {
        let store = WorkflowStore::new();
        let blog_id = Uuid::new_v4();

        let mut a = Workflow::new("a", WorkflowType::Moderation, Utc::now());
        a.status = WorkflowStatus::InProgress;
        a.assigned_to = Some("moderator1".to_string());
        a.blog_id = Some(blog_id);
        store.save(a).await;

        let b = Workflow::new("b", WorkflowType::ContentReview, Utc::now());
        store.save(b).await;

        assert_eq!(
            store.find_by_status(WorkflowStatus::InProgress).await.len(),
            1
        );
        assert_eq!(
            store.find_by_type(&WorkflowType::Moderation).await.len(),
            1
        );
        assert_eq!(store.find_by_assignee("moderator1").await.len(), 1);
        assert_eq!(store.find_by_content_id(blog_id).await.len(), 1);
        assert_eq!(store.count().await, 2);
    }
}
