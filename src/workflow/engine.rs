//! The workflow engine
//!
//! Creates, assigns, transitions and escalates editorial workflows, and
//! reports on the pipeline. Every transition notifies the initiator
//! through the configured sink.
//!
//! Missing workflow ids on the action/exception paths are silently
//! ignored rather than surfaced; callers that need an error signal must
//! check existence first. Kept for compatibility with the upstream
//! behaviour this engine replaces.

use crate::config::Settings;
use crate::content::{Blog, ContentStore, Report, ReportStore};
use crate::error::EngineResult;
use crate::notify::{NotificationRequest, NotificationSink};
use crate::users::UserStore;
use crate::workflow::models::{
    ExceptionKind, LifecycleEvent, Priority, Workflow, WorkflowAction, WorkflowReport,
    WorkflowStatus, WorkflowStep, WorkflowType,
};
use crate::workflow::store::WorkflowStore;
use chrono::{Duration, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Words that fail the appropriate-content compliance check
const COMPLIANCE_BLOCKLIST: [&str; 3] = ["spam", "inappropriate", "violation"];

/// Rotating per-pool assignment counters. Round-robin rather than
/// time-keyed: best-effort load spreading, not a fairness guarantee.
#[derive(Default)]
struct PoolRotation {
    moderation: AtomicUsize,
    content_review: AtomicUsize,
    fallback: AtomicUsize,
}

/// The editorial workflow state machine
pub struct WorkflowEngine {
    settings: Arc<Settings>,
    workflows: Arc<WorkflowStore>,
    content: Arc<ContentStore>,
    users: Arc<UserStore>,
    reports: Arc<ReportStore>,
    sink: Arc<dyn NotificationSink>,
    rotation: PoolRotation,
}

impl WorkflowEngine {
    pub fn new(
        settings: Arc<Settings>,
        workflows: Arc<WorkflowStore>,
        content: Arc<ContentStore>,
        users: Arc<UserStore>,
        reports: Arc<ReportStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            settings,
            workflows,
            content,
            users,
            reports,
            sink,
            rotation: PoolRotation::default(),
        }
    }

    /// Create a review workflow for a content item.
    ///
    /// Fails with `InvalidReference` when the blog or initiator does not
    /// exist. The due date is the creation time plus the type's SLA;
    /// priority follows the type/length rules; the assignee comes from
    /// the type's actor pool in rotation.
    pub async fn create_workflow(
        &self,
        blog_id: Uuid,
        initiator_id: Uuid,
        kind: WorkflowType,
    ) -> EngineResult<Workflow> {
        let blog = self.content.get(blog_id).await?;
        let initiator = self.users.get(initiator_id).await?;

        let mut workflow = Workflow::new(
            workflow_name(&kind, &blog.title),
            kind.clone(),
            Utc::now(),
        );
        workflow.due_date = workflow.created_at + self.sla_for(&kind);
        workflow.priority = determine_priority(&blog, &kind);
        workflow.assigned_to = Some(self.next_assignee(&kind));
        workflow.blog_id = Some(blog.id);
        workflow.initiator_id = Some(initiator.id);

        let workflow = self.workflows.save(workflow).await;
        info!(
            workflow = %workflow.name,
            kind = %workflow.kind,
            assignee = workflow.assigned_to.as_deref().unwrap_or("-"),
            priority = %workflow.priority,
            "workflow created"
        );

        self.sink.notify(NotificationRequest::community(
            initiator.id,
            "Workflow Assigned",
            format!("New {} workflow assigned: {}", workflow.kind, blog.title),
            Priority::Medium,
        ));

        Ok(workflow)
    }

    /// Create a pre-configured custom workflow. Not tied to content; the
    /// configuration payload is stored verbatim.
    pub async fn create_custom_workflow(
        &self,
        name: &str,
        kind: WorkflowType,
        configuration: Map<String, Value>,
    ) -> Workflow {
        let mut workflow = Workflow::new(name, kind.clone(), Utc::now());
        workflow.due_date = workflow.created_at + self.sla_for(&kind);
        workflow.status = WorkflowStatus::Configured;
        workflow.current_step = WorkflowStep::Configured;
        workflow.workflow_data = configuration;
        self.workflows.save(workflow).await
    }

    /// Apply a reviewer action. Unknown workflow ids are silently
    /// ignored. Always stamps `updated_at` and stores the comments, even
    /// on a workflow already in a terminal state (re-approval is
    /// idempotent on status).
    pub async fn process_action(
        &self,
        workflow_id: Uuid,
        action: WorkflowAction,
        comments: &str,
    ) -> EngineResult<()> {
        let senior = self.settings.assignment.senior_moderator.clone();
        let updated = self
            .workflows
            .modify(workflow_id, |workflow| {
                workflow.comments = Some(comments.to_string());
                match action {
                    WorkflowAction::Approve => {
                        workflow.status = WorkflowStatus::Completed;
                        workflow.current_step = WorkflowStep::Approved;
                    }
                    WorkflowAction::Reject => {
                        workflow.status = WorkflowStatus::Rejected;
                        workflow.current_step = WorkflowStep::Rejected;
                    }
                    WorkflowAction::RequestChanges => {
                        workflow.status = WorkflowStatus::ChangesRequested;
                        workflow.current_step = WorkflowStep::AwaitingChanges;
                    }
                    WorkflowAction::Escalate => {
                        workflow.escalate_priority(Priority::Urgent);
                        workflow.assigned_to = Some(senior.clone());
                        workflow.current_step = WorkflowStep::Escalated;
                    }
                }
            })
            .await;

        let workflow = match updated {
            Some(workflow) => workflow,
            None => {
                debug!(%workflow_id, "action on unknown workflow ignored");
                return Ok(());
            }
        };

        info!(
            workflow = %workflow.name,
            ?action,
            status = %workflow.status,
            "workflow action processed"
        );

        let initiator = match workflow.initiator_id {
            Some(id) => id,
            None => return Ok(()),
        };
        let content_title = match workflow.blog_id {
            Some(blog_id) => self
                .content
                .get(blog_id)
                .await
                .map(|b| b.title)
                .unwrap_or_else(|_| workflow.name.clone()),
            None => workflow.name.clone(),
        };

        let request = match action {
            WorkflowAction::Approve => {
                NotificationRequest::content(initiator, "Content Approved", content_title)
            }
            WorkflowAction::Reject => NotificationRequest::content(
                initiator,
                "Content Rejected",
                format!("{} - Reason: {}", content_title, comments),
            ),
            WorkflowAction::RequestChanges => NotificationRequest::content(
                initiator,
                "Changes Requested",
                format!("{} - Changes: {}", content_title, comments),
            ),
            WorkflowAction::Escalate => NotificationRequest::community(
                initiator,
                "Workflow Escalated",
                format!("Workflow escalated: {} - {}", workflow.name, comments),
                Priority::High,
            ),
        };
        self.sink.notify(request);

        Ok(())
    }

    /// Pick the moderator with the lightest active load from the
    /// candidate pool for this content type. Ties break on pool order:
    /// the first minimum wins.
    pub async fn auto_assign_moderator(&self, content_type: &str, report_reason: &str) -> String {
        let pool = &self.settings.assignment.moderators;
        if pool.is_empty() {
            return self.settings.assignment.fallback_assignee.clone();
        }

        let active = self.workflows.find_by_status(WorkflowStatus::InProgress).await;
        let mut workload: HashMap<&str, usize> = HashMap::new();
        for workflow in &active {
            if let Some(assignee) = workflow.assigned_to.as_deref() {
                *workload.entry(assignee).or_insert(0) += 1;
            }
        }

        let mut best: Option<(&String, usize)> = None;
        for candidate in pool {
            let load = workload.get(candidate.as_str()).copied().unwrap_or(0);
            if best.map_or(true, |(_, current)| load < current) {
                best = Some((candidate, load));
            }
        }

        let assignee = best
            .map(|(candidate, _)| candidate.clone())
            .unwrap_or_else(|| self.settings.assignment.fallback_assignee.clone());
        debug!(content_type, report_reason, %assignee, "moderator auto-assigned");
        assignee
    }

    /// Run the four compliance checks. When any fails, a compliance
    /// workflow recording the results is opened as a side effect; the
    /// boolean verdict is returned either way.
    pub async fn check_policy_compliance(&self, blog: &Blog) -> bool {
        let content_lower = blog.content.to_lowercase();
        let title_length = blog.title.chars().count();

        let mut checks = Map::new();
        checks.insert(
            "contentLength".to_string(),
            Value::Bool(blog.content.chars().count() >= 100),
        );
        checks.insert(
            "titleRequirements".to_string(),
            Value::Bool((10..=200).contains(&title_length)),
        );
        checks.insert(
            "appropriateContent".to_string(),
            Value::Bool(!COMPLIANCE_BLOCKLIST.iter().any(|w| content_lower.contains(w))),
        );
        checks.insert(
            "copyrightCompliance".to_string(),
            Value::Bool(!content_lower.contains("copyright violation")),
        );

        let compliant = checks.values().all(|v| v.as_bool().unwrap_or(false));
        if !compliant {
            let failed: Vec<&str> = checks
                .iter()
                .filter(|(_, passed)| !passed.as_bool().unwrap_or(false))
                .map(|(name, _)| name.as_str())
                .collect();
            warn!(blog = %blog.title, ?failed, "policy compliance failed");

            let kind = WorkflowType::ComplianceCheck;
            let mut workflow = Workflow::new(
                format!("Compliance_{}", blog.title),
                kind.clone(),
                Utc::now(),
            );
            workflow.due_date = workflow.created_at + self.sla_for(&kind);
            workflow.status = WorkflowStatus::ComplianceReview;
            workflow.current_step = WorkflowStep::ComplianceReview;
            workflow.blog_id = Some(blog.id);
            workflow.workflow_data = checks;
            self.workflows.save(workflow).await;
        }

        compliant
    }

    /// Handle an exception raised against a workflow. Unknown workflow
    /// ids and unrecognized exception types are ignored.
    pub async fn handle_exception(&self, workflow_id: Uuid, kind: ExceptionKind, details: &str) {
        if self.workflows.get(workflow_id).await.is_none() {
            debug!(%workflow_id, "exception on unknown workflow ignored");
            return;
        }

        let senior = self.settings.assignment.senior_moderator.clone();
        match kind {
            ExceptionKind::Timeout => {
                let updated = self
                    .workflows
                    .modify(workflow_id, |workflow| {
                        workflow.escalate_priority(Priority::High);
                        apply_escalation(workflow, &senior);
                    })
                    .await;
                if let Some(workflow) = updated {
                    self.notify_escalated(&workflow, "Workflow timeout exceeded");
                }
            }
            ExceptionKind::PolicyException => {
                let reviewer = self.settings.assignment.policy_reviewer.clone();
                self.workflows
                    .modify(workflow_id, |workflow| {
                        workflow.current_step = WorkflowStep::PolicyReview;
                        workflow.assigned_to = Some(reviewer.clone());
                    })
                    .await;
                info!(%workflow_id, details, "workflow routed to policy review");
            }
            ExceptionKind::TechnicalIssue => {
                let support = self.settings.assignment.technical_support.clone();
                self.workflows
                    .modify(workflow_id, |workflow| {
                        workflow.current_step = WorkflowStep::TechnicalReview;
                        workflow.assigned_to = Some(support.clone());
                    })
                    .await;
                info!(%workflow_id, details, "workflow routed to technical review");
            }
            ExceptionKind::EscalationRequired => {
                let updated = self
                    .workflows
                    .modify(workflow_id, |workflow| apply_escalation(workflow, &senior))
                    .await;
                if let Some(workflow) = updated {
                    self.notify_escalated(&workflow, details);
                }
            }
            ExceptionKind::Other(name) => {
                debug!(%workflow_id, exception = %name, "unknown exception type ignored");
            }
        }
    }

    /// React to a content lifecycle event. Publishing and updating spawn
    /// follow-up workflows; archival and deletion are observability-only.
    pub async fn manage_content_lifecycle(
        &self,
        blog: &Blog,
        event: LifecycleEvent,
    ) -> EngineResult<Option<Workflow>> {
        match event {
            LifecycleEvent::Published => {
                let workflow = self
                    .create_workflow(
                        blog.id,
                        blog.author_id,
                        WorkflowType::Custom("POST_PUBLICATION_MONITORING".to_string()),
                    )
                    .await?;
                Ok(Some(workflow))
            }
            LifecycleEvent::Updated => {
                let workflow = self
                    .create_workflow(
                        blog.id,
                        blog.author_id,
                        WorkflowType::Custom("UPDATE_REVIEW".to_string()),
                    )
                    .await?;
                Ok(Some(workflow))
            }
            LifecycleEvent::Archived => {
                info!(blog = %blog.title, "content archived");
                Ok(None)
            }
            LifecycleEvent::Deleted => {
                info!(blog = %blog.title, "content deleted");
                Ok(None)
            }
        }
    }

    /// File a reader report: persists it, opens a moderation workflow for
    /// the reported blog and assigns the least-loaded moderator.
    pub async fn file_report(&self, report: Report) -> EngineResult<Workflow> {
        let blog = self.content.get(report.blog_id).await?;
        let reporter = self.users.get(report.reporter_id).await?;
        self.reports.record(report.clone()).await;

        let assignee = self
            .auto_assign_moderator(
                blog.category.as_deref().unwrap_or("general"),
                &report.reason,
            )
            .await;

        let kind = WorkflowType::Moderation;
        let mut workflow = Workflow::new(
            workflow_name(&kind, &blog.title),
            kind.clone(),
            Utc::now(),
        );
        workflow.due_date = workflow.created_at + self.sla_for(&kind);
        workflow.priority = determine_priority(&blog, &kind);
        workflow.assigned_to = Some(assignee);
        workflow.blog_id = Some(blog.id);
        workflow.initiator_id = Some(reporter.id);
        let workflow = self.workflows.save(workflow).await;

        self.sink.notify(NotificationRequest::community(
            reporter.id,
            "Content Reported",
            format!("Content has been reported: {}", report.reason),
            Priority::High,
        ));

        Ok(workflow)
    }

    /// Workflows past their due date and not yet terminal
    pub async fn overdue(&self) -> Vec<Workflow> {
        let now = Utc::now();
        self.workflows
            .list()
            .await
            .into_iter()
            .filter(|w| w.is_overdue(now))
            .collect()
    }

    /// Pipeline analytics: completion rates and processing times per
    /// type, bottlenecks per step, status distribution.
    pub async fn analytics(&self) -> WorkflowReport {
        let all = self.workflows.list().await;

        let mut totals: HashMap<String, usize> = HashMap::new();
        let mut completed: HashMap<String, usize> = HashMap::new();
        let mut processing_hours: HashMap<String, Vec<f64>> = HashMap::new();
        let mut bottlenecks: HashMap<String, usize> = HashMap::new();
        let mut status_distribution: HashMap<String, usize> = HashMap::new();

        for workflow in &all {
            let kind = workflow.kind.to_string();
            *totals.entry(kind.clone()).or_insert(0) += 1;
            *status_distribution
                .entry(workflow.status.to_string())
                .or_insert(0) += 1;

            if workflow.status == WorkflowStatus::Completed {
                *completed.entry(kind.clone()).or_insert(0) += 1;
                let hours =
                    (workflow.updated_at - workflow.created_at).num_seconds() as f64 / 3600.0;
                processing_hours.entry(kind).or_default().push(hours);
            } else {
                *bottlenecks
                    .entry(workflow.current_step.to_string())
                    .or_insert(0) += 1;
            }
        }

        let completion_rates = totals
            .iter()
            .map(|(kind, &total)| {
                let done = completed.get(kind).copied().unwrap_or(0);
                let rate = if total == 0 {
                    0.0
                } else {
                    done as f64 / total as f64 * 100.0
                };
                (kind.clone(), rate)
            })
            .collect();

        let average_processing_hours = processing_hours
            .into_iter()
            .map(|(kind, hours)| {
                let avg = if hours.is_empty() {
                    0.0
                } else {
                    hours.iter().sum::<f64>() / hours.len() as f64
                };
                (kind, avg)
            })
            .collect();

        WorkflowReport {
            completion_rates,
            average_processing_hours,
            bottlenecks,
            status_distribution,
        }
    }

    fn sla_for(&self, kind: &WorkflowType) -> Duration {
        let sla = &self.settings.sla;
        match kind {
            WorkflowType::UrgentReview => sla.urgent_review(),
            WorkflowType::Moderation => sla.moderation(),
            WorkflowType::ContentReview => sla.content_review(),
            _ => sla.fallback(),
        }
    }

    fn next_assignee(&self, kind: &WorkflowType) -> String {
        let assignment = &self.settings.assignment;
        let (pool, counter) = match kind {
            WorkflowType::Moderation => (&assignment.moderators, &self.rotation.moderation),
            WorkflowType::ContentReview => (&assignment.editors, &self.rotation.content_review),
            _ => (&assignment.admins, &self.rotation.fallback),
        };
        if pool.is_empty() {
            return assignment.fallback_assignee.clone();
        }
        let index = counter.fetch_add(1, Ordering::Relaxed) % pool.len();
        pool[index].clone()
    }

    fn notify_escalated(&self, workflow: &Workflow, reason: &str) {
        info!(workflow = %workflow.name, reason, "workflow escalated");
        if let Some(initiator) = workflow.initiator_id {
            self.sink.notify(NotificationRequest::community(
                initiator,
                "Workflow Escalated",
                format!("Workflow escalated: {} - {}", workflow.name, reason),
                Priority::High,
            ));
        }
    }
}

/// Type rule first, then length, then the floor
fn determine_priority(blog: &Blog, kind: &WorkflowType) -> Priority {
    if *kind == WorkflowType::Moderation {
        return Priority::High;
    }
    if blog.content.chars().count() > 5000 {
        return Priority::Medium;
    }
    Priority::Low
}

/// Force a workflow onto the escalation path
fn apply_escalation(workflow: &mut Workflow, senior: &str) {
    workflow.escalate_priority(Priority::Urgent);
    workflow.assigned_to = Some(senior.to_string());
    workflow.current_step = WorkflowStep::Escalated;
}

/// `TYPE_SanitizedTitle`, title clipped to 30 chars
fn workflow_name(kind: &WorkflowType, title: &str) -> String {
    let sanitized: String = title
        .chars()
        .take(30)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", kind, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationCenter;
    use crate::users::{Role, User};
    use pretty_assertions::assert_eq;

    struct Harness {
        engine: WorkflowEngine,
        workflows: Arc<WorkflowStore>,
        content: Arc<ContentStore>,
        users: Arc<UserStore>,
        center: Arc<NotificationCenter>,
    }

    fn harness() -> Harness {
        let settings = Arc::new(Settings::default());
        let workflows = Arc::new(WorkflowStore::new());
        let content = Arc::new(ContentStore::new());
        let users = Arc::new(UserStore::new());
        let reports = Arc::new(ReportStore::new());
        let center = Arc::new(NotificationCenter::new());
        let engine = WorkflowEngine::new(
            settings,
            workflows.clone(),
            content.clone(),
            users.clone(),
            reports,
            center.clone(),
        );
        Harness {
            engine,
            workflows,
            content,
            users,
            center,
        }
    }

    async fn seed_blog(h: &Harness, content_len: usize) -> (Blog, User) {
        let author = h
            .users
            .create(User::new(
                format!("{}@example.com", Uuid::new_v4()),
                "Author",
                Role::Author,
            ))
            .await
            .unwrap();
        let blog = h
            .content
            .create(Blog::new(
                "A perfectly reasonable headline",
                "y".repeat(content_len),
                author.id,
            ))
            .await
            .unwrap();
        (blog, author)
    }

    #[tokio::test]
    async fn test_due_date_matches_type_sla_exactly() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;

        let cases = [
            (WorkflowType::UrgentReview, Duration::hours(2)),
            (WorkflowType::Moderation, Duration::hours(24)),
            (WorkflowType::ContentReview, Duration::days(3)),
            (WorkflowType::Publication, Duration::days(7)),
        ];
        for (kind, expected) in cases {
            let wf = h
                .engine
                .create_workflow(blog.id, author.id, kind)
                .await
                .unwrap();
            assert_eq!(wf.due_date - wf.created_at, expected);
        }
    }

    #[tokio::test]
    async fn test_moderation_priority_beats_length_rule() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 6000).await;

        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::Moderation)
            .await
            .unwrap();
        assert_eq!(wf.priority, Priority::High);
        assert_eq!(wf.due_date - wf.created_at, Duration::hours(24));
    }

    #[tokio::test]
    async fn test_length_and_floor_priority_rules() {
        let h = harness();

        let (long_blog, author) = seed_blog(&h, 6000).await;
        let wf = h
            .engine
            .create_workflow(long_blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();
        assert_eq!(wf.priority, Priority::Medium);

        let (short_blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(short_blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();
        assert_eq!(wf.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_references() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;

        let missing_blog = h
            .engine
            .create_workflow(Uuid::new_v4(), author.id, WorkflowType::ContentReview)
            .await;
        assert!(missing_blog.is_err());

        let missing_user = h
            .engine
            .create_workflow(blog.id, Uuid::new_v4(), WorkflowType::ContentReview)
            .await;
        assert!(missing_user.is_err());
    }

    #[tokio::test]
    async fn test_assignment_rotates_through_pool() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;

        let mut assignees = Vec::new();
        for _ in 0..4 {
            let wf = h
                .engine
                .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
                .await
                .unwrap();
            assignees.push(wf.assigned_to.unwrap());
        }
        assert_eq!(assignees, vec!["editor1", "editor2", "editor3", "editor1"]);
    }

    #[tokio::test]
    async fn test_approve_completes_and_notifies() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        h.engine
            .process_action(wf.id, WorkflowAction::Approve, "ship it")
            .await
            .unwrap();

        let wf = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(wf.status, WorkflowStatus::Completed);
        assert_eq!(wf.current_step, WorkflowStep::Approved);
        assert_eq!(wf.comments.as_deref(), Some("ship it"));
        assert!(h
            .center
            .for_user(author.id)
            .iter()
            .any(|n| n.title == "Content Approved"));
    }

    #[tokio::test]
    async fn test_reapproval_is_idempotent_on_state() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        h.engine
            .process_action(wf.id, WorkflowAction::Approve, "first")
            .await
            .unwrap();
        let first = h.workflows.get(wf.id).await.unwrap();

        h.engine
            .process_action(wf.id, WorkflowAction::Approve, "second")
            .await
            .unwrap();
        let second = h.workflows.get(wf.id).await.unwrap();

        assert_eq!(second.status, WorkflowStatus::Completed);
        assert_eq!(second.comments.as_deref(), Some("second"));
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_action_on_unknown_workflow_is_a_no_op() {
        let h = harness();
        let result = h
            .engine
            .process_action(Uuid::new_v4(), WorkflowAction::Approve, "nobody home")
            .await;
        assert!(result.is_ok());
        assert_eq!(h.workflows.count().await, 0);
    }

    #[tokio::test]
    async fn test_escalate_reassigns_and_raises_priority() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        h.engine
            .process_action(wf.id, WorkflowAction::Escalate, "stuck")
            .await
            .unwrap();

        let wf = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(wf.priority, Priority::Urgent);
        assert_eq!(wf.assigned_to.as_deref(), Some("senior_moderator"));
        assert_eq!(wf.current_step, WorkflowStep::Escalated);
    }

    #[tokio::test]
    async fn test_compliance_failure_opens_exactly_one_workflow() {
        let h = harness();
        let author = Uuid::new_v4();
        let short = Blog::new("A valid headline", "too short", author);

        let compliant = h.engine.check_policy_compliance(&short).await;
        assert!(!compliant);

        let opened = h
            .workflows
            .find_by_type(&WorkflowType::ComplianceCheck)
            .await;
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].status, WorkflowStatus::ComplianceReview);
        assert_eq!(
            opened[0].workflow_data.get("contentLength"),
            Some(&Value::Bool(false))
        );
    }

    #[tokio::test]
    async fn test_compliance_pass_opens_nothing() {
        let h = harness();
        let blog = Blog::new(
            "A valid headline",
            "perfectly wholesome words ".repeat(10),
            Uuid::new_v4(),
        );

        assert!(h.engine.check_policy_compliance(&blog).await);
        assert_eq!(h.workflows.count().await, 0);
    }

    #[tokio::test]
    async fn test_auto_assign_picks_lightest_load_first_wins() {
        let h = harness();

        // moderator1 and moderator2 each carry one active workflow;
        // moderator3 is free.
        for assignee in ["moderator1", "moderator2"] {
            let mut wf = Workflow::new("w", WorkflowType::Moderation, Utc::now());
            wf.status = WorkflowStatus::InProgress;
            wf.assigned_to = Some(assignee.to_string());
            h.workflows.save(wf).await;
        }
        assert_eq!(
            h.engine.auto_assign_moderator("general", "spam").await,
            "moderator3"
        );

        // Everyone tied: first pool entry wins.
        let mut wf = Workflow::new("w", WorkflowType::Moderation, Utc::now());
        wf.status = WorkflowStatus::InProgress;
        wf.assigned_to = Some("moderator3".to_string());
        h.workflows.save(wf).await;
        assert_eq!(
            h.engine.auto_assign_moderator("general", "spam").await,
            "moderator1"
        );
    }

    #[tokio::test]
    async fn test_timeout_exception_escalates() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        h.engine
            .handle_exception(wf.id, ExceptionKind::Timeout, "overdue")
            .await;

        let wf = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(wf.priority, Priority::Urgent);
        assert_eq!(wf.current_step, WorkflowStep::Escalated);
        assert_eq!(wf.assigned_to.as_deref(), Some("senior_moderator"));
    }

    #[tokio::test]
    async fn test_policy_and_technical_exceptions_reroute() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;

        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();
        h.engine
            .handle_exception(wf.id, ExceptionKind::PolicyException, "tos")
            .await;
        let updated = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(updated.current_step, WorkflowStep::PolicyReview);
        assert_eq!(updated.assigned_to.as_deref(), Some("policy_reviewer"));

        h.engine
            .handle_exception(wf.id, ExceptionKind::TechnicalIssue, "render bug")
            .await;
        let updated = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(updated.current_step, WorkflowStep::TechnicalReview);
        assert_eq!(updated.assigned_to.as_deref(), Some("technical_support"));
    }

    #[tokio::test]
    async fn test_unknown_exception_changes_nothing() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;
        let wf = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        h.engine
            .handle_exception(
                wf.id,
                ExceptionKind::Other("SOLAR_FLARE".to_string()),
                "cosmic rays",
            )
            .await;

        let unchanged = h.workflows.get(wf.id).await.unwrap();
        assert_eq!(unchanged.current_step, wf.current_step);
        assert_eq!(unchanged.assigned_to, wf.assigned_to);
    }

    #[tokio::test]
    async fn test_lifecycle_published_spawns_monitoring_workflow() {
        let h = harness();
        let (blog, _) = seed_blog(&h, 200).await;

        let spawned = h
            .engine
            .manage_content_lifecycle(&blog, LifecycleEvent::Published)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spawned.kind.as_str(), "POST_PUBLICATION_MONITORING");

        let none = h
            .engine
            .manage_content_lifecycle(&blog, LifecycleEvent::Archived)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_custom_workflow_is_configured() {
        let h = harness();
        let mut configuration = Map::new();
        configuration.insert("stages".to_string(), Value::from(3));

        let wf = h
            .engine
            .create_custom_workflow(
                "quarterly-audit",
                WorkflowType::Custom("AUDIT".to_string()),
                configuration,
            )
            .await;
        assert_eq!(wf.status, WorkflowStatus::Configured);
        assert_eq!(wf.workflow_data.get("stages"), Some(&Value::from(3)));
    }

    #[tokio::test]
    async fn test_file_report_opens_high_priority_moderation() {
        let h = harness();
        let (blog, _) = seed_blog(&h, 200).await;
        let reporter = h
            .users
            .create(User::new("reader@example.com", "Reader", Role::Reader))
            .await
            .unwrap();

        let wf = h
            .engine
            .file_report(Report::new(blog.id, reporter.id, "abusive content"))
            .await
            .unwrap();

        assert_eq!(wf.kind, WorkflowType::Moderation);
        assert_eq!(wf.priority, Priority::High);
        assert_eq!(wf.assigned_to.as_deref(), Some("moderator1"));
        assert!(h
            .center
            .for_user(reporter.id)
            .iter()
            .any(|n| n.title == "Content Reported"));
    }

    #[tokio::test]
    async fn test_analytics_rates_and_bottlenecks() {
        let h = harness();
        let (blog, author) = seed_blog(&h, 200).await;

        let approved = h
            .engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();
        h.engine
            .process_action(approved.id, WorkflowAction::Approve, "ok")
            .await
            .unwrap();
        h.engine
            .create_workflow(blog.id, author.id, WorkflowType::ContentReview)
            .await
            .unwrap();

        let report = h.engine.analytics().await;
        assert_eq!(report.completion_rates.get("CONTENT_REVIEW"), Some(&50.0));
        assert_eq!(report.bottlenecks.get("INITIAL_REVIEW"), Some(&1));
        assert_eq!(report.status_distribution.get("COMPLETED"), Some(&1));
        assert_eq!(report.status_distribution.get("PENDING"), Some(&1));
        assert!(report
            .average_processing_hours
            .contains_key("CONTENT_REVIEW"));
    }
}
