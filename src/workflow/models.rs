//! Workflow data models
//!
//! Defines the editorial workflow record and its state machine vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Priority ladder. Ordering matters: escalation may raise a workflow's
/// priority but must never silently lower it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow type. The well-known types drive SLA and assignment tables;
/// lifecycle automation also spawns ad-hoc types (e.g. post-publication
/// monitoring), carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkflowType {
    ContentReview,
    Moderation,
    Publication,
    ComplianceCheck,
    UrgentReview,
    Custom(String),
}

impl WorkflowType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowType::ContentReview => "CONTENT_REVIEW",
            WorkflowType::Moderation => "MODERATION",
            WorkflowType::Publication => "PUBLICATION",
            WorkflowType::ComplianceCheck => "COMPLIANCE_CHECK",
            WorkflowType::UrgentReview => "URGENT_REVIEW",
            WorkflowType::Custom(name) => name,
        }
    }
}

impl From<String> for WorkflowType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CONTENT_REVIEW" => WorkflowType::ContentReview,
            "MODERATION" => WorkflowType::Moderation,
            "PUBLICATION" => WorkflowType::Publication,
            "COMPLIANCE_CHECK" => WorkflowType::ComplianceCheck,
            "URGENT_REVIEW" => WorkflowType::UrgentReview,
            _ => WorkflowType::Custom(s),
        }
    }
}

impl From<WorkflowType> for String {
    fn from(kind: WorkflowType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status in the editorial state machine
///
/// `Pending → InProgress → {Completed | Rejected | ChangesRequested}`;
/// `ChangesRequested` loops back through re-submission. `Completed` and
/// `Rejected` are terminal. `Configured` and `ComplianceReview` are the
/// entry states of custom and auto-created compliance workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    Pending,
    InProgress,
    ChangesRequested,
    Completed,
    Rejected,
    Configured,
    ComplianceReview,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Pending => "PENDING",
            WorkflowStatus::InProgress => "IN_PROGRESS",
            WorkflowStatus::ChangesRequested => "CHANGES_REQUESTED",
            WorkflowStatus::Completed => "COMPLETED",
            WorkflowStatus::Rejected => "REJECTED",
            WorkflowStatus::Configured => "CONFIGURED",
            WorkflowStatus::ComplianceReview => "COMPLIANCE_REVIEW",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStatus::Completed | WorkflowStatus::Rejected)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current step within a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStep {
    InitialReview,
    Approved,
    Rejected,
    AwaitingChanges,
    Escalated,
    PolicyReview,
    TechnicalReview,
    ComplianceReview,
    Configured,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::InitialReview => "INITIAL_REVIEW",
            WorkflowStep::Approved => "APPROVED",
            WorkflowStep::Rejected => "REJECTED",
            WorkflowStep::AwaitingChanges => "AWAITING_CHANGES",
            WorkflowStep::Escalated => "ESCALATED",
            WorkflowStep::PolicyReview => "POLICY_REVIEW",
            WorkflowStep::TechnicalReview => "TECHNICAL_REVIEW",
            WorkflowStep::ComplianceReview => "COMPLIANCE_REVIEW",
            WorkflowStep::Configured => "CONFIGURED",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reviewer action on a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowAction {
    Approve,
    Reject,
    RequestChanges,
    Escalate,
}

/// Exception raised against a running workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExceptionKind {
    Timeout,
    PolicyException,
    TechnicalIssue,
    EscalationRequired,
    /// Unrecognized exception types are ignored, not errors.
    Other(String),
}

impl ExceptionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ExceptionKind::Timeout => "TIMEOUT",
            ExceptionKind::PolicyException => "POLICY_EXCEPTION",
            ExceptionKind::TechnicalIssue => "TECHNICAL_ISSUE",
            ExceptionKind::EscalationRequired => "ESCALATION_REQUIRED",
            ExceptionKind::Other(name) => name,
        }
    }
}

impl From<String> for ExceptionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "TIMEOUT" => ExceptionKind::Timeout,
            "POLICY_EXCEPTION" => ExceptionKind::PolicyException,
            "TECHNICAL_ISSUE" => ExceptionKind::TechnicalIssue,
            "ESCALATION_REQUIRED" => ExceptionKind::EscalationRequired,
            _ => ExceptionKind::Other(s),
        }
    }
}

impl From<ExceptionKind> for String {
    fn from(kind: ExceptionKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Content lifecycle event fed into the engine by the publishing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleEvent {
    Published,
    Updated,
    Archived,
    Deleted,
}

/// A tracked editorial workflow attached to one content item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WorkflowType,
    pub status: WorkflowStatus,
    pub current_step: WorkflowStep,
    pub assigned_to: Option<String>,
    pub priority: Priority,
    pub blog_id: Option<Uuid>,
    pub initiator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Structured workflow-specific payload (compliance check results,
    /// custom configuration, ...)
    pub workflow_data: Map<String, Value>,
    pub comments: Option<String>,
}

impl Workflow {
    pub fn new(name: impl Into<String>, kind: WorkflowType, due_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            status: WorkflowStatus::Pending,
            current_step: WorkflowStep::InitialReview,
            assigned_to: None,
            priority: Priority::Low,
            blog_id: None,
            initiator_id: None,
            created_at: now,
            updated_at: now,
            due_date,
            workflow_data: Map::new(),
            comments: None,
        }
    }

    /// Raise priority to `at_least` if currently below it. Never lowers.
    pub fn escalate_priority(&mut self, at_least: Priority) {
        if at_least > self.priority {
            self.priority = at_least;
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && now > self.due_date
    }
}

/// Aggregated workflow analytics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowReport {
    /// Completed / total per workflow type, as a percentage
    pub completion_rates: std::collections::HashMap<String, f64>,
    /// Mean hours between creation and last update over completed
    /// workflows, per type
    pub average_processing_hours: std::collections::HashMap<String, f64>,
    /// Count of non-completed workflows grouped by current step
    pub bottlenecks: std::collections::HashMap<String, usize>,
    /// Count of workflows grouped by status
    pub status_distribution: std::collections::HashMap<String, usize>,
}
