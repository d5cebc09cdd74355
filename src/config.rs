//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// SLA configuration: deadline offsets applied at workflow creation
#[derive(Debug, Clone, Deserialize)]
pub struct SlaConfig {
    pub urgent_review_hours: i64,
    pub moderation_hours: i64,
    pub content_review_days: i64,
    pub default_days: i64,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            urgent_review_hours: 2,
            moderation_hours: 24,
            content_review_days: 3,
            default_days: 7,
        }
    }
}

impl SlaConfig {
    pub fn urgent_review(&self) -> Duration {
        Duration::hours(self.urgent_review_hours)
    }

    pub fn moderation(&self) -> Duration {
        Duration::hours(self.moderation_hours)
    }

    pub fn content_review(&self) -> Duration {
        Duration::days(self.content_review_days)
    }

    pub fn fallback(&self) -> Duration {
        Duration::days(self.default_days)
    }
}

/// Assignment configuration: actor pools per workflow type plus the fixed
/// actors used by escalation and exception handling.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentConfig {
    pub moderators: Vec<String>,
    pub editors: Vec<String>,
    pub admins: Vec<String>,
    pub senior_moderator: String,
    pub policy_reviewer: String,
    pub technical_support: String,
    pub fallback_assignee: String,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            moderators: vec![
                "moderator1".to_string(),
                "moderator2".to_string(),
                "moderator3".to_string(),
            ],
            editors: vec![
                "editor1".to_string(),
                "editor2".to_string(),
                "editor3".to_string(),
            ],
            admins: vec!["admin1".to_string(), "admin2".to_string()],
            senior_moderator: "senior_moderator".to_string(),
            policy_reviewer: "policy_reviewer".to_string(),
            technical_support: "technical_support".to_string(),
            fallback_assignee: "default_assignee".to_string(),
        }
    }
}

/// Performance monitor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Per-category latency samples retained (oldest evicted past this)
    pub sample_capacity: usize,
    /// Alert log entries retained (oldest evicted past this)
    pub alert_capacity: usize,
    /// Active sessions above which a high-load alert is raised
    pub high_load_sessions: usize,
    /// Active sessions above which health is classified critical
    pub critical_sessions: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_capacity: 1000,
            alert_capacity: 1000,
            high_load_sessions: 800,
            critical_sessions: 900,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub sla: SlaConfig,
    pub assignment: AssignmentConfig,
    pub monitor: MonitorConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let defaults = SlaConfig::default();
        let sla = SlaConfig {
            urgent_review_hours: env_parse("SLA_URGENT_REVIEW_HOURS", defaults.urgent_review_hours),
            moderation_hours: env_parse("SLA_MODERATION_HOURS", defaults.moderation_hours),
            content_review_days: env_parse("SLA_CONTENT_REVIEW_DAYS", defaults.content_review_days),
            default_days: env_parse("SLA_DEFAULT_DAYS", defaults.default_days),
        };

        let defaults = AssignmentConfig::default();
        let assignment = AssignmentConfig {
            moderators: env_list("MODERATOR_POOL", defaults.moderators),
            editors: env_list("EDITOR_POOL", defaults.editors),
            admins: env_list("ADMIN_POOL", defaults.admins),
            senior_moderator: env_string("SENIOR_MODERATOR", defaults.senior_moderator),
            policy_reviewer: env_string("POLICY_REVIEWER", defaults.policy_reviewer),
            technical_support: env_string("TECHNICAL_SUPPORT", defaults.technical_support),
            fallback_assignee: env_string("FALLBACK_ASSIGNEE", defaults.fallback_assignee),
        };

        let defaults = MonitorConfig::default();
        let monitor = MonitorConfig {
            sample_capacity: env_parse("MONITOR_SAMPLE_CAPACITY", defaults.sample_capacity),
            alert_capacity: env_parse("MONITOR_ALERT_CAPACITY", defaults.alert_capacity),
            high_load_sessions: env_parse("MONITOR_HIGH_LOAD_SESSIONS", defaults.high_load_sessions),
            critical_sessions: env_parse("MONITOR_CRITICAL_SESSIONS", defaults.critical_sessions),
        };

        if assignment.moderators.is_empty() || assignment.editors.is_empty() {
            return Err(ConfigError::InvalidValue(
                "Actor pools must not be empty".to_string(),
            ));
        }

        Ok(Self {
            sla,
            assignment,
            monitor,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    std::env::var(key)
        .ok()
        .map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or(default)
}
