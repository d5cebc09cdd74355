//! Performance monitoring
//!
//! Per-category latency tracking with bounded sample retention,
//! threshold alerting and a concurrent-session gauge. Shared mutable
//! state lives behind std mutexes; recording is synchronous-call-shaped
//! and locks are never held across an await. The session gauge is eventually
//! consistent under races; an approximate size is acceptable.

use crate::config::MonitorConfig;
use crate::metrics::stats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Latency thresholds per operation category, in milliseconds
const THRESHOLDS_MS: [(&str, u64); 5] = [
    ("authentication", 1000),
    ("content", 3000),
    ("search", 2000),
    ("comments", 1500),
    ("analytics", 2000),
];

/// Alert classes raised by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    SlowResponse,
    HighConcurrentUsers,
}

/// A recorded alert
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfAlert {
    pub kind: AlertKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Latency statistics for one category. All zero when no samples exist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    pub average: f64,
    pub p90: f64,
    pub p95: f64,
    pub min: u64,
    pub max: u64,
    pub count: usize,
}

impl OperationStats {
    fn empty() -> Self {
        Self {
            average: 0.0,
            p90: 0.0,
            p95: 0.0,
            min: 0,
            max: 0,
            count: 0,
        }
    }
}

/// Health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Degraded,
    Critical,
}

/// System health rollup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub response_time_health: HealthStatus,
    pub concurrent_user_health: HealthStatus,
    pub overall: HealthStatus,
}

/// Latency trend over the retained window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    InsufficientData,
    Improving,
    Stable,
    Degrading,
}

/// Bounded latency-sample and alert tracking per operation category
pub struct PerformanceMonitor {
    config: MonitorConfig,
    samples: Mutex<HashMap<String, VecDeque<u64>>>,
    alerts: Mutex<VecDeque<PerfAlert>>,
    sessions: Mutex<HashSet<String>>,
}

impl PerformanceMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            samples: Mutex::new(HashMap::new()),
            alerts: Mutex::new(VecDeque::new()),
            sessions: Mutex::new(HashSet::new()),
        }
    }

    /// Record one latency sample. Evicts the oldest sample past the
    /// retention capacity and raises an alert when the category's
    /// threshold is exceeded.
    pub fn record(&self, category: &str, elapsed_ms: u64) {
        {
            let mut samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
            let window = samples.entry(category.to_string()).or_default();
            window.push_back(elapsed_ms);
            while window.len() > self.config.sample_capacity {
                window.pop_front();
            }
        }

        if let Some(&(_, threshold)) = THRESHOLDS_MS.iter().find(|(name, _)| *name == category) {
            if elapsed_ms > threshold {
                self.raise(
                    AlertKind::SlowResponse,
                    format!(
                        "{} operation took {}ms (threshold: {}ms)",
                        category, elapsed_ms, threshold
                    ),
                );
            }
        }
    }

    /// Latency statistics for one category
    pub fn stats(&self, category: &str) -> OperationStats {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        let window = match samples.get(category) {
            Some(window) if !window.is_empty() => window,
            _ => return OperationStats::empty(),
        };

        let values: Vec<u64> = window.iter().copied().collect();
        OperationStats {
            average: stats::mean_u64(&values),
            p90: stats::percentile(&values, 0.9),
            p95: stats::percentile(&values, 0.95),
            min: *values.iter().min().expect("non-empty window"),
            max: *values.iter().max().expect("non-empty window"),
            count: values.len(),
        }
    }

    /// Statistics for every tracked category
    pub fn all_stats(&self) -> HashMap<String, OperationStats> {
        let categories: Vec<String> = {
            let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
            samples.keys().cloned().collect()
        };
        categories
            .into_iter()
            .map(|category| {
                let stats = self.stats(&category);
                (category, stats)
            })
            .collect()
    }

    /// Track a session entering or leaving. Raises a high-load alert
    /// when the gauge passes the configured limit.
    pub fn session_active(&self, session_id: &str, active: bool) {
        let current = {
            let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            if active {
                sessions.insert(session_id.to_string());
            } else {
                sessions.remove(session_id);
            }
            sessions.len()
        };

        if active && current > self.config.high_load_sessions {
            self.raise(
                AlertKind::HighConcurrentUsers,
                format!("Approaching concurrent user limit: {}", current),
            );
        }
    }

    /// Current concurrent-session gauge (approximate under races)
    pub fn concurrent_users(&self) -> usize {
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.len()
    }

    /// Recorded alerts, oldest first
    pub fn alerts(&self) -> Vec<PerfAlert> {
        let alerts = self.alerts.lock().unwrap_or_else(PoisonError::into_inner);
        alerts.iter().cloned().collect()
    }

    /// Health rollup from authentication latency and session load
    pub fn system_health(&self) -> SystemHealth {
        let auth_p95 = self.stats("authentication").p95;
        let response_time_health = if auth_p95 > 1000.0 {
            HealthStatus::Degraded
        } else if auth_p95 > 500.0 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        };

        let users = self.concurrent_users();
        let concurrent_user_health = if users > self.config.critical_sessions {
            HealthStatus::Critical
        } else if users > 700 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        };

        let overall = if concurrent_user_health == HealthStatus::Critical
            || response_time_health == HealthStatus::Degraded
        {
            HealthStatus::Critical
        } else if concurrent_user_health == HealthStatus::Warning
            || response_time_health == HealthStatus::Warning
        {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        };

        SystemHealth {
            response_time_health,
            concurrent_user_health,
            overall,
        }
    }

    /// Threshold-derived tuning advice
    pub fn recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();

        if self.stats("authentication").p95 > 1000.0 {
            recommendations.push(
                "Authentication p95 exceeds 1 second. Consider optimizing token processing or lookups."
                    .to_string(),
            );
        }
        if self.stats("content").p90 > 3000.0 {
            recommendations.push(
                "Content operations are slow. Consider caching or query optimization.".to_string(),
            );
        }
        if self.stats("search").average > 2000.0 {
            recommendations
                .push("Search is slow. Consider indexing or a dedicated search backend.".to_string());
        }
        if self.concurrent_users() > self.config.high_load_sessions {
            recommendations.push(
                "High concurrent user load. Consider load balancing or horizontal scaling."
                    .to_string(),
            );
        }

        recommendations
    }

    /// Latency trend for a category: first five vs last five retained
    /// samples, ±10% band. Needs at least ten samples.
    pub fn trend(&self, category: &str) -> Trend {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        let window = match samples.get(category) {
            Some(window) if window.len() >= 10 => window,
            _ => return Trend::InsufficientData,
        };

        let values: Vec<u64> = window.iter().copied().collect();
        let older = stats::mean_u64(&values[..5]);
        let recent = stats::mean_u64(&values[values.len() - 5..]);
        if older == 0.0 {
            return Trend::Stable;
        }

        let change = (recent - older) / older * 100.0;
        if change > 10.0 {
            Trend::Degrading
        } else if change < -10.0 {
            Trend::Improving
        } else {
            Trend::Stable
        }
    }

    fn raise(&self, kind: AlertKind, message: String) {
        warn!(?kind, %message, "performance alert");
        let mut alerts = self.alerts.lock().unwrap_or_else(PoisonError::into_inner);
        alerts.push_back(PerfAlert {
            kind,
            message,
            at: Utc::now(),
        });
        while alerts.len() > self.config.alert_capacity {
            alerts.pop_front();
        }
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_category_stats_are_zero() {
        let monitor = PerformanceMonitor::default();
        let stats = monitor.stats("search");
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.p90, 0.0);
        assert_eq!(stats.p95, 0.0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_retention_evicts_oldest() {
        let monitor = PerformanceMonitor::default();
        for value in 0..=1000u64 {
            monitor.record("content", value);
        }

        let stats = monitor.stats("content");
        assert_eq!(stats.count, 1000);
        // Sample 0 evicted, newest retained
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 1000);
    }

    #[test]
    fn test_threshold_breach_raises_alert() {
        let monitor = PerformanceMonitor::default();
        monitor.record("authentication", 500);
        assert!(monitor.alerts().is_empty());

        monitor.record("authentication", 1500);
        let alerts = monitor.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::SlowResponse);
        assert!(alerts[0].message.contains("1500ms"));
    }

    #[test]
    fn test_uncategorized_operation_never_alerts() {
        let monitor = PerformanceMonitor::default();
        monitor.record("batch-import", 60_000);
        assert!(monitor.alerts().is_empty());
    }

    #[test]
    fn test_session_gauge_and_high_load_alert() {
        let monitor = PerformanceMonitor::default();
        monitor.session_active("s1", true);
        monitor.session_active("s1", true);
        monitor.session_active("s2", true);
        assert_eq!(monitor.concurrent_users(), 2);

        monitor.session_active("s1", false);
        assert_eq!(monitor.concurrent_users(), 1);

        for i in 0..801 {
            monitor.session_active(&format!("load-{}", i), true);
        }
        assert!(monitor
            .alerts()
            .iter()
            .any(|a| a.kind == AlertKind::HighConcurrentUsers));
    }

    #[test]
    fn test_system_health_rollup() {
        let monitor = PerformanceMonitor::default();
        assert_eq!(monitor.system_health().overall, HealthStatus::Healthy);

        for _ in 0..20 {
            monitor.record("authentication", 2000);
        }
        let health = monitor.system_health();
        assert_eq!(health.response_time_health, HealthStatus::Degraded);
        assert_eq!(health.overall, HealthStatus::Critical);
    }

    #[test]
    fn test_trend_classification() {
        let monitor = PerformanceMonitor::default();
        assert_eq!(monitor.trend("content"), Trend::InsufficientData);

        for value in [100, 100, 100, 100, 100, 300, 300, 300, 300, 300] {
            monitor.record("content", value);
        }
        assert_eq!(monitor.trend("content"), Trend::Degrading);

        for value in [300, 300, 300, 300, 300, 100, 100, 100, 100, 100] {
            monitor.record("search", value);
        }
        assert_eq!(monitor.trend("search"), Trend::Improving);
    }

    #[test]
    fn test_recommendations_follow_thresholds() {
        let monitor = PerformanceMonitor::default();
        assert!(monitor.recommendations().is_empty());

        for _ in 0..10 {
            monitor.record("search", 5000);
        }
        assert!(monitor
            .recommendations()
            .iter()
            .any(|r| r.contains("Search is slow")));
    }
}
