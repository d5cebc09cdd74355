//! Metric data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One engagement observation window for one blog. Append-only: records
/// are never mutated once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetricRecord {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    /// Interaction intensity as a percentage
    pub engagement_rate: f64,
    /// Share of readers reaching the end, as a percentage
    pub completion_rate: f64,
    pub read_time_seconds: u64,
    pub geo_location: String,
    pub timestamp: DateTime<Utc>,
    pub organic_views: u64,
    pub seo_score: f64,
}

impl ContentMetricRecord {
    /// New zeroed observation for a blog, stamped now
    pub fn new(blog_id: Uuid, geo_location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            views: 0,
            likes: 0,
            shares: 0,
            comments: 0,
            engagement_rate: 0.0,
            completion_rate: 0.0,
            read_time_seconds: 0,
            geo_location: geo_location.into(),
            timestamp: Utc::now(),
            organic_views: 0,
            seo_score: 0.0,
        }
    }
}
