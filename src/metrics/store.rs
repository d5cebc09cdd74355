//! Metric storage
//!
//! Append-only in-memory store for engagement records. Writers are the
//! collaborators observing views/engagement; the aggregator only reads.

use crate::metrics::models::ContentMetricRecord;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe append-only metric store
pub struct MetricStore {
    records: Arc<RwLock<Vec<ContentMetricRecord>>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append one observation
    pub async fn record(&self, record: ContentMetricRecord) -> ContentMetricRecord {
        let mut records = self.records.write().await;
        records.push(record.clone());
        record
    }

    /// All records
    pub async fn all(&self) -> Vec<ContentMetricRecord> {
        let records = self.records.read().await;
        records.clone()
    }

    /// Records for one blog
    pub async fn find_by_blog_id(&self, blog_id: Uuid) -> Vec<ContentMetricRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.blog_id == blog_id)
            .cloned()
            .collect()
    }

    /// Records with `start <= timestamp < end`
    pub async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<ContentMetricRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .cloned()
            .collect()
    }

    /// Records observed from one location
    pub async fn find_by_geo_location(&self, geo_location: &str) -> Vec<ContentMetricRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.geo_location == geo_location)
            .cloned()
            .collect()
    }

    /// Record count
    pub async fn count(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_date_range_is_half_open() {
        let store = MetricStore::new();
        let blog_id = Uuid::new_v4();
        let base = Utc::now();

        for offset in [0, 1, 2] {
            let mut record = ContentMetricRecord::new(blog_id, "US");
            record.timestamp = base + Duration::days(offset);
            store.record(record).await;
        }

        let window = store
            .find_by_date_range(base, base + Duration::days(2))
            .await;
        assert_eq!(window.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_geo_location() {
        let store = MetricStore::new();
        let blog_id = Uuid::new_v4();
        store.record(ContentMetricRecord::new(blog_id, "US")).await;
        store.record(ContentMetricRecord::new(blog_id, "DE")).await;

        assert_eq!(store.find_by_geo_location("US").await.len(), 1);
        assert_eq!(store.find_by_blog_id(blog_id).await.len(), 2);
    }
}
