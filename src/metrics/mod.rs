//! Metrics domain: engagement records, statistics helpers and the
//! analytics aggregator

pub mod aggregator;
pub mod models;
pub mod stats;
pub mod store;

pub use aggregator::{
    AnalyticsAggregator, BenchmarkReport, ContentPerformance, ExecutiveDashboard, GeoReport,
    SeoOverview, TopContent, TrendReport, ViewForecast,
};
pub use models::ContentMetricRecord;
pub use store::MetricStore;
