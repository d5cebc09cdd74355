//! Analytics aggregation
//!
//! Read-only rollups over the metric store: performance sums and
//! averages, geographic grouping, day-bucketed trends, SEO overview,
//! trend-based view forecasting and benchmarking. All divisions are
//! guarded; empty inputs produce zeroed reports.

use crate::content::ContentStore;
use crate::metrics::stats;
use crate::metrics::store::MetricStore;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

/// Performance rollup for one blog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPerformance {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_shares: u64,
    pub avg_engagement_rate: f64,
    pub avg_completion_rate: f64,
}

/// Views and engagement grouped by location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoReport {
    pub views_by_location: HashMap<String, u64>,
    pub engagement_by_location: HashMap<String, f64>,
}

/// Day-bucketed series for a `[start, end)` window. Keys are ISO dates,
/// so iteration order is chronological.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub daily_views: BTreeMap<String, u64>,
    pub daily_engagement: BTreeMap<String, f64>,
    /// End-to-end growth of daily views across the window, percent
    pub growth_rate: f64,
}

/// Platform-wide SEO rollup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoOverview {
    pub avg_seo_score: f64,
    pub total_organic_views: u64,
    pub organic_traffic_percentage: f64,
}

/// Trend-based view projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewForecast {
    pub predicted_views_7_days: u64,
    pub predicted_views_30_days: u64,
    pub viral_potential: f64,
}

/// One entry of the top-content leaderboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContent {
    pub blog_id: Uuid,
    pub title: String,
    pub views: u64,
    pub engagement_rate: f64,
}

/// Platform overview for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveDashboard {
    pub total_blogs: usize,
    pub total_views: u64,
    pub avg_engagement_rate: f64,
    /// Last-7-day views as a share of all-time views, percent
    pub weekly_growth: f64,
    pub top_content: Vec<TopContent>,
}

/// Blog performance relative to the platform
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkReport {
    /// Blog mean engagement / platform mean engagement (0 when the
    /// platform mean is 0)
    pub engagement_vs_platform: f64,
    /// Percentile rank of the blog's total views among all blogs
    pub views_percentile: f64,
}

/// Read-side analytics over metric and content stores
pub struct AnalyticsAggregator {
    metrics: Arc<MetricStore>,
    content: Arc<ContentStore>,
}

impl AnalyticsAggregator {
    pub fn new(metrics: Arc<MetricStore>, content: Arc<ContentStore>) -> Self {
        Self { metrics, content }
    }

    /// Sums and averages for one blog
    pub async fn content_performance(&self, blog_id: Uuid) -> ContentPerformance {
        let records = self.metrics.find_by_blog_id(blog_id).await;

        let engagement: Vec<f64> = records.iter().map(|r| r.engagement_rate).collect();
        let completion: Vec<f64> = records.iter().map(|r| r.completion_rate).collect();

        ContentPerformance {
            total_views: records.iter().map(|r| r.views).sum(),
            total_likes: records.iter().map(|r| r.likes).sum(),
            total_shares: records.iter().map(|r| r.shares).sum(),
            avg_engagement_rate: stats::mean(&engagement),
            avg_completion_rate: stats::mean(&completion),
        }
    }

    /// View sums and average engagement grouped by location
    pub async fn geographic(&self) -> GeoReport {
        let records = self.metrics.all().await;

        let mut views_by_location: HashMap<String, u64> = HashMap::new();
        let mut engagement_samples: HashMap<String, Vec<f64>> = HashMap::new();
        for record in &records {
            *views_by_location
                .entry(record.geo_location.clone())
                .or_insert(0) += record.views;
            engagement_samples
                .entry(record.geo_location.clone())
                .or_default()
                .push(record.engagement_rate);
        }

        let engagement_by_location = engagement_samples
            .into_iter()
            .map(|(location, samples)| (location, stats::mean(&samples)))
            .collect();

        GeoReport {
            views_by_location,
            engagement_by_location,
        }
    }

    /// Day-bucketed views and engagement for `[start, end)`
    pub async fn trends(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TrendReport {
        let records = self.metrics.find_by_date_range(start, end).await;

        let mut daily_views: BTreeMap<String, u64> = BTreeMap::new();
        let mut engagement_samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in &records {
            let day = record.timestamp.date_naive().to_string();
            *daily_views.entry(day.clone()).or_insert(0) += record.views;
            engagement_samples
                .entry(day)
                .or_default()
                .push(record.engagement_rate);
        }

        let daily_engagement = engagement_samples
            .into_iter()
            .map(|(day, samples)| (day, stats::mean(&samples)))
            .collect();

        let series: Vec<u64> = daily_views.values().copied().collect();

        TrendReport {
            growth_rate: stats::growth_rate(&series),
            daily_views,
            daily_engagement,
        }
    }

    /// Platform SEO rollup
    pub async fn seo_overview(&self) -> SeoOverview {
        let records = self.metrics.all().await;

        let seo_scores: Vec<f64> = records.iter().map(|r| r.seo_score).collect();
        let total_views: u64 = records.iter().map(|r| r.views).sum();
        let organic_views: u64 = records.iter().map(|r| r.organic_views).sum();

        let organic_traffic_percentage = if total_views == 0 {
            0.0
        } else {
            organic_views as f64 / total_views as f64 * 100.0
        };

        SeoOverview {
            avg_seo_score: stats::mean(&seo_scores),
            total_organic_views: organic_views,
            organic_traffic_percentage,
        }
    }

    /// Trend-based 7/30-day view projection. Needs at least three
    /// historical points; `None` otherwise.
    pub async fn predictive(&self, blog_id: Uuid) -> Option<ViewForecast> {
        let mut records = self.metrics.find_by_blog_id(blog_id).await;
        if records.len() < 3 {
            return None;
        }
        records.sort_by_key(|r| r.timestamp);

        let series: Vec<u64> = records.iter().map(|r| r.views).collect();
        let avg_growth = stats::average_step_growth(&series);
        let current = *series.last().expect("non-empty series") as f64;

        let project = |days: f64| (current * (1.0 + avg_growth * days)).max(0.0) as u64;

        let shares: Vec<f64> = records.iter().map(|r| r.shares as f64).collect();
        let engagement: Vec<f64> = records.iter().map(|r| r.engagement_rate).collect();

        Some(ViewForecast {
            predicted_views_7_days: project(7.0),
            predicted_views_30_days: project(30.0),
            viral_potential: stats::mean(&shares) * stats::mean(&engagement) / 100.0,
        })
    }

    /// Platform overview with a top-content leaderboard
    pub async fn executive_dashboard(&self) -> ExecutiveDashboard {
        let records = self.metrics.all().await;
        let total_views: u64 = records.iter().map(|r| r.views).sum();
        let engagement: Vec<f64> = records.iter().map(|r| r.engagement_rate).collect();

        let week_ago = Utc::now() - Duration::days(7);
        let recent_views: u64 = records
            .iter()
            .filter(|r| r.timestamp >= week_ago)
            .map(|r| r.views)
            .sum();
        let weekly_growth = if total_views == 0 {
            0.0
        } else {
            recent_views as f64 / total_views as f64 * 100.0
        };

        let mut per_blog: HashMap<Uuid, (u64, Vec<f64>)> = HashMap::new();
        for record in &records {
            let entry = per_blog.entry(record.blog_id).or_insert((0, Vec::new()));
            entry.0 += record.views;
            entry.1.push(record.engagement_rate);
        }

        let mut leaderboard: Vec<TopContent> = Vec::new();
        for (blog_id, (views, engagement_samples)) in per_blog {
            let title = match self.content.get(blog_id).await {
                Ok(blog) => blog.title,
                Err(_) => blog_id.to_string(),
            };
            leaderboard.push(TopContent {
                blog_id,
                title,
                views,
                engagement_rate: stats::mean(&engagement_samples),
            });
        }
        leaderboard.sort_by(|a, b| {
            b.engagement_rate
                .partial_cmp(&a.engagement_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        leaderboard.truncate(5);

        ExecutiveDashboard {
            total_blogs: self.content.count().await,
            total_views,
            avg_engagement_rate: stats::mean(&engagement),
            weekly_growth,
            top_content: leaderboard,
        }
    }

    /// Blog engagement and reach relative to the whole platform
    pub async fn benchmarks(&self, blog_id: Uuid) -> BenchmarkReport {
        let all = self.metrics.all().await;
        let blog_records: Vec<_> = all.iter().filter(|r| r.blog_id == blog_id).collect();

        let blog_engagement: Vec<f64> = blog_records.iter().map(|r| r.engagement_rate).collect();
        let platform_engagement: Vec<f64> = all.iter().map(|r| r.engagement_rate).collect();

        let blog_mean = stats::mean(&blog_engagement);
        let platform_mean = stats::mean(&platform_engagement);
        let engagement_vs_platform = if platform_mean == 0.0 {
            0.0
        } else {
            blog_mean / platform_mean
        };

        let mut totals_per_blog: HashMap<Uuid, u64> = HashMap::new();
        for record in &all {
            *totals_per_blog.entry(record.blog_id).or_insert(0) += record.views;
        }
        let blog_total = *totals_per_blog.get(&blog_id).unwrap_or(&0) as f64;
        let all_totals: Vec<f64> = totals_per_blog.values().map(|&v| v as f64).collect();

        BenchmarkReport {
            engagement_vs_platform,
            views_percentile: stats::percentile_rank(blog_total, &all_totals),
        }
    }
}
