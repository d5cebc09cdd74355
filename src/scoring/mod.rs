//! Content scoring
//!
//! Deterministic heuristic scoring over blog titles and bodies:
//! readability, SEO, engagement prediction, moderation and
//! categorization. No learned models, just arithmetic over text with
//! documented thresholds. Scoring never errors: empty input scores zero.

pub mod classify;
pub mod moderation;
pub mod quality;
pub mod seo;

pub use classify::{categorize, trending_score, Categorization, ContentKind, Sentiment};
pub use moderation::{moderate, ModerationReport, ModerationVerdict, PolicyViolation};
pub use quality::{
    analyze_quality, engagement_prediction, predict_success, readability, seo_score,
    QualityAnalysis,
};
pub use seo::{seo_report, SeoReport};
