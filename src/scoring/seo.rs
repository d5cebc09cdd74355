//! SEO analysis
//!
//! Weighted on-page SEO report for a blog post: title and meta-description
//! bands, keyword density, reading time. Complements the flat additive
//! [`super::quality::seo_score`] used for quick scoring.

use crate::content::Blog;
use crate::scoring::quality::word_count;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Full SEO report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub title_length: usize,
    pub title_optimal: bool,
    pub content_length: usize,
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub has_meta_description: bool,
    pub meta_description_length: usize,
    pub meta_description_optimal: bool,
    /// Keyword → density percentage over total words
    pub keyword_density: HashMap<String, f64>,
    pub score: f64,
    pub recommendations: Vec<String>,
}

/// Optimal title band for search result display
fn title_optimal(title: &str) -> bool {
    (30..=60).contains(&title.chars().count())
}

/// Optimal meta description band
fn meta_description_optimal(description: &str) -> bool {
    (120..=160).contains(&description.chars().count())
}

/// Reading time at 200 words per minute, at least one minute
pub fn reading_time_minutes(words: usize) -> usize {
    (words / 200).max(1)
}

/// Density percentage per title keyword (words longer than 3 chars),
/// counted on word boundaries
pub fn keyword_density(content: &str, title: &str) -> HashMap<String, f64> {
    let mut density = HashMap::new();
    let total_words = word_count(content);
    if total_words == 0 {
        return density;
    }

    let content_lower = content.to_lowercase();
    for keyword in title
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
    {
        let pattern = format!(r"\b{}\b", regex::escape(keyword));
        let matcher = match Regex::new(&pattern) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let count = matcher.find_iter(&content_lower).count();
        density.insert(keyword.to_string(), count as f64 * 100.0 / total_words as f64);
    }
    density
}

/// Analyze a blog post. Weights: title 20, content 30, meta description
/// 20, keyword density 15, reading time 15; capped at 100.
pub fn seo_report(blog: &Blog) -> SeoReport {
    let title_length = blog.title.chars().count();
    let is_title_optimal = title_optimal(&blog.title);

    let words = word_count(&blog.content);
    let reading_time = reading_time_minutes(words);

    let meta = blog.seo_description.as_deref().unwrap_or("");
    let has_meta = !meta.is_empty();
    let meta_length = meta.chars().count();
    let is_meta_optimal = has_meta && meta_description_optimal(meta);

    let density = keyword_density(&blog.content, &blog.title);

    let mut score: f64 = 0.0;

    if is_title_optimal {
        score += 20.0;
    } else if title_length > 0 {
        score += 10.0;
    }

    if words >= 300 {
        score += 30.0;
    } else if words >= 150 {
        score += 20.0;
    } else if words > 0 {
        score += 10.0;
    }

    if is_meta_optimal {
        score += 20.0;
    } else if has_meta {
        score += 10.0;
    }

    if !density.is_empty() {
        let avg = density.values().sum::<f64>() / density.len() as f64;
        if (1.0..=3.0).contains(&avg) {
            score += 15.0;
        } else if avg > 0.0 {
            score += 8.0;
        }
    }

    if (2..=10).contains(&reading_time) {
        score += 15.0;
    } else if words > 0 {
        score += 8.0;
    }

    let mut recommendations = Vec::new();
    if !is_title_optimal {
        if title_length < 30 {
            recommendations.push(
                "Consider making your title longer (30-60 characters) for better SEO".to_string(),
            );
        } else {
            recommendations.push(
                "Consider shortening your title (30-60 characters) for better SEO".to_string(),
            );
        }
    }
    if words < 300 {
        recommendations
            .push("Expand the content to at least 300 words for stronger ranking".to_string());
    }
    if !has_meta {
        recommendations.push("Add a meta description (120-160 characters)".to_string());
    } else if !is_meta_optimal {
        recommendations
            .push("Adjust the meta description length to 120-160 characters".to_string());
    }

    SeoReport {
        title_length,
        title_optimal: is_title_optimal,
        content_length: blog.content.chars().count(),
        word_count: words,
        reading_time_minutes: reading_time,
        has_meta_description: has_meta,
        meta_description_length: meta_length,
        meta_description_optimal: is_meta_optimal,
        keyword_density: density,
        score: score.min(100.0),
        recommendations,
    }
}
