//! Content categorization
//!
//! Keyword extraction, category and topic detection, sentiment. All
//! lookup-table driven; the only non-deterministic function is
//! [`trending_score`], a documented placeholder.

use serde::Serialize;

/// Sentiment verdict. Ties vote neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

const POSITIVE_WORDS: [&str; 6] = ["good", "great", "excellent", "amazing", "wonderful", "love"];
const NEGATIVE_WORDS: [&str; 6] = ["bad", "terrible", "awful", "hate", "horrible", "worst"];

/// Content type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContentKind {
    Tutorial,
    Review,
    News,
    Opinion,
    Article,
}

/// Categorization result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub sentiment: Sentiment,
    pub primary_topic: String,
    pub content_kind: ContentKind,
}

/// First 10 distinct lowercased words longer than 4 characters
pub fn extract_keywords(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();
    for word in content
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 4)
    {
        if seen.insert(word.to_string()) {
            keywords.push(word.to_string());
            if keywords.len() == 10 {
                break;
            }
        }
    }
    keywords
}

fn detect_categories(keywords: &[String]) -> Vec<String> {
    const CATEGORY_KEYWORDS: [(&str, [&str; 3]); 3] = [
        ("Technology", ["tech", "technology", "software"]),
        ("Health", ["health", "fitness", "wellness"]),
        ("Business", ["business", "finance", "money"]),
    ];

    let mut categories = Vec::new();
    for (category, words) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| words.contains(&k.as_str())) {
            categories.push(category.to_string());
        }
    }
    if categories.is_empty() {
        categories.push("General".to_string());
    }
    categories
}

/// Majority vote between positive and negative word occurrences
/// (substring counts, each occurrence weighted equally)
pub fn sentiment(content: &str) -> Sentiment {
    let content_lower = content.to_lowercase();
    let count = |words: &[&str]| -> usize {
        words
            .iter()
            .map(|w| content_lower.matches(w).count())
            .sum()
    };

    let positive = count(&POSITIVE_WORDS);
    let negative = count(&NEGATIVE_WORDS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn primary_topic(content: &str) -> String {
    let content_lower = content.to_lowercase();
    let topic = if content_lower.contains("technology") || content_lower.contains("software") {
        "Technology"
    } else if content_lower.contains("health") || content_lower.contains("fitness") {
        "Health"
    } else if content_lower.contains("business") || content_lower.contains("finance") {
        "Business"
    } else if content_lower.contains("travel") || content_lower.contains("vacation") {
        "Travel"
    } else {
        "General"
    };
    topic.to_string()
}

fn classify_kind(content: &str) -> ContentKind {
    let content_lower = content.to_lowercase();
    if content_lower.contains("how to") || content_lower.contains("tutorial") {
        ContentKind::Tutorial
    } else if content_lower.contains("review") || content_lower.contains("rating") {
        ContentKind::Review
    } else if content_lower.contains("news") || content_lower.contains("breaking") {
        ContentKind::News
    } else if content_lower.contains("opinion") || content_lower.contains("think") {
        ContentKind::Opinion
    } else {
        ContentKind::Article
    }
}

/// Categorize one piece of content
pub fn categorize(content: &str) -> Categorization {
    let keywords = extract_keywords(content);
    let categories = detect_categories(&keywords);

    Categorization {
        categories,
        sentiment: sentiment(content),
        primary_topic: primary_topic(content),
        content_kind: classify_kind(content),
        keywords,
    }
}

/// Placeholder trending score. Non-deterministic, standing in for a
/// trend feed the core does not integrate. Do not rely on its value.
pub fn trending_score() -> f64 {
    rand::random::<f64>()
}
