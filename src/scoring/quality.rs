//! Content quality heuristics
//!
//! Readability, SEO and engagement scoring. The readability formula is
//! Flesch-like; syllables are approximated by vowel count, which is close
//! enough for scoring bands and keeps the function allocation-free.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Engagement triggers, each counted at most once
const EMOTIONAL_WORDS: [&str; 6] = [
    "amazing",
    "incredible",
    "shocking",
    "surprising",
    "love",
    "hate",
];

/// Whitespace-delimited word count
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Count of non-empty splits on `[.!?]+`
pub fn sentence_count(content: &str) -> usize {
    SENTENCE_SPLIT
        .split(content)
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Vowel-count syllable approximation (not phonetic)
pub fn syllable_count(content: &str) -> usize {
    content
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .count()
}

/// Flesch-like reading ease: `206.835 - 1.015*(words/sentences) -
/// 84.6*(syllables/words)`. Returns 0 when there are no words or no
/// sentences.
pub fn readability(content: &str) -> f64 {
    let words = word_count(content);
    let sentences = sentence_count(content);
    if words == 0 || sentences == 0 {
        return 0.0;
    }

    let avg_sentence_length = words as f64 / sentences as f64;
    let avg_syllables_per_word = syllable_count(content) as f64 / words as f64;

    206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables_per_word
}

pub fn has_headings(content: &str) -> bool {
    content.contains('#') || content.contains("<h")
}

pub fn has_bullet_points(content: &str) -> bool {
    content.contains('*') || content.contains('-') || content.contains("<li>")
}

pub fn has_images(content: &str) -> bool {
    content.contains("![") || content.contains("<img")
}

pub fn has_links(content: &str) -> bool {
    content.contains("http") || content.contains('[')
}

/// Additive SEO score, capped at 100:
/// +20 for a title of 30–60 chars, +20 for 1000+ chars of content, +15 for
/// heading markers, +5 per title word longer than 3 chars that also
/// appears in the content, +10 for a link.
pub fn seo_score(title: &str, content: &str) -> f64 {
    let mut score: f64 = 0.0;

    let title_length = title.chars().count();
    if (30..=60).contains(&title_length) {
        score += 20.0;
    }

    if content.chars().count() >= 1000 {
        score += 20.0;
    }

    if has_headings(content) {
        score += 15.0;
    }

    let content_lower = content.to_lowercase();
    for word in title.to_lowercase().split_whitespace() {
        if word.chars().count() > 3 && content_lower.contains(word) {
            score += 5.0;
        }
    }

    if content.contains("http") {
        score += 10.0;
    }

    score.min(100.0)
}

/// Predicted engagement in [0, 1]: base 0.5, +0.2 for 500–2000 chars,
/// +0.02 per question mark (capped at +0.1), +0.05 per distinct emotional
/// word present.
pub fn engagement_prediction(content: &str) -> f64 {
    let mut engagement = 0.5;

    let length = content.chars().count();
    if (500..=2000).contains(&length) {
        engagement += 0.2;
    }

    let question_count = content.matches('?').count();
    engagement += f64::min(0.1, question_count as f64 * 0.02);

    let content_lower = content.to_lowercase();
    for word in EMOTIONAL_WORDS {
        if content_lower.contains(word) {
            engagement += 0.05;
        }
    }

    engagement.min(1.0)
}

/// Success prediction blending structure with historical engagement
/// rates (percent values). Clamped to [0, 1].
pub fn predict_success(title: &str, content: &str, historical_engagement: &[f64]) -> f64 {
    let mut score = 0.5;

    let title_length = title.chars().count();
    if (30..=60).contains(&title_length) {
        score += 0.1;
    }

    let content_length = content.chars().count();
    if (1000..=3000).contains(&content_length) {
        score += 0.15;
    }

    score += readability(content) / 100.0 * 0.2;

    if !historical_engagement.is_empty() {
        let avg = historical_engagement.iter().sum::<f64>() / historical_engagement.len() as f64;
        score += avg / 100.0 * 0.15;
    }

    score.clamp(0.0, 1.0)
}

/// Full quality analysis over one piece of content
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
    pub readability_score: f64,
    pub seo_score: f64,
    pub engagement_prediction: f64,
    pub content_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub has_headings: bool,
    pub has_bullet_points: bool,
    pub has_images: bool,
    pub has_links: bool,
    pub recommendations: Vec<String>,
}

pub fn analyze_quality(title: &str, content: &str) -> QualityAnalysis {
    let readability_score = readability(content);
    let seo = seo_score(title, content);
    let words = word_count(content);
    let headings = has_headings(content);

    let mut recommendations = Vec::new();
    if readability_score < 60.0 {
        recommendations
            .push("Improve readability by using shorter sentences and simpler words".to_string());
    }
    if seo < 70.0 {
        recommendations.push(
            "Optimize for SEO by adding relevant keywords and improving structure".to_string(),
        );
    }
    if !headings {
        recommendations
            .push("Add headings to improve content structure and readability".to_string());
    }
    if words < 300 {
        recommendations
            .push("Consider expanding content for better engagement and SEO".to_string());
    }

    QualityAnalysis {
        readability_score,
        seo_score: seo,
        engagement_prediction: engagement_prediction(content),
        content_length: content.chars().count(),
        word_count: words,
        sentence_count: sentence_count(content),
        has_headings: headings,
        has_bullet_points: has_bullet_points(content),
        has_images: has_images(content),
        has_links: has_links(content),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readability_empty_is_zero() {
        assert_eq!(readability(""), 0.0);
        assert_eq!(readability("   "), 0.0);
    }

    #[test]
    fn test_sentence_count_ignores_empty_splits() {
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("Trailing dots..."), 1);
        assert_eq!(sentence_count("!!!"), 0);
    }

    #[test]
    fn test_seo_score_monotonic_and_capped() {
        let title_short = "Tiny";
        let title_optimal = "A title sized well for search engine results";
        let body = "words ".repeat(50);
        let body_long = "words ".repeat(200);

        let base = seo_score(title_short, &body);
        let with_title = seo_score(title_optimal, &body);
        assert!(with_title >= base);

        let with_length = seo_score(title_optimal, &body_long);
        assert!(with_length >= with_title);

        let with_headings = seo_score(title_optimal, &format!("# Heading\n{}", body_long));
        assert!(with_headings >= with_length);

        let with_links = seo_score(
            title_optimal,
            &format!("# Heading\nhttp://example.com\n{}", body_long),
        );
        assert!(with_links >= with_headings);
        assert!(with_links <= 100.0);
    }

    #[test]
    fn test_seo_score_never_exceeds_cap() {
        // 55-char title of eight repeated qualifying words: 20 + 20 + 15
        // + 40 + 10 > 100 before the cap.
        let title = "search search search search search search search search";
        let content = format!("# {} http", "search ".repeat(300));
        assert_eq!(seo_score(title, &content), 100.0);
    }

    #[test]
    fn test_engagement_prediction_example() {
        // 800 chars, exactly two question marks, one emotional word:
        // 0.5 + 0.2 + 0.04 + 0.05 = 0.79
        let lead = "This is amazing? Is it? ";
        let content = format!("{}{}", lead, "x".repeat(800 - lead.chars().count()));
        assert_eq!(content.chars().count(), 800);

        let prediction = engagement_prediction(&content);
        assert!((prediction - 0.79).abs() < 1e-9);
    }

    #[test]
    fn test_engagement_prediction_capped() {
        let content = format!(
            "amazing incredible shocking surprising love hate {} {}",
            "?".repeat(50),
            "y".repeat(600)
        );
        assert_eq!(engagement_prediction(&content), 1.0);
    }

    #[test]
    fn test_predict_success_clamped() {
        assert!(predict_success("", "", &[]) >= 0.0);
        let historical = vec![100.0, 100.0];
        let content = format!("Good. {}", "calm words here. ".repeat(80));
        let title = "A title sized well for search engine results";
        let score = predict_success(title, &content, &historical);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_analyze_quality_recommends_expansion_for_short_content() {
        let analysis = analyze_quality("Short", "Too short.");
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("expanding content")));
        assert_eq!(analysis.word_count, 2);
    }
}
