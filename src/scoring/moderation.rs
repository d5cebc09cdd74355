//! Moderation heuristics
//!
//! Spam and safety scoring with a final routing recommendation. Violations
//! are data, not errors: everything here returns scores and flags.

use serde::Serialize;

/// Phrases that flag content as spam outright
const SPAM_PHRASES: [&str; 5] = [
    "buy now",
    "click here",
    "free money",
    "guaranteed",
    "limited time",
];

/// Words that flag content as inappropriate
const INAPPROPRIATE_WORDS: [&str; 4] = ["hate", "violence", "discrimination", "harassment"];

/// Punctuation characters counted toward the density heuristic
const SPAM_PUNCTUATION: [char; 5] = ['!', '@', '#', '$', '%'];

/// Policy violation classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyViolation {
    SpamContent,
    InappropriateContent,
    InsufficientContent,
}

/// Routing recommendation derived from the safety score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationVerdict {
    Approve,
    FlagForReview,
    ReviewRequired,
    Reject,
}

/// Combined moderation result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationReport {
    pub is_spam: bool,
    pub spam_score: f64,
    pub is_inappropriate: bool,
    pub policy_violations: Vec<PolicyViolation>,
    pub safety_score: f64,
    pub recommendation: ModerationVerdict,
}

/// True when any fixed spam phrase appears
pub fn is_spam(content: &str) -> bool {
    let content_lower = content.to_lowercase();
    SPAM_PHRASES.iter().any(|p| content_lower.contains(p))
}

/// Spam probability in [0, 1]: +0.3 for an uppercase ratio above 0.3,
/// +0.2 for punctuation density above 0.1, +0.5 for any spam phrase.
pub fn spam_score(content: &str) -> f64 {
    let mut score: f64 = 0.0;
    let length = content.chars().count();

    if length > 0 {
        let upper = content.chars().filter(|c| c.is_uppercase()).count();
        if upper as f64 > length as f64 * 0.3 {
            score += 0.3;
        }

        let punct = content
            .chars()
            .filter(|c| SPAM_PUNCTUATION.contains(c))
            .count();
        if punct as f64 > length as f64 * 0.1 {
            score += 0.2;
        }
    }

    if is_spam(content) {
        score += 0.5;
    }

    score.min(1.0)
}

/// True when any inappropriate word appears
pub fn is_inappropriate(content: &str) -> bool {
    let content_lower = content.to_lowercase();
    INAPPROPRIATE_WORDS.iter().any(|w| content_lower.contains(w))
}

/// All policy violations present in the content. Content under 50 chars
/// is insufficient.
pub fn policy_violations(content: &str) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    if is_spam(content) {
        violations.push(PolicyViolation::SpamContent);
    }
    if is_inappropriate(content) {
        violations.push(PolicyViolation::InappropriateContent);
    }
    if content.chars().count() < 50 {
        violations.push(PolicyViolation::InsufficientContent);
    }
    violations
}

/// Safety score in [0, 1]: starts at 1.0, −0.4 when spam-flagged, −0.5
/// when inappropriate, −0.1 per recorded violation. Floored at 0.
pub fn safety_score(spam: bool, inappropriate: bool, violations: &[PolicyViolation]) -> f64 {
    let mut score = 1.0;
    if spam {
        score -= 0.4;
    }
    if inappropriate {
        score -= 0.5;
    }
    score -= violations.len() as f64 * 0.1;
    score.max(0.0)
}

/// Recommendation thresholds: below 0.3 reject, below 0.6 a human must
/// review, any violation flags for review, otherwise approve.
pub fn recommendation(safety: f64, violations: &[PolicyViolation]) -> ModerationVerdict {
    if safety < 0.3 {
        ModerationVerdict::Reject
    } else if safety < 0.6 {
        ModerationVerdict::ReviewRequired
    } else if !violations.is_empty() {
        ModerationVerdict::FlagForReview
    } else {
        ModerationVerdict::Approve
    }
}

/// Run the full moderation pipeline over one piece of content
pub fn moderate(content: &str) -> ModerationReport {
    let spam = is_spam(content);
    let inappropriate = is_inappropriate(content);
    let violations = policy_violations(content);
    let safety = safety_score(spam, inappropriate, &violations);

    ModerationReport {
        is_spam: spam,
        spam_score: spam_score(content),
        is_inappropriate: inappropriate,
        recommendation: recommendation(safety, &violations),
        policy_violations: violations,
        safety_score: safety,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_content_approved() {
        let content = "A calm and thoughtful essay about gardening, long enough to pass.";
        let report = moderate(content);
        assert!(!report.is_spam);
        assert!(report.policy_violations.is_empty());
        assert_eq!(report.safety_score, 1.0);
        assert_eq!(report.recommendation, ModerationVerdict::Approve);
    }

    #[test]
    fn test_spam_phrase_drives_review() {
        let content =
            "Buy now and get free money, guaranteed! This offer will not last, click here today.";
        let report = moderate(content);
        assert!(report.is_spam);
        assert!(report.spam_score >= 0.5);
        // 1.0 - 0.4 (spam) - 0.1 (one violation) = 0.5
        assert!((report.safety_score - 0.5).abs() < 1e-9);
        assert_eq!(report.recommendation, ModerationVerdict::ReviewRequired);
    }

    #[test]
    fn test_spam_score_capped_at_one() {
        let content = "BUY NOW!!! CLICK HERE!!! FREE MONEY!!! @#$%";
        assert!((spam_score(content) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_safety_score_floored_at_zero() {
        let score = safety_score(
            true,
            true,
            &[
                PolicyViolation::SpamContent,
                PolicyViolation::InappropriateContent,
                PolicyViolation::InsufficientContent,
            ],
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_inappropriate_and_spam_rejected() {
        let content = "Buy now! I hate everything about this, guaranteed violence.";
        let report = moderate(content);
        // 1.0 - 0.4 - 0.5 - 0.2 < 0.3
        assert_eq!(report.recommendation, ModerationVerdict::Reject);
    }

    #[test]
    fn test_short_content_flagged() {
        let report = moderate("Nice post.");
        assert_eq!(
            report.policy_violations,
            vec![PolicyViolation::InsufficientContent]
        );
        // 1.0 - 0.1 = 0.9: safe, but the violation still flags it
        assert_eq!(report.recommendation, ModerationVerdict::FlagForReview);
    }
}
