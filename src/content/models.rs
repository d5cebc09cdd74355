//! Content data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlogStatus {
    Draft,
    Published,
    Archived,
}

impl Default for BlogStatus {
    fn default() -> Self {
        BlogStatus::Draft
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub status: BlogStatus,
    pub category: Option<String>,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: Uuid) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            content: content.into(),
            tags: Vec::new(),
            author_id,
            status: BlogStatus::Draft,
            category: None,
            seo_title: None,
            seo_description: None,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Derive a URL slug from a title: lowercase, runs of non-alphanumerics
/// collapsed to a single dash, edges trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Comment on a blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(blog_id: Uuid, author_id: Uuid, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            author_id,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// A reader report against a blog post. Reports feed moderator
/// auto-assignment and open moderation workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(blog_id: Uuid, reporter_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            reporter_id,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }
}
