//! Content storage
//!
//! In-memory stores for blogs, comments and reports. These model the
//! persistence seam; a database-backed implementation would keep the same
//! method surface.

use crate::content::{Blog, BlogStatus, Comment, Report};
use crate::error::{invalid_reference, EngineResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe blog + comment store
pub struct ContentStore {
    blogs: Arc<RwLock<HashMap<Uuid, Blog>>>,
    comments: Arc<RwLock<HashMap<Uuid, Vec<Comment>>>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            blogs: Arc::new(RwLock::new(HashMap::new())),
            comments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new blog
    pub async fn create(&self, blog: Blog) -> EngineResult<Blog> {
        let mut blogs = self.blogs.write().await;
        blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    /// Get a blog by ID
    pub async fn get(&self, id: Uuid) -> EngineResult<Blog> {
        let blogs = self.blogs.read().await;
        blogs
            .get(&id)
            .cloned()
            .ok_or_else(|| invalid_reference(format!("Blog {} not found", id)))
    }

    /// Check whether a blog exists
    pub async fn exists(&self, id: Uuid) -> bool {
        let blogs = self.blogs.read().await;
        blogs.contains_key(&id)
    }

    /// Get a blog and bump its view counter
    pub async fn record_view(&self, id: Uuid) -> EngineResult<Blog> {
        let mut blogs = self.blogs.write().await;
        let blog = blogs
            .get_mut(&id)
            .ok_or_else(|| invalid_reference(format!("Blog {} not found", id)))?;
        blog.views += 1;
        Ok(blog.clone())
    }

    /// Replace a blog record
    pub async fn update(&self, blog: Blog) -> EngineResult<Blog> {
        let mut blogs = self.blogs.write().await;
        if !blogs.contains_key(&blog.id) {
            return Err(invalid_reference(format!("Blog {} not found", blog.id)));
        }
        let mut blog = blog;
        blog.updated_at = chrono::Utc::now();
        blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    /// Delete a blog and its comments
    pub async fn delete(&self, id: Uuid) -> EngineResult<()> {
        let mut blogs = self.blogs.write().await;
        blogs
            .remove(&id)
            .ok_or_else(|| invalid_reference(format!("Blog {} not found", id)))?;
        let mut comments = self.comments.write().await;
        comments.remove(&id);
        Ok(())
    }

    /// List all blogs
    pub async fn list(&self) -> Vec<Blog> {
        let blogs = self.blogs.read().await;
        blogs.values().cloned().collect()
    }

    /// List blogs by author
    pub async fn find_by_author(&self, author_id: Uuid) -> Vec<Blog> {
        let blogs = self.blogs.read().await;
        blogs
            .values()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect()
    }

    /// List blogs by status
    pub async fn find_by_status(&self, status: BlogStatus) -> Vec<Blog> {
        let blogs = self.blogs.read().await;
        blogs
            .values()
            .filter(|b| b.status == status)
            .cloned()
            .collect()
    }

    /// Blog count
    pub async fn count(&self) -> usize {
        let blogs = self.blogs.read().await;
        blogs.len()
    }

    /// Add a comment to a blog
    pub async fn add_comment(&self, comment: Comment) -> EngineResult<Comment> {
        {
            let blogs = self.blogs.read().await;
            if !blogs.contains_key(&comment.blog_id) {
                return Err(invalid_reference(format!(
                    "Blog {} not found",
                    comment.blog_id
                )));
            }
        }
        let mut comments = self.comments.write().await;
        comments
            .entry(comment.blog_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    /// List comments for a blog
    pub async fn comments_for(&self, blog_id: Uuid) -> Vec<Comment> {
        let comments = self.comments.read().await;
        comments.get(&blog_id).cloned().unwrap_or_default()
    }

    /// Delete a single comment
    pub async fn delete_comment(&self, blog_id: Uuid, comment_id: Uuid) -> EngineResult<()> {
        let mut comments = self.comments.write().await;
        let list = comments
            .get_mut(&blog_id)
            .ok_or_else(|| invalid_reference(format!("Blog {} has no comments", blog_id)))?;
        let before = list.len();
        list.retain(|c| c.id != comment_id);
        if list.len() == before {
            return Err(invalid_reference(format!(
                "Comment {} not found",
                comment_id
            )));
        }
        Ok(())
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only store for reader reports
pub struct ReportStore {
    reports: Arc<RwLock<Vec<Report>>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Record a report
    pub async fn record(&self, report: Report) -> Report {
        let mut reports = self.reports.write().await;
        reports.push(report.clone());
        report
    }

    /// List all reports
    pub async fn list(&self) -> Vec<Report> {
        let reports = self.reports.read().await;
        reports.clone()
    }

    /// List reports filed against a blog
    pub async fn find_by_blog(&self, blog_id: Uuid) -> Vec<Report> {
        let reports = self.reports.read().await;
        reports
            .iter()
            .filter(|r| r.blog_id == blog_id)
            .cloned()
            .collect()
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}
