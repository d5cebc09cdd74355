//! Content domain: blogs, comments and moderation reports

pub mod models;
pub mod store;

pub use models::{slugify, Blog, BlogStatus, Comment, Report};
pub use store::{ContentStore, ReportStore};
