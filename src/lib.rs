//! PressFlow Core: editorial workflow and content analytics engine
//!
//! The logic layer of the PressFlow blogging platform:
//! - Workflow engine: review/moderation state machine with SLA deadlines,
//!   rotating assignment, escalation and exception handling
//! - Content scoring: deterministic readability/SEO/engagement/moderation
//!   heuristics
//! - Analytics: rollups, trends and forecasting over engagement records
//! - Performance monitor: bounded latency tracking with threshold alerts
//!
//! HTTP routing, authentication, real persistence and delivery channels
//! are collaborators of this crate, not part of it. The in-memory stores
//! model the persistence seam and back the test suite.

pub mod config;
pub mod content;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod notify;
pub mod scoring;
pub mod state;
pub mod users;
pub mod workflow;

pub use config::Settings;
pub use error::{EngineError, EngineResult};
pub use state::{PlatformState, SharedState};
