//! Error handling module
//!
//! Provides unified error types for the engine and its stores.

use thiserror::Error;

/// Engine-wide error type
///
/// Scoring and compliance failures are data, not errors; they come back as
/// booleans/scores. Only reference-integrity violations on write paths and
/// genuine internal faults surface here.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Helper function to create an invalid-reference error
pub fn invalid_reference(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidReference(msg.into())
}

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> EngineError {
    EngineError::Validation(msg.into())
}

/// Helper function to create a conflict error
pub fn conflict_error(msg: impl Into<String>) -> EngineError {
    EngineError::Conflict(msg.into())
}
