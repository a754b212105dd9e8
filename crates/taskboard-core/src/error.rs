//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Taskboard.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown task status wire name.
    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    /// Unknown task priority wire name.
    #[error("Invalid task priority: {0}")]
    InvalidPriority(String),
}
