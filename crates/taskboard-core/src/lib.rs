//! Taskboard Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Runtime specifics
//! - Any view layer
//!
//! All types here represent the core business domain of Taskboard.

pub mod error;
pub mod filter;
pub mod ids;
pub mod page;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use filter::{FilterPatch, FilterSet, FilterWatchKey};
pub use ids::{TaskId, UserId};
pub use page::{Pagination, TaskPage};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, Task, TaskPatch, UserRef};
