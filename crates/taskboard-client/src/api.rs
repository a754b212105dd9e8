//! The task repository seam.

use async_trait::async_trait;

use taskboard_core::{
    FilterSet, NewTask, Task, TaskId, TaskPage, TaskPatch, TaskPriority, TaskStatus, UserRef,
};

use crate::error::ApiError;

/// Operations the task repository exposes to the store.
///
/// [`crate::http::HttpTaskApi`] implements this over the real HTTP
/// contract; tests substitute scripted in-memory implementations.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch one page of tasks under the given filter set.
    async fn list_tasks(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<TaskPage, ApiError>;

    /// Fetch a single task by id.
    async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError>;

    /// Create a task; the server assigns id and timestamps.
    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Apply a partial update and return the updated snapshot.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ApiError>;

    /// Change only the status and return the updated snapshot.
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, ApiError>;

    /// Change only the priority and return the updated snapshot.
    async fn update_priority(&self, id: &TaskId, priority: TaskPriority)
        -> Result<Task, ApiError>;

    /// Delete a task.
    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError>;

    /// List users a task may be assigned to.
    async fn list_users(&self) -> Result<Vec<UserRef>, ApiError>;
}
