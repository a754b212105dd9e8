//! HTTP implementation of the task repository contract.
//!
//! Thin request layer: parameter encoding, bearer-token forwarding
//! and `{message}` error-body extraction only. No business logic.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use taskboard_core::{
    FilterSet, NewTask, Task, TaskId, TaskPage, TaskPatch, TaskPriority, TaskStatus, UserRef,
};

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::session::Session;

/// HTTP client for the task REST API.
pub struct HttpTaskApi {
    inner: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpTaskApi {
    /// Create a new client against the given base URL.
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = self.authorize(request).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Shape of a non-2xx body, when the server bothers to explain.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    debug!(status = status.as_u16(), ?message, "request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Serialize)]
struct StatusBody {
    status: TaskStatus,
}

#[derive(Serialize)]
struct PriorityBody {
    priority: TaskPriority,
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(
        &self,
        page: u32,
        limit: u32,
        filters: &FilterSet,
    ) -> Result<TaskPage, ApiError> {
        let url = self.url("/api/tasks");
        let mut params = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        params.extend(filters.query_params());
        debug!(url = %url, page, "GET tasks");

        self.send_json(self.inner.get(&url).query(&params)).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!(url = %url, "GET task");
        self.send_json(self.inner.get(&url)).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        let url = self.url("/api/tasks");
        debug!(url = %url, title = %task.title, "POST task");
        self.send_json(self.inner.post(&url).json(task)).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!(url = %url, "PUT task");
        self.send_json(self.inner.put(&url).json(patch)).await
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/tasks/{id}/status"));
        debug!(url = %url, %status, "PUT task status");
        self.send_json(self.inner.put(&url).json(&StatusBody { status }))
            .await
    }

    async fn update_priority(
        &self,
        id: &TaskId,
        priority: TaskPriority,
    ) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/tasks/{id}/priority"));
        debug!(url = %url, %priority, "PUT task priority");
        self.send_json(self.inner.put(&url).json(&PriorityBody { priority }))
            .await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/tasks/{id}"));
        debug!(url = %url, "DELETE task");
        self.send_empty(self.inner.delete(&url)).await
    }

    async fn list_users(&self) -> Result<Vec<UserRef>, ApiError> {
        let url = self.url("/api/auth/users");
        debug!(url = %url, "GET users");
        self.send_json(self.inner.get(&url)).await
    }
}
