//! Task snapshots and mutation payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{TaskId, UserId};
use crate::status::{TaskPriority, TaskStatus};

/// Identity snapshot of a user embedded in a task (creator or assignee).
///
/// Also the row shape of the assignable-users listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Unique user identifier. The server emits Mongo-style `_id`.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,
}

/// A Task as reported by the server.
///
/// Tasks are immutable value snapshots; the client never derives a
/// task's fields independently of a server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier. The server emits Mongo-style `_id`.
    #[serde(rename = "_id", alias = "id")]
    pub id: TaskId,

    /// Short human-readable title.
    pub title: String,

    /// Longer free-form description.
    pub description: String,

    /// When the task is due.
    pub due_date: DateTime<Utc>,

    /// Current priority.
    pub priority: TaskPriority,

    /// Current workflow status.
    pub status: TaskStatus,

    /// Free-form labels, order preserved.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Who created this task.
    pub created_by: UserRef,

    /// Who the task is assigned to, if anyone.
    #[serde(default)]
    pub assigned_to: Option<UserRef>,

    /// When the task was created.
    pub created_at: DateTime<Utc>,

    /// When the task was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Returns true if the task is past due and not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && !self.status.is_terminal()
    }
}

/// Payload for creating a task: the task fields minus id/timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Assignee user id, if assigned at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

/// Partial update payload. Absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

impl TaskPatch {
    /// Returns true if the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> UserRef {
        UserRef {
            id: UserId::new("u1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_task_decodes_server_json() {
        let json = r#"{
            "_id": "665f1c2e9b1d8c0012ab34cd",
            "title": "Ship release",
            "description": "Cut the 1.2 release",
            "dueDate": "2025-07-01T12:00:00Z",
            "priority": "high",
            "status": "in-progress",
            "tags": ["release", "ops"],
            "createdBy": {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
            "assignedTo": null,
            "createdAt": "2025-06-01T08:00:00Z",
            "updatedAt": "2025-06-02T09:30:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "665f1c2e9b1d8c0012ab34cd");
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.tags, vec!["release", "ops"]);
        assert_eq!(task.created_by.name, "Ada");
        assert!(task.assigned_to.is_none());
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 7, 2, 0, 0, 0).unwrap();
        let mut task = Task {
            id: TaskId::new("t1"),
            title: "x".into(),
            description: String::new(),
            due_date: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            priority: TaskPriority::Low,
            status: TaskStatus::Pending,
            tags: Vec::new(),
            created_by: sample_user(),
            assigned_to: None,
            created_at: now,
            updated_at: now,
        };
        assert!(task.is_overdue(now));

        task.status = TaskStatus::Completed;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "completed"}));
        assert!(!patch.is_empty());
        assert!(TaskPatch::default().is_empty());
    }
}
