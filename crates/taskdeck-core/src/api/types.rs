//! Wire types for the task service.
//!
//! Field names follow the service's JSON (`_id`, `task`, `createdAt`,
//! ...); everything is parsed into these types at the API boundary so
//! the state containers never see raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A user reference on a task.
///
/// The service populates assignment fields with full profiles on some
/// endpoints and returns bare ids on others, so both shapes parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Profile(UserProfile),
    Id(String),
}

impl UserRef {
    /// The referenced user id, whichever shape was returned.
    pub fn id(&self) -> &str {
        match self {
            UserRef::Profile(profile) => &profile.id,
            UserRef::Id(id) => id,
        }
    }

    /// A display name, falling back to the id for unpopulated refs.
    pub fn display_name(&self) -> &str {
        match self {
            UserRef::Profile(profile) => &profile.name,
            UserRef::Id(id) => id,
        }
    }
}

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// The opposite status, used by the status-toggle controls.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A to-do task as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "task")]
    pub text: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "user", default)]
    pub owner: Option<UserRef>,
    #[serde(rename = "assignedTo", default)]
    pub assigned_to: Option<UserRef>,
    #[serde(rename = "assignedBy", default)]
    pub assigned_by: Option<UserRef>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful auth response (login or registration).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// New-task request body.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    #[serde(rename = "task")]
    pub text: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Partial update for an existing task; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(rename = "task", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// A status-only patch, the common case for the toggle controls.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Server-computed dashboard split.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardSummary {
    #[serde(rename = "assignedByMe", default)]
    pub assigned_by_me: Vec<Task>,
    #[serde(rename = "assignedToMe", default)]
    pub assigned_to_me: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_parses_service_field_names() {
        let json = r#"{
            "_id": "t1",
            "task": "buy milk",
            "description": "2l",
            "status": "pending",
            "createdAt": "2024-05-01T10:00:00Z",
            "user": "u1",
            "assignedTo": {"_id": "u2", "name": "B", "email": "b@c.com"},
            "assignedBy": null
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.owner.as_ref().unwrap().id(), "u1");
        let assignee = task.assigned_to.as_ref().unwrap();
        assert_eq!(assignee.id(), "u2");
        assert_eq!(assignee.display_name(), "B");
        assert!(task.assigned_by.is_none());
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let json = r#"{"_id": "t2", "task": "call", "status": "completed"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert!(task.created_at.is_none());
        assert!(task.assigned_to.is_none());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = TaskPatch::status(TaskStatus::Completed);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "completed"}));
    }

    #[test]
    fn status_toggles_both_ways() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
    }
}
