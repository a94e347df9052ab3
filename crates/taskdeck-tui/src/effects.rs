//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O only (network calls and credential
//! mirroring); the reducer itself never performs I/O.

use taskdeck_core::api::types::{Credentials, RegisterDraft, TaskDraft, TaskPatch, UserProfile};

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone)]
pub enum UiEffect {
    /// Authenticate with email + password.
    Login {
        task: TaskId,
        credentials: Credentials,
    },

    /// Register a new account.
    Register { task: TaskId, draft: RegisterDraft },

    /// Fetch the caller's task collection.
    FetchTasks { task: TaskId },

    /// Fetch all users (assignment picker).
    FetchUsers { task: TaskId },

    /// Fetch the server-computed dashboard split.
    FetchDashboard { task: TaskId },

    /// Create a new task.
    CreateTask { task: TaskId, draft: TaskDraft },

    /// Apply a partial update to a task.
    UpdateTask { id: String, patch: TaskPatch },

    /// Delete a task.
    DeleteTask { id: String },

    /// Assign a task to a user.
    AssignTask { task_id: String, user_id: String },

    /// Mirror the session token + user into the credential store.
    PersistCredentials { token: String, user: UserProfile },

    /// Remove the persisted credentials.
    ClearCredentials,
}
