//! Effect handlers.
//!
//! Pure async functions: each performs one API call and packages the
//! outcome as the event the reducer expects. Spawning and inbox
//! delivery live in the runtime; nothing here touches state.

use taskdeck_core::api::ApiClient;
use taskdeck_core::api::types::{Credentials, RegisterDraft, TaskDraft, TaskPatch};

use crate::common::TaskId;
use crate::events::{AuthUiEvent, TodoUiEvent, UiEvent};

pub async fn login(api: ApiClient, id: TaskId, credentials: Credentials) -> UiEvent {
    let result = api.login(&credentials).await;
    UiEvent::Auth(AuthUiEvent::LoginFinished { id, result })
}

pub async fn register(api: ApiClient, id: TaskId, draft: RegisterDraft) -> UiEvent {
    let result = api.register(&draft).await;
    UiEvent::Auth(AuthUiEvent::RegisterFinished { id, result })
}

pub async fn fetch_tasks(api: ApiClient, id: TaskId) -> UiEvent {
    let result = api.list_tasks().await;
    UiEvent::Todo(TodoUiEvent::TasksLoaded { id, result })
}

pub async fn fetch_users(api: ApiClient, id: TaskId) -> UiEvent {
    let result = api.list_users().await;
    UiEvent::Todo(TodoUiEvent::UsersLoaded { id, result })
}

pub async fn fetch_dashboard(api: ApiClient, id: TaskId) -> UiEvent {
    let result = api.get_dashboard().await;
    UiEvent::Todo(TodoUiEvent::DashboardLoaded { id, result })
}

pub async fn create_task(api: ApiClient, id: TaskId, draft: TaskDraft) -> UiEvent {
    let result = api.create_task(&draft).await;
    UiEvent::Todo(TodoUiEvent::TaskCreated { id, result })
}

pub async fn update_task(api: ApiClient, task_id: String, patch: TaskPatch) -> UiEvent {
    let result = api.update_task(&task_id, &patch).await;
    UiEvent::Todo(TodoUiEvent::TaskUpdated { task_id, result })
}

pub async fn delete_task(api: ApiClient, task_id: String) -> UiEvent {
    let result = api.delete_task(&task_id).await;
    UiEvent::Todo(TodoUiEvent::TaskDeleted { task_id, result })
}

pub async fn assign_task(api: ApiClient, task_id: String, user_id: String) -> UiEvent {
    let result = api.assign_task(&task_id, &user_id).await;
    UiEvent::Todo(TodoUiEvent::TaskAssigned { task_id, result })
}
