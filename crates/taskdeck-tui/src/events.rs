//! Events consumed by the reducer.
//!
//! Async handlers post completion events to the runtime inbox; the
//! runtime forwards them, terminal input and ticks into
//! [`crate::update::update`] in arrival order.

use taskdeck_core::api::ApiResult;
use taskdeck_core::api::types::{AuthResponse, DashboardSummary, Task, UserProfile};

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer: spinner animation, notice expiry.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    Auth(AuthUiEvent),
    Todo(TodoUiEvent),
}

#[derive(Debug)]
pub enum AuthUiEvent {
    LoginFinished {
        id: TaskId,
        result: ApiResult<AuthResponse>,
    },
    RegisterFinished {
        id: TaskId,
        result: ApiResult<AuthResponse>,
    },
}

#[derive(Debug)]
pub enum TodoUiEvent {
    TasksLoaded {
        id: TaskId,
        result: ApiResult<Vec<Task>>,
    },
    UsersLoaded {
        id: TaskId,
        result: ApiResult<Vec<UserProfile>>,
    },
    DashboardLoaded {
        id: TaskId,
        result: ApiResult<DashboardSummary>,
    },
    TaskCreated {
        id: TaskId,
        result: ApiResult<Task>,
    },
    TaskUpdated {
        task_id: String,
        result: ApiResult<Task>,
    },
    TaskDeleted {
        task_id: String,
        result: ApiResult<()>,
    },
    TaskAssigned {
        task_id: String,
        result: ApiResult<Task>,
    },
}
