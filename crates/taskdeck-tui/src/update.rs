//! Central reducer.
//!
//! Every event funnels through [`update`]: it mutates [`AppState`] and
//! returns the effects the runtime must execute. No I/O happens here;
//! network calls and credential mirroring are returned as
//! [`UiEffect`]s. After every event the route guard re-resolves the
//! effective route, so an expired session can never keep a protected
//! screen on display.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taskdeck_core::api::ApiError;
use taskdeck_core::session::{SessionAction, SessionEffect, reduce};

use crate::effects::UiEffect;
use crate::events::{TodoUiEvent, UiEvent};
use crate::features::home::HomeMode;
use crate::features::{assign, auth, dashboard, home};
use crate::routes::{self, Route};
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.notices.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal(app, event),
        UiEvent::Auth(event) => auth::update::handle_result(app, event),
        UiEvent::Todo(event) => handle_todo(app, event),
    };

    app.route = routes::resolve(app.route, &app.session);
    effects
}

/// Runs a session transition and converts its storage effects into
/// runtime effects.
pub fn apply_session_action(app: &mut AppState, action: SessionAction) -> Vec<UiEffect> {
    let (session, effects) = reduce(&app.session, action);
    app.session = session;
    effects
        .into_iter()
        .map(|effect| match effect {
            SessionEffect::PersistCredentials { token, user } => {
                UiEffect::PersistCredentials { token, user }
            }
            SessionEffect::ClearCredentials => UiEffect::ClearCredentials,
        })
        .collect()
}

/// Dispatches a task-collection fetch.
pub fn fetch_tasks(app: &mut AppState) -> UiEffect {
    let task = app.task_seq.next_id();
    app.tasks.task_list.on_started(task);
    UiEffect::FetchTasks { task }
}

/// Dispatches a user-list fetch.
pub fn fetch_users(app: &mut AppState) -> UiEffect {
    let task = app.task_seq.next_id();
    app.tasks.user_list.on_started(task);
    UiEffect::FetchUsers { task }
}

/// Dispatches a dashboard fetch.
pub fn fetch_dashboard(app: &mut AppState) -> UiEffect {
    let task = app.task_seq.next_id();
    app.tasks.dashboard.on_started(task);
    UiEffect::FetchDashboard { task }
}

/// The fetch fan-out after a session becomes authenticated.
pub fn startup_fetches(app: &mut AppState) -> Vec<UiEffect> {
    vec![fetch_tasks(app), fetch_users(app), fetch_dashboard(app)]
}

fn handle_terminal(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![];
    }

    if app.route == Route::Auth {
        return auth::update::handle_key(app, key);
    }

    // Text-entry modes on the home screen swallow everything except
    // the quit chord above.
    let text_entry = app.route == Route::Home && app.home.mode != HomeMode::List;
    if !text_entry
        && let Some(effects) = handle_global_key(app, key)
    {
        return effects;
    }

    match app.route {
        Route::Auth => vec![],
        Route::Home => home::update::handle_key(app, key),
        Route::Dashboard => dashboard::update::handle_key(app, key),
        Route::Assign => assign::update::handle_key(app, key),
    }
}

/// Keys shared by every protected screen. Returns None for keys the
/// focused feature should handle instead.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        return Some(logout(app, "Signed out"));
    }
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            Some(vec![])
        }
        KeyCode::Char('1') => Some(navigate(app, Route::Home)),
        KeyCode::Char('2') => Some(navigate(app, Route::Dashboard)),
        KeyCode::Char('3') => Some(navigate(app, Route::Assign)),
        _ => None,
    }
}

/// Switches screens, re-fetching what the target screen shows.
fn navigate(app: &mut AppState, target: Route) -> Vec<UiEffect> {
    let target = routes::resolve(target, &app.session);
    if target == app.route {
        return vec![];
    }
    app.route = target;

    let mut effects = Vec::new();
    match target {
        Route::Dashboard => {
            if !app.tasks.dashboard.is_running() {
                effects.push(fetch_dashboard(app));
            }
        }
        Route::Assign => {
            if app.users.is_empty() && !app.tasks.user_list.is_running() {
                effects.push(fetch_users(app));
            }
        }
        Route::Home | Route::Auth => {}
    }
    effects
}

/// Tears down the authenticated context: session, collections, view
/// state and every in-flight marker, so late completions are dropped
/// by the gates instead of resurrecting stale data.
fn logout(app: &mut AppState, notice: &str) -> Vec<UiEffect> {
    let effects = apply_session_action(app, SessionAction::Logout);
    app.todos.clear();
    app.users.clear();
    app.tasks.clear();
    app.pending.clear();
    app.home = home::HomeState::default();
    app.dashboard = dashboard::DashboardState::default();
    app.assign = assign::AssignState::default();
    app.notices.info(notice);
    effects
}

fn handle_todo(app: &mut AppState, event: TodoUiEvent) -> Vec<UiEffect> {
    match event {
        TodoUiEvent::TasksLoaded { id, result } => {
            if !app.tasks.task_list.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(tasks) => {
                    app.todos.replace_all(tasks);
                    clamp_selections(app);
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::UsersLoaded { id, result } => {
            if !app.tasks.user_list.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(users) => {
                    app.users = users;
                    clamp_selections(app);
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::DashboardLoaded { id, result } => {
            if !app.tasks.dashboard.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(summary) => {
                    app.todos.set_dashboard(summary);
                    clamp_selections(app);
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::TaskCreated { id, result } => {
            if !app.tasks.task_create.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(task) => {
                    app.todos.add_one(task);
                    app.home.clear_draft();
                    app.home.mode = HomeMode::List;
                    app.notices.success("Task added");
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::TaskUpdated { task_id, result } => {
            if !app.pending.finish(&task_id) {
                return vec![];
            }
            match result {
                Ok(task) => {
                    if !app.todos.update_one(task.clone()) {
                        tracing::debug!(task_id = %task.id, "update for a task not in the collection");
                    }
                    app.todos.update_in_dashboard(&task);
                    // The split is server-computed, so after a toggle on
                    // the dashboard screen the aggregate is re-fetched
                    // rather than re-derived locally.
                    if app.route == Route::Dashboard && !app.tasks.dashboard.is_running() {
                        return vec![fetch_dashboard(app)];
                    }
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::TaskDeleted { task_id, result } => {
            if !app.pending.finish(&task_id) {
                return vec![];
            }
            match result {
                Ok(()) => {
                    app.todos.remove_one(&task_id);
                    clamp_selections(app);
                    app.notices.success("Task deleted");
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
        TodoUiEvent::TaskAssigned { task_id, result } => {
            if !app.pending.finish(&task_id) {
                return vec![];
            }
            match result {
                Ok(task) => {
                    app.assign.chosen_task = None;
                    let assignee = task
                        .assigned_to
                        .as_ref()
                        .map_or_else(|| "user".to_string(), |u| u.display_name().to_string());
                    app.notices.success(format!("Assigned to {assignee}"));
                    if !app.todos.update_one(task) && !app.tasks.task_list.is_running() {
                        // The collection did not contain the task; pull a
                        // fresh copy.
                        return vec![fetch_tasks(app)];
                    }
                    vec![]
                }
                Err(err) => fail(app, err),
            }
        }
    }
}

/// Shared failure path for task operations.
///
/// An auth-kind error means the token is no longer trusted: the session
/// is torn down implicitly and the guard lands on the sign-in screen.
fn fail(app: &mut AppState, err: ApiError) -> Vec<UiEffect> {
    if err.is_auth() {
        return logout(app, "Session expired. Sign in again.");
    }
    app.todos.set_error(err.message.clone());
    app.notices.error(err.message);
    vec![]
}

fn clamp_selections(app: &mut AppState) {
    app.home.clamp_selection(app.todos.tasks.len());
    app.dashboard.clamp(
        app.todos.dashboard.assigned_by_me.len(),
        app.todos.dashboard.assigned_to_me.len(),
    );
    app.assign.clamp(app.todos.tasks.len(), app.users.len());
}

#[cfg(test)]
mod tests {
    use taskdeck_core::api::types::{
        AuthResponse, Task, TaskStatus, UserProfile,
    };
    use taskdeck_core::config::Config;
    use taskdeck_core::session::{Session, SessionAction};

    use super::*;
    use crate::common::ItemOp;
    use crate::events::AuthUiEvent;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "A".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task {id}"),
            description: String::new(),
            status: TaskStatus::Pending,
            created_at: None,
            owner: None,
            assigned_to: None,
            assigned_by: None,
        }
    }

    fn anonymous_app() -> AppState {
        AppState::with_session(Config::default(), Session::anonymous())
    }

    fn authed_app() -> AppState {
        let (session, _) = taskdeck_core::session::reduce(
            &Session::anonymous(),
            SessionAction::LoginSuccess {
                user: profile(),
                token: "tok1".to_string(),
            },
        );
        AppState::with_session(Config::default(), session)
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    #[test]
    fn login_success_authenticates_persists_and_fans_out_fetches() {
        let mut app = anonymous_app();
        assert_eq!(app.route, Route::Auth);

        let id = app.task_seq.next_id();
        app.tasks.login.on_started(id);
        let effects = update(
            &mut app,
            UiEvent::Auth(AuthUiEvent::LoginFinished {
                id,
                result: Ok(AuthResponse {
                    user: profile(),
                    token: "tok1".to_string(),
                }),
            }),
        );

        assert!(app.session.is_authenticated());
        assert_eq!(app.route, Route::Home);
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::PersistCredentials { .. }))
        );
        assert!(effects.iter().any(|e| matches!(e, UiEffect::FetchTasks { .. })));
        assert!(effects.iter().any(|e| matches!(e, UiEffect::FetchUsers { .. })));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchDashboard { .. }))
        );
    }

    #[test]
    fn stale_fetch_completion_is_dropped() {
        let mut app = authed_app();
        app.todos.replace_all(vec![task("kept")]);

        let first = app.task_seq.next_id();
        app.tasks.task_list.on_started(first);
        let second = app.task_seq.next_id();
        app.tasks.task_list.on_started(second);

        update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TasksLoaded {
                id: first,
                result: Ok(vec![task("stale")]),
            }),
        );
        assert_eq!(app.todos.tasks[0].id, "kept");
        assert!(app.tasks.task_list.is_running());

        update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TasksLoaded {
                id: second,
                result: Ok(vec![task("fresh")]),
            }),
        );
        assert_eq!(app.todos.tasks[0].id, "fresh");
        assert!(!app.tasks.task_list.is_running());
    }

    #[test]
    fn auth_error_during_task_op_logs_out_implicitly() {
        let mut app = authed_app();
        app.todos.replace_all(vec![task("t1")]);
        app.pending.begin("t1", ItemOp::Update);

        let effects = update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TaskUpdated {
                task_id: "t1".to_string(),
                result: Err(ApiError::auth("token expired")),
            }),
        );

        assert!(!app.session.is_authenticated());
        assert_eq!(app.route, Route::Auth);
        assert!(app.todos.tasks.is_empty());
        assert!(!app.pending.is_pending("t1"));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::ClearCredentials))
        );
    }

    #[test]
    fn non_auth_error_keeps_the_session() {
        let mut app = authed_app();
        app.pending.begin("t1", ItemOp::Delete);

        update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TaskDeleted {
                task_id: "t1".to_string(),
                result: Err(ApiError::network("Failed to delete task")),
            }),
        );

        assert!(app.session.is_authenticated());
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.todos.error.as_deref(), Some("Failed to delete task"));
    }

    #[test]
    fn completion_after_logout_is_dropped() {
        let mut app = authed_app();
        app.pending.begin("t1", ItemOp::Update);
        update(&mut app, ctrl('l'));
        assert_eq!(app.route, Route::Auth);

        update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TaskUpdated {
                task_id: "t1".to_string(),
                result: Ok(task("t1")),
            }),
        );
        assert!(app.todos.tasks.is_empty());
    }

    #[test]
    fn toggle_is_blocked_while_the_id_is_pending() {
        let mut app = authed_app();
        app.todos.replace_all(vec![task("t1")]);

        let first = update(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(first.len(), 1);
        assert!(matches!(&first[0], UiEffect::UpdateTask { id, .. } if id == "t1"));

        let second = update(&mut app, key(KeyCode::Char(' ')));
        assert!(second.is_empty());
    }

    #[test]
    fn dashboard_toggle_completion_refetches_the_aggregate() {
        let mut app = authed_app();
        app.route = Route::Dashboard;
        app.pending.begin("t1", ItemOp::Update);

        let mut done = task("t1");
        done.status = TaskStatus::Completed;
        let effects = update(
            &mut app,
            UiEvent::Todo(TodoUiEvent::TaskUpdated {
                task_id: "t1".to_string(),
                result: Ok(done),
            }),
        );
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchDashboard { .. }))
        );
    }

    #[test]
    fn quit_and_navigation_keys() {
        let mut app = authed_app();

        update(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.route, Route::Dashboard);

        update(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.route, Route::Home);

        update(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn navigation_to_protected_screen_is_guarded() {
        let mut app = anonymous_app();
        update(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.route, Route::Auth);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut app = anonymous_app();
        update(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }
}
